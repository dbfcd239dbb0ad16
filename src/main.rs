use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tidykit::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    watch_interrupt();

    let is_clean = matches!(cli.command, Command::Clean);
    if let Err(e) = tidykit::run(cli) {
        eprintln!();
        eprintln!("{} {e:#}", "Unexpected error:".red().bold());
        if is_clean {
            eprintln!("Please run as administrator if permission issues persist.");
        }
    }
}

/// Exit quietly on Ctrl-C. The message goes to stderr because `clean` holds
/// the stdout lock while it waits for an answer.
fn watch_interrupt() {
    std::thread::spawn(|| {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::debug!("No interrupt handler: {e}");
                return;
            }
        };
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            eprintln!("\n\n{}", "Operation cancelled by user.".yellow());
            std::process::exit(0);
        }
    });
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
