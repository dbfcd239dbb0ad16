//! Entry points for each subcommand.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cleaner;
use crate::cli::{Cli, Command};
use crate::config::{self, Config};
use crate::convert;
use crate::error::CleanError;
use crate::output;
use crate::process::SystemLookup;
use crate::render::{self, RenderRequest};
use crate::targets;
use crate::utils;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Clean => clean(&config),
        Command::Convert { input, output } => convert(&config, &input, &output),
        Command::Render { html, output } => render(&config, html.as_deref(), output),
    }
}

fn clean(config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cfg!(windows) {
        writeln!(out, "This tool is designed for Windows. For other OS:")?;
        for (os, path) in targets::spotify::OTHER_PLATFORM_HINTS {
            writeln!(out, "{os}: {path}")?;
        }
        return Ok(());
    }

    let identity = config::identity();
    let target = targets::spotify(config, &identity);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    match cleaner::run(target.as_ref(), &SystemLookup, &mut input, &mut out) {
        Ok(_) | Err(CleanError::Cancelled) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn convert(config: &Config, input: &Path, output: &Path) -> Result<()> {
    let written = convert::convert(&config.soffice_path(), input, output)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if written.is_empty() {
        output::print_info(&mut out, &format!("No .docx files found in {}", input.display()))?;
    }
    for pdf in written {
        let size = std::fs::metadata(&pdf).map(|m| m.len()).unwrap_or(0);
        writeln!(
            out,
            "{} {}  {}",
            "Created".green(),
            pdf.display(),
            utils::format_size(size).yellow()
        )?;
    }
    Ok(())
}

fn render(config: &Config, html: Option<&Path>, output: PathBuf) -> Result<()> {
    let html = match html {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => render::DEFAULT_HTML.to_string(),
    };
    let (width, height) = config.render_size()?;
    let req = RenderRequest {
        browser: config.browser_path(),
        html,
        output,
        width,
        height,
        timeout: config.render_timeout()?,
        no_sandbox: config.browser_no_sandbox(),
    };

    let written = render::render(&req)?;
    println!(
        "{} Image '{}' created successfully!",
        "Done.".green().bold(),
        written.display()
    );
    Ok(())
}
