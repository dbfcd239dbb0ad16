use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "tidykit",
    about = "Spotify cache cleaner, plus document and HTML conversion helpers",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Read settings from this file instead of the default config location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clear the Spotify desktop cache (Windows only)
    Clean,

    /// Convert a .docx file, or every .docx in a folder, to PDF
    Convert {
        /// Document or folder to convert
        #[arg(default_value = "report.docx")]
        input: PathBuf,

        /// PDF to write (ignored when converting a folder)
        #[arg(default_value = "result.pdf")]
        output: PathBuf,
    },

    /// Screenshot an HTML page with a headless browser
    Render {
        /// HTML file to render instead of the built-in page
        #[arg(long)]
        html: Option<PathBuf>,

        /// PNG file to write
        #[arg(long, default_value = render::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}
