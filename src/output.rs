use std::io::{self, Write};

use colored::Colorize;

pub fn print_banner(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title.bold().cyan())?;
    writeln!(out, "{}", "=".repeat(30))
}

pub fn print_warning(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Warning:".red().bold(), msg.red())
}

pub fn print_info(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Info:".cyan().bold(), msg)
}

/// Print `question` without a newline and flush so the cursor waits after it.
pub fn print_prompt(out: &mut dyn Write, question: &str) -> io::Result<()> {
    write!(out, "{} ", question.yellow().bold())?;
    out.flush()
}

pub fn print_cancelled(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "Cache clearing cancelled.".yellow())
}

pub fn print_size_before(out: &mut dyn Write, size: &str) -> io::Result<()> {
    writeln!(
        out,
        "Total cache size before clearing: {}",
        size.yellow()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", "Clearing cache directories...".bold())
}

pub fn print_clearing(out: &mut dyn Write, path: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", "Clearing:".cyan(), path.dimmed())
}

pub fn print_cleared(out: &mut dyn Write, path: &str, size: &str) -> io::Result<()> {
    writeln!(
        out,
        "  {} {}  {}",
        "Cleared".green(),
        path.dimmed(),
        size.yellow()
    )
}

pub fn print_clear_error(out: &mut dyn Write, path: &str, err: &str) -> io::Result<()> {
    writeln!(
        out,
        "  {} {}: {}",
        "Failed to clear".red().bold(),
        path.dimmed(),
        err.red()
    )
}

pub fn print_not_found(out: &mut dyn Write, path: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", "Path not found:".yellow(), path.dimmed())
}

pub fn print_summary_header(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "{}", "Cache Clearing Summary:".bold().white())
}

pub fn print_summary_row(out: &mut dyn Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<30} {}", label, value.green())
}

pub fn print_clean_complete(out: &mut dyn Write, app: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("{app} cache has been cleared successfully!")
            .green()
            .bold()
    )?;
    writeln!(out, "You can now restart {app}.")
}

pub fn print_nothing_cleared(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "No cache directories were cleared.".yellow().bold())
}
