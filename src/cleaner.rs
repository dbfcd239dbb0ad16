use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{CleanError, FailureKind};
use crate::output;
use crate::process::{Presence, ProcessLookup};
use crate::utils;

/// What a cache location holds for the target application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// Main cache directory.
    Data,
    /// Embedded browser cache.
    Browser,
    Storage,
    Temp,
    /// Roaming profile data.
    Roaming,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Data => "main cache",
            Self::Browser => "browser cache",
            Self::Storage => "storage",
            Self::Temp => "temp files",
            Self::Roaming => "roaming config",
        };
        f.write_str(s)
    }
}

/// One candidate directory to clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLocation {
    pub kind: LocationKind,
    pub path: PathBuf,
}

/// How clearing a single location ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    NotFound,
    PermissionDenied,
    Failed,
}

impl From<FailureKind> for ClearOutcome {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::NotFound => Self::NotFound,
            FailureKind::PermissionDenied => Self::PermissionDenied,
            FailureKind::Unexpected | FailureKind::Cancelled => Self::Failed,
        }
    }
}

/// Result of processing a single location.
#[derive(Debug, Clone)]
pub struct LocationReport {
    pub location: CacheLocation,
    /// Size measured before clearing.
    pub size_bytes: u64,
    pub outcome: ClearOutcome,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<LocationReport>,
    /// Sum of the pre-clear sizes. An estimate of what was freed; never
    /// re-measured after deletion.
    pub total_bytes: u64,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(ClearOutcome::Cleared)
    }

    pub fn count(&self, outcome: ClearOutcome) -> usize {
        self.reports.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn cleared_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.reports
            .iter()
            .filter(|r| r.outcome == ClearOutcome::Cleared)
            .map(|r| &r.location.path)
    }
}

/// The trait every cleanup target implements.
pub trait Cleaner {
    /// Machine-readable name (e.g. "spotify").
    fn name(&self) -> &'static str;

    /// Human-readable label for display (e.g. "Spotify").
    fn label(&self) -> &'static str;

    /// Substring matched case-insensitively against running process names.
    fn process_name(&self) -> &str;

    /// The fixed set of directories to clear, in processing order.
    fn locations(&self) -> Vec<CacheLocation>;
}

/// Clear every location of `cleaner`, asking on `input` for confirmation
/// first when its process is (or may be) running.
///
/// Returns [`CleanError::Cancelled`] when the user declines; nothing on disk
/// has been touched at that point. Per-location failures never end the run
/// and are recorded in the summary instead.
pub fn run(
    cleaner: &dyn Cleaner,
    processes: &dyn ProcessLookup,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<RunSummary, CleanError> {
    let label = cleaner.label();
    output::print_banner(out, &format!("{label} Cache Cleaner"))?;

    let presence = processes.presence(cleaner.process_name());
    info!("{} presence: {:?}", cleaner.name(), presence);
    let question = match presence {
        Presence::Running => {
            output::print_warning(out, &format!("{label} is currently running!"))?;
            output::print_info(out, &format!("Please close {label} before clearing cache."))?;
            Some("Continue anyway? (y/N):")
        }
        Presence::Unknown => {
            output::print_warning(out, &format!("Cannot check whether {label} is running."))?;
            output::print_info(
                out,
                &format!("Please make sure {label} is closed before proceeding."),
            )?;
            Some("Continue? (y/N):")
        }
        Presence::NotRunning => None,
    };

    if let Some(question) = question {
        if !confirm(question, input, out)? {
            output::print_cancelled(out)?;
            return Err(CleanError::Cancelled);
        }
    }

    let locations = cleaner.locations();
    let sizes: Vec<u64> = locations.iter().map(|l| utils::dir_size(&l.path)).collect();
    let total_bytes = sizes.iter().sum();
    output::print_size_before(out, &utils::format_mb(total_bytes))?;

    let mut reports = Vec::with_capacity(locations.len());
    for (location, size_bytes) in locations.into_iter().zip(sizes) {
        let shown = location.path.display().to_string();
        let outcome = if location.path.exists() {
            output::print_clearing(out, &shown)?;
            match utils::erase_contents(&location.path) {
                Ok(removed) => {
                    info!("Cleared {} ({removed} entries, {})", shown, location.kind);
                    output::print_cleared(out, &shown, &utils::format_size(size_bytes))?;
                    ClearOutcome::Cleared
                }
                Err(e) => {
                    warn!("Failed to clear {}: {e}", shown);
                    output::print_clear_error(out, &shown, &e.to_string())?;
                    e.kind().into()
                }
            }
        } else {
            output::print_not_found(out, &shown)?;
            ClearOutcome::NotFound
        };

        reports.push(LocationReport {
            location,
            size_bytes,
            outcome,
        });
    }

    let summary = RunSummary {
        reports,
        total_bytes,
    };
    print_summary(&summary, label, out)?;
    Ok(summary)
}

/// Ask `question` and read one line. Only `y` (any case) counts as yes;
/// end of input counts as no.
fn confirm(question: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<bool, CleanError> {
    output::print_prompt(out, question)?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &RunSummary, label: &str, out: &mut dyn Write) -> Result<(), CleanError> {
    output::print_summary_header(out)?;
    output::print_summary_row(out, "Directories processed:", &summary.attempted().to_string())?;
    output::print_summary_row(out, "Successfully cleared:", &summary.succeeded().to_string())?;
    let failed = summary.count(ClearOutcome::PermissionDenied) + summary.count(ClearOutcome::Failed);
    if failed > 0 {
        output::print_summary_row(out, "Failed:", &failed.to_string())?;
    }
    output::print_summary_row(
        out,
        "Cache size freed:",
        &format!("~{}", utils::format_mb(summary.total_bytes)),
    )?;

    if summary.succeeded() > 0 {
        output::print_clean_complete(out, label)?;
    } else {
        output::print_nothing_cleared(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: ClearOutcome) -> LocationReport {
        LocationReport {
            location: CacheLocation {
                kind: LocationKind::Data,
                path: PathBuf::from("/x"),
            },
            size_bytes: 0,
            outcome,
        }
    }

    #[test]
    fn summary_counts_only_cleared_as_success() {
        let summary = RunSummary {
            reports: vec![
                report(ClearOutcome::Cleared),
                report(ClearOutcome::NotFound),
                report(ClearOutcome::PermissionDenied),
                report(ClearOutcome::Failed),
                report(ClearOutcome::Cleared),
            ],
            total_bytes: 0,
        };
        assert_eq!(summary.attempted(), 5);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.cleared_paths().count(), 2);
    }

    #[test]
    fn failure_kinds_map_to_outcomes() {
        assert_eq!(ClearOutcome::from(FailureKind::NotFound), ClearOutcome::NotFound);
        assert_eq!(
            ClearOutcome::from(FailureKind::PermissionDenied),
            ClearOutcome::PermissionDenied
        );
        assert_eq!(ClearOutcome::from(FailureKind::Unexpected), ClearOutcome::Failed);
    }

    #[test]
    fn confirm_accepts_only_y() {
        let mut sink = Vec::new();
        for (answer, expected) in [("y\n", true), ("Y\r\n", true), ("yes\n", false), ("\n", false), ("", false)] {
            let mut input = answer.as_bytes();
            assert_eq!(confirm("Continue?", &mut input, &mut sink).unwrap(), expected, "{answer:?}");
        }
    }
}
