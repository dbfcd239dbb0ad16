//! Detection of running processes by name.

use sysinfo::{ProcessesToUpdate, System};
use tracing::{debug, warn};

/// Whether the target application was seen in the process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Running,
    NotRunning,
    /// The process table cannot be read on this platform.
    Unknown,
}

/// Answers whether a process matching a name is active.
pub trait ProcessLookup {
    fn presence(&self, needle: &str) -> Presence;
}

/// Lookup backed by the live process table.
pub struct SystemLookup;

impl ProcessLookup for SystemLookup {
    fn presence(&self, needle: &str) -> Presence {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Presence::Unknown;
        }

        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        let names = sys
            .processes()
            .values()
            .map(|p| p.name().to_string_lossy().into_owned());
        presence_in(names, needle)
    }
}

/// Lookup with a fixed answer.
pub struct FixedLookup(pub Presence);

impl ProcessLookup for FixedLookup {
    fn presence(&self, _needle: &str) -> Presence {
        self.0
    }
}

/// Case-insensitive substring match of `needle` against each process name.
///
/// A blank needle would match everything, so it yields `Unknown` and the
/// caller falls back to asking the user.
pub fn presence_in<I, S>(names: I, needle: &str) -> Presence
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        warn!("Empty process name; cannot tell whether the target is running");
        return Presence::Unknown;
    }
    for name in names {
        let name = name.as_ref();
        if name.to_lowercase().contains(&needle) {
            debug!("Matched process '{name}'");
            return Presence::Running;
        }
    }
    Presence::NotRunning
}
