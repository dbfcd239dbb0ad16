use std::path::{Path, PathBuf};

use crate::cleaner::{CacheLocation, Cleaner, LocationKind};

/// Cache locations of the Spotify desktop client on Windows.
pub struct Spotify {
    users_root: PathBuf,
    identity: String,
    process_name: String,
}

impl Spotify {
    pub fn new(users_root: PathBuf, identity: String, process_name: String) -> Self {
        Self {
            users_root,
            identity,
            process_name,
        }
    }
}

impl Cleaner for Spotify {
    fn name(&self) -> &'static str {
        "spotify"
    }

    fn label(&self) -> &'static str {
        "Spotify"
    }

    fn process_name(&self) -> &str {
        &self.process_name
    }

    fn locations(&self) -> Vec<CacheLocation> {
        cache_locations(&self.users_root, &self.identity)
    }
}

/// The candidate cache directories for `identity` under `users_root`.
///
/// The identity is not validated: a bogus one just yields paths that do not
/// exist.
pub fn cache_locations(users_root: &Path, identity: &str) -> Vec<CacheLocation> {
    let app_data = users_root.join(identity).join("AppData");
    let local = app_data.join("Local");

    vec![
        CacheLocation {
            kind: LocationKind::Data,
            path: local.join("Spotify").join("Data"),
        },
        CacheLocation {
            kind: LocationKind::Browser,
            path: local.join("Spotify").join("Browser"),
        },
        CacheLocation {
            kind: LocationKind::Storage,
            path: local.join("Spotify").join("Storage"),
        },
        CacheLocation {
            kind: LocationKind::Temp,
            path: local.join("Temp").join("Spotify"),
        },
        CacheLocation {
            kind: LocationKind::Roaming,
            path: app_data.join("Roaming").join("Spotify"),
        },
    ]
}

/// Where the client keeps its cache on platforms this cleaner does not handle.
pub const OTHER_PLATFORM_HINTS: &[(&str, &str)] = &[
    ("macOS", "~/Library/Caches/com.spotify.client/"),
    ("Linux", "~/.cache/spotify/"),
];
