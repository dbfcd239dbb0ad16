//! Settings loaded from `<config_dir>/tidykit/config`, overlaid by
//! environment variables of the same name.

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{debug, warn};

use crate::error::ConfigError;

pub const PROCESS_NAME: &str = "TIDYKIT_PROCESS_NAME";
pub const USERS_ROOT: &str = "TIDYKIT_USERS_ROOT";
pub const BROWSER_PATH: &str = "TIDYKIT_BROWSER_PATH";
pub const RENDER_WIDTH: &str = "TIDYKIT_RENDER_WIDTH";
pub const RENDER_HEIGHT: &str = "TIDYKIT_RENDER_HEIGHT";
pub const RENDER_TIMEOUT_SECS: &str = "TIDYKIT_RENDER_TIMEOUT_SECS";
pub const SOFFICE_PATH: &str = "TIDYKIT_SOFFICE_PATH";
pub const BROWSER_NO_SANDBOX: &str = "TIDYKIT_BROWSER_NO_SANDBOX";

/// Stands in for an unset `USERNAME`. `<` and `>` are not allowed in Windows
/// file names, so paths built from it never exist.
pub const MISSING_IDENTITY: &str = "<unknown user>";

const KEYS: &[&str] = &[
    PROCESS_NAME,
    USERS_ROOT,
    BROWSER_PATH,
    RENDER_WIDTH,
    RENDER_HEIGHT,
    RENDER_TIMEOUT_SECS,
    SOFFICE_PATH,
    BROWSER_NO_SANDBOX,
];

const DEFAULT_BROWSER: &str = r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load from `path` (or the default location) and the process environment.
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).or_else(default_config_path);

        let contents = match &config_path {
            Some(p) if p.exists() => {
                debug!("Reading config from {}", p.display());
                Some(fs::read_to_string(p).map_err(|error| ConfigError::IoRead {
                    path: p.clone(),
                    error,
                })?)
            }
            _ => None,
        };

        let mut config = Self::from_sources(contents.as_deref(), env::vars());
        config.config_path = config_path;
        Ok(config)
    }

    /// Build from file contents and an environment snapshot; the environment
    /// wins over the file, the file wins over the defaults.
    pub fn from_sources(
        file: Option<&str>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut map = default_map();

        for line in file.unwrap_or_default().lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                let (k, v) = (k.trim(), v.trim());
                if v.is_empty() {
                    continue;
                }
                if KEYS.contains(&k) {
                    map.insert(k.to_string(), v.to_string());
                } else {
                    debug!("Ignoring unknown config key {k}");
                }
            }
        }

        for (k, v) in vars {
            if KEYS.contains(&k.as_str()) && !v.trim().is_empty() {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            config_path: None,
        }
    }

    /// The value for `key`; blank values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    fn get_u32(&self, key: &str) -> Result<u32, ConfigError> {
        let raw = self.get(key).unwrap_or_default();
        raw.parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    pub fn process_name(&self) -> &str {
        self.get(PROCESS_NAME).unwrap_or("spotify")
    }

    pub fn users_root(&self) -> PathBuf {
        PathBuf::from(self.get(USERS_ROOT).unwrap_or(r"C:\Users"))
    }

    pub fn browser_path(&self) -> PathBuf {
        PathBuf::from(self.get(BROWSER_PATH).unwrap_or(DEFAULT_BROWSER))
    }

    pub fn soffice_path(&self) -> PathBuf {
        PathBuf::from(self.get(SOFFICE_PATH).unwrap_or("soffice"))
    }

    pub fn browser_no_sandbox(&self) -> bool {
        self.get_bool(BROWSER_NO_SANDBOX)
    }

    /// Browser viewport size as `(width, height)`.
    pub fn render_size(&self) -> Result<(u32, u32), ConfigError> {
        Ok((self.get_u32(RENDER_WIDTH)?, self.get_u32(RENDER_HEIGHT)?))
    }

    pub fn render_timeout(&self) -> Result<Duration, ConfigError> {
        Ok(Duration::from_secs(u64::from(self.get_u32(RENDER_TIMEOUT_SECS)?)))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tidykit").join("config"))
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert(PROCESS_NAME.into(), "spotify".into());
    m.insert(USERS_ROOT.into(), r"C:\Users".into());
    m.insert(BROWSER_PATH.into(), DEFAULT_BROWSER.into());
    m.insert(SOFFICE_PATH.into(), "soffice".into());
    m.insert(RENDER_WIDTH.into(), "1280".into());
    m.insert(RENDER_HEIGHT.into(), "800".into());
    m.insert(RENDER_TIMEOUT_SECS.into(), "60".into());
    m
}

/// The user identity the cache paths are built from.
pub fn identity() -> String {
    identity_from(env::var("USERNAME").ok())
}

fn identity_from(var: Option<String>) -> String {
    match var.filter(|u| !u.trim().is_empty()) {
        Some(user) => user,
        None => {
            warn!("USERNAME is not set; cache paths will not resolve");
            MISSING_IDENTITY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Vec<(String, String)> {
        Vec::new()
    }

    #[test]
    fn defaults_apply_without_sources() {
        let cfg = Config::from_sources(None, no_env());
        assert_eq!(cfg.process_name(), "spotify");
        assert_eq!(cfg.users_root(), PathBuf::from(r"C:\Users"));
        assert_eq!(cfg.render_size().unwrap(), (1280, 800));
        assert_eq!(cfg.render_timeout().unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn file_overrides_defaults_and_env_overrides_file() {
        let file = "# comment\n\nTIDYKIT_PROCESS_NAME = spot\nTIDYKIT_RENDER_WIDTH=800\n";
        let env = vec![
            (PROCESS_NAME.to_string(), "Spotify.exe".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ];
        let cfg = Config::from_sources(Some(file), env);

        assert_eq!(cfg.process_name(), "Spotify.exe");
        assert_eq!(cfg.render_size().unwrap(), (800, 800));
        assert_eq!(cfg.get("UNRELATED"), None);
    }

    #[test]
    fn bad_number_names_the_key() {
        let cfg = Config::from_sources(Some("TIDYKIT_RENDER_HEIGHT=tall"), no_env());
        let err = cfg.render_size().unwrap_err();
        assert!(err.to_string().contains(RENDER_HEIGHT));
        assert!(err.to_string().contains("tall"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config");
        fs::write(&path, "TIDYKIT_SOFFICE_PATH=/opt/lo/soffice\n").unwrap();

        let cfg = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.config_path.as_deref(), Some(path.as_path()));
        if env::var(SOFFICE_PATH).is_err() {
            assert_eq!(cfg.soffice_path(), PathBuf::from("/opt/lo/soffice"));
        }
    }

    #[test]
    fn load_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(tmp.path().join("absent").as_path())).is_ok());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let env = vec![(PROCESS_NAME.to_string(), "  ".to_string())];
        let cfg = Config::from_sources(Some("TIDYKIT_SOFFICE_PATH=\n"), env);
        assert_eq!(cfg.process_name(), "spotify");
        assert_eq!(cfg.soffice_path(), PathBuf::from("soffice"));
    }

    #[test]
    fn unknown_file_keys_are_dropped() {
        let cfg = Config::from_sources(Some("HOME=/elsewhere\nTIDYKIT_TYPO=1\n"), no_env());
        assert_eq!(cfg.get("HOME"), None);
        assert_eq!(cfg.get("TIDYKIT_TYPO"), None);
    }

    #[test]
    fn no_sandbox_flag_parses() {
        assert!(!Config::from_sources(None, no_env()).browser_no_sandbox());
        let cfg = Config::from_sources(Some("TIDYKIT_BROWSER_NO_SANDBOX=true"), no_env());
        assert!(cfg.browser_no_sandbox());
    }

    #[test]
    fn missing_identity_keeps_a_per_user_component() {
        assert_eq!(identity_from(None), MISSING_IDENTITY);
        assert_eq!(identity_from(Some(String::new())), MISSING_IDENTITY);
        assert_eq!(identity_from(Some("alice".into())), "alice");

        let root = Path::new("/users");
        let locations = crate::targets::spotify::cache_locations(root, &identity_from(None));
        for location in locations {
            assert!(location.path.starts_with(root.join(MISSING_IDENTITY)));
            assert!(!location.path.exists());
        }
    }
}
