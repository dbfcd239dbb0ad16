pub mod spotify;

use crate::cleaner::Cleaner;
use crate::config::Config;

/// The default cleanup target, built from config and the user identity.
pub fn spotify(config: &Config, identity: &str) -> Box<dyn Cleaner> {
    Box::new(spotify::Spotify::new(
        config.users_root(),
        identity.to_string(),
        config.process_name().to_string(),
    ))
}
