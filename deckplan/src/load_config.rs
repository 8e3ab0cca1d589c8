/// `load_config` module: reads the YAML configuration file into a [`DeckConfig`].
///
/// This is the only place where untrusted YAML is parsed. Every field of
/// [`DeckConfig`] has a default, so a partial file overrides only what it
/// names and an empty file yields the defaults. Secrets such as the image API
/// key never live here; they come from the environment.
///
/// # Errors
/// Failures use `anyhow::Error` with the offending path in the message and are
/// surfaced at the CLI boundary.
use anyhow::Result;
use deckplan_core::config::DeckConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DeckConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(DeckConfig::default());
    }

    match serde_yaml::from_str::<DeckConfig>(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
