use super::models::NarratorConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> NarratorConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded narrator config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return NarratorConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            NarratorConfig::default()
        }
    }
}

/// Parse sectioned TOML into a clamped config.
pub fn parse_config(contents: &str) -> Result<NarratorConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Parsing narrator config")?;
    Ok(NarratorConfig::from(tables).clamped())
}

pub fn serialize_config(config: &NarratorConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Serializing narrator config")
}
