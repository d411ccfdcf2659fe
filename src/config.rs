use crate::error::Error;
use crate::text::{FillerMode, Normalizer, Replacement, ReplacementTable, default_replacements};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const FILLER_MODE_ENV: &str = "TRANSCRIPT_CLEANUP_FILLER_MODE";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_true")]
    pub use_default_replacements: bool,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub filler_mode: FillerMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_default_replacements: true,
            replacements: Vec::new(),
            filler_mode: FillerMode::default(),
        }
    }
}

impl Config {
    /// Built-in entries first (unless disabled), then user entries in file order.
    pub fn replacement_entries(&self) -> Vec<Replacement> {
        let mut entries = if self.use_default_replacements {
            default_replacements()
        } else {
            Vec::new()
        };
        entries.extend(self.replacements.iter().cloned());
        entries
    }

    pub fn normalizer(&self) -> Result<Normalizer, Error> {
        let table = ReplacementTable::new(self.replacement_entries())?;
        let normalizer = Normalizer::new(table, self.filler_mode);
        debug!(
            "replacements={} filler_mode={:?}",
            normalizer.table().len(),
            normalizer.filler_mode()
        );
        Ok(normalizer)
    }

    fn apply_env(&mut self, value: Option<String>) {
        if let Some(value) = value {
            match FillerMode::parse(&value) {
                Some(mode) => self.filler_mode = mode,
                None => debug!("ignoring {FILLER_MODE_ENV}={value:?}"),
            }
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("transcript-cleanup.toml")
}

fn default_true() -> bool {
    true
}

pub fn parse_config(content: &str, path: &Path) -> Result<Config, Error> {
    toml::from_str(content).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the config. An explicit path must exist and parse; the default
/// location is optional and a broken file there falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, Error> {
    let mut config = match explicit {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&content, path)?
        }
        None => {
            let path = config_path();
            if let Ok(content) = std::fs::read_to_string(&path) {
                match parse_config(&content, &path) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("{e}");
                        Config::default()
                    }
                }
            } else {
                debug!("no config at {path:?}");
                Config::default()
            }
        }
    };

    // Allow env var to override filler mode
    config.apply_env(std::env::var(FILLER_MODE_ENV).ok());

    Ok(config)
}
