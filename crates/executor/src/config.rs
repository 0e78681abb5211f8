use config::{Config as ConfigLoader, Environment, File, Map};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::Error;

/// Config file name, looked up in the working directory first.
const DEFAULT_CONFIG_FILE: &str = "Config.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SearchConfig {
    pub max_steps: Option<u64>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvConfig {
    pub has_headers: bool,
    pub delimiter: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub teams: usize,
    pub seed: Option<u64>,
    pub upset_probability: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    pub csv: CsvConfig,
    pub simulator: SimulatorConfig,
}

/// `./Config.toml` when present, otherwise the file shipped next to this
/// crate's manifest.
fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE)
}

/// Loads configuration from defaults, a TOML file and environment variables.
///
/// An explicit `path` must exist. Without one, `Config.toml` in the working
/// directory is used, falling back to the crate's shipped `Config.toml`.
/// Variables such as `CIRCUIT_SEARCH__MAX_STEPS` override file values.
pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    load_layered(path, None)
}

/// Same as [`load_config`], reading variables from `env_vars` instead of the
/// process environment when given.
fn load_layered(path: Option<&Path>, env_vars: Option<Map<String, String>>) -> Result<Config, Error> {
    let file_source = match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigLoadError(format!(
                    "Configuration file not found at: {}",
                    path.display()
                )));
            }
            File::from(path).required(true)
        }
        None => File::from(default_config_path().as_path()).required(false),
    };

    let s = ConfigLoader::builder()
        .set_default("csv.has_headers", true)
        .and_then(|b| b.set_default("csv.delimiter", ","))
        .and_then(|b| b.set_default("simulator.teams", 8))
        .and_then(|b| b.set_default("simulator.upset_probability", 0.35))
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?
        .add_source(file_source)
        .add_source(
            Environment::with_prefix("CIRCUIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    Ok(app_config)
}
