use std::path::PathBuf;
use thiserror::Error;

/// Construction-time failures. Nothing past configuration can fail.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML from '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("grid size must be positive")]
    EmptyGrid,

    #[error("ring radii must satisfy 0 <= bone <= muscle <= skin (got bone={bone}, muscle={muscle}, skin={skin})")]
    RadiiOrder { bone: f64, muscle: f64, skin: f64 },

    #[error("probability '{name}' must be within [0, 1] (got {value})")]
    Probability { name: &'static str, value: f64 },

    #[error("invalid value for '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}
