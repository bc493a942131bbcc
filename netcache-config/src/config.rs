use crate::{CacheParams, HttpClientParams, ReachabilityParams};
use derive_builder::Builder;
use std::{fs, path, time::Duration};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("No {0} field in config")]
    MissingField(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Everything needed to assemble a fetch pipeline.
///
/// Built either from the YAML sections `http`, `cache` and `reachability`
/// or programmatically through [`NetworkConfigBuilder`].
#[derive(Builder, Default, Clone, Debug)]
#[builder(public, setter(into))]
pub struct NetworkConfig {
    #[builder(default)]
    pub http: HttpClientParams,
    #[builder(default)]
    pub cache: CacheParams,
    #[builder(default)]
    pub reachability: ReachabilityParams,
}

impl NetworkConfig {
    /// Reads all sections from a YAML document root.
    ///
    /// `http` is required; `cache` and `reachability` fall back to defaults
    /// when absent.
    pub fn from_config(config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        let http = config
            .get("http")
            .ok_or_else(|| ConfigError::MissingField("http".to_string()))?;

        Ok(Self {
            http: HttpClientParams::from_config(http)?,
            cache: CacheParams::from_config(&config["cache"])?,
            reachability: ReachabilityParams::from_config(&config["reachability"])?,
        })
    }
}

pub trait Configurable {
    fn config(&self) -> &serde_yaml::Value;

    // read configuration from yaml config
    fn load_config(
        config_file_path: impl AsRef<path::Path>,
    ) -> Result<serde_yaml::Value, ConfigError> {
        let content = fs::read_to_string(config_file_path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Extract Value from config using dot notation i.e. "cache.ttl"
    fn get_config_value(&self, key: &str) -> Option<&serde_yaml::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.')
            .try_fold(self.config(), |value, part| match value {
                serde_yaml::Value::Mapping(map) => map.get(part),
                _ => None,
            })
    }

    /// Typed network settings taken from the loaded document.
    fn network_config(&self) -> Result<NetworkConfig, ConfigError> {
        NetworkConfig::from_config(self.config())
    }
}

/// Reads `field` of `section` as a number of seconds.
///
/// Missing or null values resolve to `default`, or to
/// [`ConfigError::MissingField`] when there is none.
pub(crate) fn seconds(
    section: &serde_yaml::Value,
    path: &str,
    field: &str,
    default: Option<u64>,
) -> Result<Duration, ConfigError> {
    match section.get(field) {
        None | Some(serde_yaml::Value::Null) => default
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::MissingField(field.to_string())),
        Some(value) => value.as_u64().map(Duration::from_secs).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: format!("{path}.{field}"),
                reason: format!("expected a whole number of seconds, got {value:?}"),
            }
        }),
    }
}
