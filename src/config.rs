use forecast_client::{NOW, Units};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No {0} given: pass it on the command line or set it in the config file")]
    Missing(&'static str),
}

/// Defaults for the command line, read from a JSON file.
///
/// ```json
/// {"api_key": "...", "latitude": 42.5468, "longitude": "-71.2550102", "units": "us"}
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    #[serde(deserialize_with = "coordinate")]
    pub latitude: Option<String>,
    #[serde(deserialize_with = "coordinate")]
    pub longitude: Option<String>,
    pub units: Option<Units>,
}

/// Everything needed for one request, after merging flags over the config file
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub latitude: String,
    pub longitude: String,
    pub time: String,
    pub units: Units,
}

/// Command-line values; `None` falls back to the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub time: Option<String>,
    pub units: Option<Units>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let conf_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&conf_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn resolve(self, overrides: Overrides) -> Result<Settings, ConfigError> {
        Ok(Settings {
            api_key: overrides
                .api_key
                .or(self.api_key)
                .filter(|key| !key.is_empty())
                .ok_or(ConfigError::Missing("API key"))?,
            latitude: overrides
                .latitude
                .or(self.latitude)
                .ok_or(ConfigError::Missing("latitude"))?,
            longitude: overrides
                .longitude
                .or(self.longitude)
                .ok_or(ConfigError::Missing("longitude"))?,
            time: overrides.time.unwrap_or_else(|| NOW.to_string()),
            units: overrides.units.or(self.units).unwrap_or_default(),
        })
    }
}

/// Coordinates may be written as JSON numbers or strings; either way they are sent verbatim.
fn coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<Coordinate>::deserialize(deserializer)?.map(|coord| match coord {
            Coordinate::Text(text) => text,
            Coordinate::Number(number) => number.to_string(),
        }),
    )
}
