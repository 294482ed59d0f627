use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The unit system the API should report measurements in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Same as SI, except wind speed is in kilometers per hour
    Ca,
    /// International System of Units
    Si,
    /// Imperial units
    Us,
    /// Same as SI, except distance and visibility are in miles and wind speed is in miles per
    /// hour
    Uk,
    /// Selected by the API based on the geographic location
    #[default]
    Auto,
}

impl Units {
    /// The value sent in the `units` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Ca => "ca",
            Units::Si => "si",
            Units::Us => "us",
            Units::Uk => "uk",
            Units::Auto => "auto",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Ca, Units::Si, Units::Us, Units::Uk, Units::Auto]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::all()
            .iter()
            .find(|units| units.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown units '{s}'. Supported units: ca, si, us, uk, auto."))
    }
}

/// Names one of the top-level blocks of a forecast response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataBlockType {
    Currently,
    Minutely,
    Hourly,
    Daily,
    Alerts,
    Flags,
}

impl DataBlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataBlockType::Currently => "Currently",
            DataBlockType::Minutely => "Minutely",
            DataBlockType::Hourly => "Hourly",
            DataBlockType::Daily => "Daily",
            DataBlockType::Alerts => "Alerts",
            DataBlockType::Flags => "Flags",
        }
    }
}

impl fmt::Display for DataBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
