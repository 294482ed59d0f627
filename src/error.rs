use thiserror::Error;

use std::error::Error as StdError;
use std::io;

/// Everything that can go wrong while fetching or decoding a forecast.
///
/// Only two kinds of failure are surfaced: the transport could not deliver a body, or the body
/// could not be decoded into a forecast. Non-2xx statuses, unknown fields and a bad call-count
/// header are not errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Connection, DNS or body-read failure
    #[error("Encountered error calling forecast API: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
    /// The body was not valid JSON
    #[error("Unable to deserialize forecast: {0}")]
    Decode(#[from] serde_json::Error),
    /// The body was valid JSON, but the top-level value was not an object
    #[error("Unable to deserialize forecast: expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

impl ForecastError {
    /// Wrap any error raised by a transport
    pub fn transport<E>(err: E) -> ForecastError
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        ForecastError::Transport(err.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ForecastError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ForecastError::Decode(_) | ForecastError::NotAnObject(_)
        )
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        ForecastError::transport(err)
    }
}

impl From<io::Error> for ForecastError {
    fn from(err: io::Error) -> Self {
        ForecastError::transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_transport_errors() {
        let err: ForecastError = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(err.is_transport());
        assert!(!err.is_decode());
        assert!(err.to_string().contains("reset"));
    }

    #[test]
    fn json_errors_are_decode_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ForecastError = json_err.into();
        assert!(err.is_decode());
        assert!(!err.is_transport());
    }

    #[test]
    fn not_an_object_names_the_type_found() {
        let err = ForecastError::NotAnObject("an array");
        assert!(err.is_decode());
        assert!(err.to_string().ends_with("found an array"));
    }
}
