use crate::error::ForecastError;

use reqwest::blocking::{Client, Response};

use std::io::Read;

/// Something that can perform the single GET a forecast needs.
///
/// The blocking reqwest [`Client`] is the default. Anything else (a stub, a client with a
/// timeout, a recorded fixture) can stand in without touching URL building or decoding.
pub trait Transport {
    type Response: RawResponse;

    /// Issue a GET for `url`. Any HTTP status counts as success.
    fn get(&self, url: &str) -> Result<Self::Response, ForecastError>;
}

/// An open HTTP response: status, headers, and a body to read from. Dropping it releases the
/// underlying connection.
pub trait RawResponse: Read {
    fn status_code(&self) -> u16;

    /// Value of the header `name` (case-insensitive), if present and valid UTF-8
    fn header(&self, name: &str) -> Option<&str>;

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code())
    }
}

impl Transport for Client {
    type Response = Response;

    fn get(&self, url: &str) -> Result<Response, ForecastError> {
        Ok(Client::get(self, url).send()?)
    }
}

impl RawResponse for Response {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }
}
