//! Client for the forecast.io / Dark Sky forecast API.
//!
//! [`get`] does the full round trip. [`get_response`] and [`from_json`] are the two halves it
//! is built from, for callers that bring their own transport or already have a payload.

#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod client;
mod decode;
mod error;
mod forecast;
mod request;
mod transport;
mod units;

pub use crate::client::{ForecastClient, get};
pub use crate::decode::{API_CALLS_HEADER, from_json, parse_api_calls};
pub use crate::error::ForecastError;
pub use crate::forecast::{Alert, DataBlock, DataPoint, Flags, ForecastResponse};
pub use crate::request::{BASE_URL, NOW, forecast_url, get_response};
pub use crate::transport::{RawResponse, Transport};
pub use crate::units::{DataBlockType, Units};
