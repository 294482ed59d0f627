use crate::decode::{API_CALLS_HEADER, from_json, parse_api_calls};
use crate::error::ForecastError;
use crate::forecast::ForecastResponse;
use crate::request;
use crate::transport::{RawResponse, Transport};
use crate::units::Units;

use reqwest::blocking::{Client, ClientBuilder};

use std::fmt;
use std::io::Read;
use std::time::Duration;

/// Fetch and decode a forecast in one round trip.
///
/// The response is read to the end, decoded, and dropped before returning, whatever the
/// outcome. The call count from the `X-Forecast-API-Calls` header is stored in
/// [`ForecastResponse::api_calls`].
pub fn get<T: Transport>(
    transport: &T,
    api_key: &str,
    latitude: &str,
    longitude: &str,
    time: &str,
    units: Units,
) -> Result<ForecastResponse, ForecastError> {
    let mut res = request::get_response(transport, api_key, latitude, longitude, time, units)?;

    let mut body = Vec::new();
    res.read_to_end(&mut body)?;
    trace!("Read {} byte forecast body", body.len());

    let mut forecast = from_json(&body)?;
    forecast.api_calls = parse_api_calls(res.header(API_CALLS_HEADER));
    Ok(forecast)
}

/// A forecast API client bound to one API key.
pub struct ForecastClient<T = Client> {
    api_key: String,
    transport: T,
}

impl ForecastClient<Client> {
    /// Construct a new client that uses the given API key.
    ///
    /// Requests are gzip-compressed and have no timeout; use
    /// [`ForecastClient::with_transport`] with a configured client to bound latency.
    pub fn new(api_key: String) -> Result<ForecastClient<Client>, ForecastError> {
        let transport = ClientBuilder::new()
            .gzip(true)
            .timeout(Option::<Duration>::None)
            .build()?;
        Ok(ForecastClient::with_transport(api_key, transport))
    }
}

impl<T: Transport> ForecastClient<T> {
    pub fn with_transport(api_key: String, transport: T) -> ForecastClient<T> {
        ForecastClient { api_key, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request a forecast without reading the response. See [`request::get_response`].
    pub fn get_response(
        &self,
        latitude: &str,
        longitude: &str,
        time: &str,
        units: Units,
    ) -> Result<T::Response, ForecastError> {
        request::get_response(
            &self.transport,
            &self.api_key,
            latitude,
            longitude,
            time,
            units,
        )
    }

    /// Fetch and decode a forecast. See [`get`].
    pub fn get(
        &self,
        latitude: &str,
        longitude: &str,
        time: &str,
        units: Units,
    ) -> Result<ForecastResponse, ForecastError> {
        get(
            &self.transport,
            &self.api_key,
            latitude,
            longitude,
            time,
            units,
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for ForecastClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastClient")
            .field("api_key", &"<redacted>")
            .field("transport", &self.transport)
            .finish()
    }
}
