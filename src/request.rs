use crate::error::ForecastError;
use crate::transport::{RawResponse, Transport};
use crate::units::Units;

// URL example: https://api.forecast.io/forecast/APIKEY/LATITUDE,LONGITUDE,TIME?units=ca
pub const BASE_URL: &str = "https://api.forecast.io/forecast";

/// Time marker asking for the current conditions rather than a specific time
pub const NOW: &str = "now";

/// Build the URL for a forecast request.
///
/// The arguments are concatenated as given, with no validation or escaping. The time segment
/// is left off entirely when `time` is [`NOW`]; anything else (a UNIX time, or an ISO 8601
/// `[YYYY]-[MM]-[DD]T[HH]:[MM]:[SS]` string) is passed through for the API to interpret.
pub fn forecast_url(
    api_key: &str,
    latitude: &str,
    longitude: &str,
    time: &str,
    units: Units,
) -> String {
    if time == NOW {
        format!("{BASE_URL}/{api_key}/{latitude},{longitude}?units={units}")
    } else {
        format!("{BASE_URL}/{api_key}/{latitude},{longitude},{time}?units={units}")
    }
}

/// Request a forecast and hand back the open response without reading the body.
///
/// Non-2xx statuses are not errors here: error bodies usually still decode, with `code` set.
pub fn get_response<T: Transport>(
    transport: &T,
    api_key: &str,
    latitude: &str,
    longitude: &str,
    time: &str,
    units: Units,
) -> Result<T::Response, ForecastError> {
    let url = forecast_url(api_key, latitude, longitude, time, units);
    info!("Calling forecast API: {}", logged_url(latitude, longitude, time, units));

    let res = transport.get(&url)?;
    if !res.is_success() {
        warn!(
            "Forecast API returned status {} for {latitude},{longitude}",
            res.status_code()
        );
    }
    Ok(res)
}

/// The request URL with the key replaced by a placeholder, for logging
fn logged_url(latitude: &str, longitude: &str, time: &str, units: Units) -> String {
    forecast_url("<api key>", latitude, longitude, time, units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_omits_time_segment() {
        assert_eq!(
            forecast_url("KEY", "37.8", "-122.4", NOW, Units::Us),
            "https://api.forecast.io/forecast/KEY/37.8,-122.4?units=us"
        );
    }

    #[test]
    fn time_is_third_path_component() {
        assert_eq!(
            forecast_url("KEY", "37.8", "-122.4", "1509993277", Units::Si),
            "https://api.forecast.io/forecast/KEY/37.8,-122.4,1509993277?units=si"
        );
        assert_eq!(
            forecast_url("KEY", "42.5468", "-71.2550102", "2019-01-01T00:00:00", Units::Auto),
            "https://api.forecast.io/forecast/KEY/42.5468,-71.2550102,2019-01-01T00:00:00?units=auto"
        );
    }

    #[test]
    fn arguments_are_not_validated_or_escaped() {
        assert_eq!(
            forecast_url("a key", "north", "", "Now", Units::Ca),
            "https://api.forecast.io/forecast/a key/north,,Now?units=ca"
        );
    }

    #[test]
    fn logged_url_hides_the_key() {
        assert_eq!(
            logged_url("1", "2", NOW, Units::Uk),
            "https://api.forecast.io/forecast/<api key>/1,2?units=uk"
        );
        // a key that also occurs in the host
        assert_eq!(
            logged_url("37.8", "-122.4", "1509993277", Units::Si),
            forecast_url("api", "37.8", "-122.4", "1509993277", Units::Si)
                .replace("/api/", "/<api key>/")
        );
    }
}
