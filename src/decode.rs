use crate::error::ForecastError;
use crate::forecast::ForecastResponse;

use serde::Deserialize;
use serde_json::Value;

/// Name of the response header carrying the number of calls made with the API key today
pub const API_CALLS_HEADER: &str = "X-Forecast-API-Calls";

/// Decode a forecast from a raw JSON body.
///
/// The body must hold a single JSON object. Missing fields are zero and unknown fields are
/// ignored, so only malformed JSON or a non-object payload fails.
pub fn from_json(body: &[u8]) -> Result<ForecastResponse, ForecastError> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ForecastError::NotAnObject(json_type(&value)));
    }

    let forecast = ForecastResponse::deserialize(value)?;
    debug!(
        "Decoded forecast for {},{}: {} minutely, {} hourly, {} daily, {} alerts",
        forecast.latitude,
        forecast.longitude,
        forecast.minutely.len(),
        forecast.hourly.len(),
        forecast.daily.len(),
        forecast.alerts.len()
    );
    Ok(forecast)
}

/// Parse the value of the API-call-count header, treating anything unparsable as zero.
pub fn parse_api_calls(header: Option<&str>) -> i64 {
    match header {
        None => 0,
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warn!("Ignoring unparsable {API_CALLS_HEADER} header {raw:?}: {err}");
            0
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_decodes_to_zero_values() {
        let forecast = from_json(b"{}").unwrap();
        assert_eq!(forecast, ForecastResponse::default());
        assert_eq!(forecast.latitude, 0.0);
        assert!(forecast.timezone.is_empty());
        assert!(forecast.hourly.data.is_empty());
        assert!(forecast.alerts.is_empty());
        assert_eq!(forecast.api_calls, 0);
        assert_eq!(forecast.code, 0);
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let forecast = from_json(
            br#"{"latitude": 42.5, "elevation": 38, "currently": {"temperature": 12.5, "smell": "ozone"}}"#,
        )
        .unwrap();
        assert_eq!(forecast.latitude, 42.5);
        assert_eq!(forecast.currently.temperature, 12.5);

        let reencoded = serde_json::to_value(&forecast).unwrap();
        assert!(reencoded.get("elevation").is_none());
        assert!(reencoded["currently"].get("smell").is_none());
    }

    #[test]
    fn recognized_fields_survive_reencoding() {
        let input = json!({
            "latitude": 37.8267,
            "longitude": -122.4233,
            "timezone": "America/Los_Angeles",
            "offset": -8.0,
            "code": 400,
            "currently": {
                "time": 1509993277,
                "summary": "Drizzle",
                "precipProbability": 0.54,
                "windSpeed": 5.32
            },
            "daily": {
                "summary": "Light rain on Tuesday",
                "icon": "rain",
                "data": [{"time": 1509955200, "temperatureHigh": 66.35}]
            },
            "alerts": [{"title": "Flood Watch", "expires": 1510036680}],
            "flags": {"sources": ["isd"], "units": "us"}
        });
        let forecast = from_json(input.to_string().as_bytes()).unwrap();
        let output = serde_json::to_value(&forecast).unwrap();

        for key in ["latitude", "longitude", "timezone", "offset", "code"] {
            assert_eq!(output[key], input[key], "{key}");
        }
        for key in ["time", "summary", "precipProbability", "windSpeed"] {
            assert_eq!(output["currently"][key], input["currently"][key], "{key}");
        }
        assert_eq!(output["daily"]["summary"], input["daily"]["summary"]);
        assert_eq!(
            output["daily"]["data"][0]["temperatureHigh"],
            input["daily"]["data"][0]["temperatureHigh"]
        );
        assert_eq!(output["alerts"][0]["title"], "Flood Watch");
        assert_eq!(output["alerts"][0]["expires"], 1510036680);
        assert_eq!(output["flags"]["sources"], input["flags"]["sources"]);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let bodies: [&[u8]; 5] = [b"", b"{", b"{\"latitude\": }", b"not json", b"{\"a\":1} x"];
        for body in bodies {
            let err = from_json(body).unwrap_err();
            assert!(matches!(err, ForecastError::Decode(_)), "{body:?}: {err}");
        }
    }

    #[test]
    fn non_object_payloads_are_decode_errors() {
        let cases: [(&[u8], &str); 5] = [
            (b"[]", "an array"),
            (b"null", "null"),
            (b"42", "a number"),
            (b"\"forecast\"", "a string"),
            (b"true", "a boolean"),
        ];
        for (body, found) in cases {
            match from_json(body) {
                Err(ForecastError::NotAnObject(kind)) => assert_eq!(kind, found),
                other => panic!("expected NotAnObject for {body:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn mistyped_field_is_a_decode_error() {
        let err = from_json(br#"{"latitude": "north"}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn nulls_decode_as_missing_fields() {
        let forecast = from_json(
            br#"{"timezone": null, "latitude": 1.0, "alerts": null, "hourly": null,
                 "currently": {"summary": null, "temperature": 1.0, "time": null},
                 "daily": {"summary": "Dry", "data": null},
                 "flags": {"sources": null, "units": "si"}}"#,
        )
        .unwrap();
        assert!(forecast.timezone.is_empty());
        assert_eq!(forecast.latitude, 1.0);
        assert!(forecast.alerts.is_empty());
        assert!(forecast.hourly.is_empty());
        assert!(forecast.currently.summary.is_empty());
        assert_eq!(forecast.currently.temperature, 1.0);
        assert_eq!(forecast.currently.time, 0);
        assert_eq!(forecast.daily.summary, "Dry");
        assert!(forecast.daily.is_empty());
        assert!(forecast.flags.sources.is_empty());
        assert_eq!(forecast.flags.units, "si");
    }

    #[test]
    fn float_timestamps_decode() {
        let forecast = from_json(
            br#"{"currently": {"time": 1509993277.0},
                 "alerts": [{"title": "Wind", "expires": 1510036680.5}]}"#,
        )
        .unwrap();
        assert_eq!(forecast.currently.time, 1509993277);
        assert_eq!(forecast.alerts[0].expires, 1510036680);
    }

    #[test]
    fn both_spellings_of_a_property_decode() {
        let forecast =
            from_json(br#"{"currently": {"dewPoint": 50.0, "dew_point": 51.0}}"#).unwrap();
        assert_eq!(forecast.currently.dew_point, 51.0);
    }

    #[test]
    fn snake_case_keys_survive_reencoding() {
        let forecast = from_json(br#"{"daily": {"data": [{"sunrise_time": 5}]}}"#).unwrap();
        let output = serde_json::to_value(&forecast).unwrap();
        assert_eq!(output["daily"]["data"][0]["sunrise_time"], 5);
        assert!(output["daily"]["data"][0].get("sunriseTime").is_none());
    }

    #[test]
    fn api_calls_header() {
        assert_eq!(parse_api_calls(Some("42")), 42);
        assert_eq!(parse_api_calls(Some(" 7 ")), 7);
        assert_eq!(parse_api_calls(None), 0);
        assert_eq!(parse_api_calls(Some("")), 0);
        assert_eq!(parse_api_calls(Some("lots")), 0);
    }
}
