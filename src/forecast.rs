use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A decoded response from the forecast endpoint.
///
/// Every field mirrors one field of the JSON payload. Fields the payload leaves out are zero,
/// empty, or an all-zero nested record; fields this type does not know about are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    /// The requested latitude.
    #[serde(deserialize_with = "nullable")]
    pub latitude: f64,
    /// The requested longitude.
    #[serde(deserialize_with = "nullable")]
    pub longitude: f64,
    /// The IANA timezone name for the requested location.
    #[serde(deserialize_with = "nullable")]
    pub timezone: String,
    /// The timezone offset in hours. Prefer `timezone`, this one ignores daylight saving.
    #[serde(deserialize_with = "nullable")]
    pub offset: f64,
    /// The weather conditions at the requested location and time.
    #[serde(deserialize_with = "nullable")]
    pub currently: DataPoint,
    /// Minute-by-minute conditions for the next hour.
    #[serde(deserialize_with = "nullable")]
    pub minutely: DataBlock,
    /// Hour-by-hour conditions for the next two days.
    #[serde(deserialize_with = "nullable")]
    pub hourly: DataBlock,
    /// Day-by-day conditions for the next week.
    #[serde(deserialize_with = "nullable")]
    pub daily: DataBlock,
    /// Severe weather alerts pertinent to the requested location, in the order received.
    #[serde(deserialize_with = "nullable")]
    pub alerts: Vec<Alert>,
    /// Metadata about the sources behind this response.
    #[serde(deserialize_with = "nullable")]
    pub flags: Flags,
    /// The number of API calls made with this key today, taken from the
    /// `X-Forecast-API-Calls` response header once the body is decoded.
    #[serde(rename = "apicalls", deserialize_with = "nullable")]
    pub api_calls: i64,
    /// Error code the service may put in the body of a failed request.
    #[serde(deserialize_with = "nullable")]
    pub code: i64,
}

/// A data block describes the weather over a period of time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataBlock {
    /// A human-readable summary of this data block.
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    /// A machine-readable summary of this data block, drawn from the same set of values as
    /// [`DataPoint::icon`].
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    /// Data points ordered by time.
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<DataPoint>,
}

impl DataBlock {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// A single weather observation or prediction.
///
/// Each numeric property is the average of a weather phenomenon over the period the point
/// covers: an instant for `currently`, a minute for `minutely`, an hour for `hourly` and a
/// day for `daily`. Which properties are populated depends on that block. Time properties
/// are UNIX seconds.
///
/// A few properties keep the snake_case names this API has long been consumed with
/// (`sunrise_time`, `moon_phase`, `dew_point`, `temperature_min`, ...). Each property has
/// exactly one name on the wire, used both when decoding and when encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataPoint {
    /// The UNIX time at which this data point begins.
    #[serde(deserialize_with = "unix_seconds")]
    pub time: i64,
    /// A human-readable text summary of this data point.
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    /// A machine-readable text summary, suitable for selecting an icon for display: one of
    /// clear-day, clear-night, rain, snow, sleet, wind, fog, cloudy, partly-cloudy-day or
    /// partly-cloudy-night, though more may be added.
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(rename = "sunrise_time", deserialize_with = "unix_seconds")]
    pub sunrise_time: i64,
    #[serde(rename = "sunset_time", deserialize_with = "unix_seconds")]
    pub sunset_time: i64,
    /// The fractional part of the lunation number: 0 is a new moon, 0.25 a first quarter,
    /// 0.5 a full moon and 0.75 a last quarter.
    #[serde(rename = "moon_phase", deserialize_with = "nullable")]
    pub moon_phase: f64,
    /// Intensity of liquid precipitation per hour, assuming any occurs at all.
    #[serde(deserialize_with = "nullable")]
    pub precip_intensity: f64,
    #[serde(deserialize_with = "nullable")]
    pub precip_intensity_error: f64,
    #[serde(deserialize_with = "nullable")]
    pub precip_intensity_max: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub precip_intensity_max_time: i64,
    /// Between 0 and 1, inclusive.
    #[serde(deserialize_with = "nullable")]
    pub precip_probability: f64,
    /// "rain", "snow" or "sleet". Empty when `precip_intensity` is zero.
    #[serde(deserialize_with = "nullable")]
    pub precip_type: String,
    /// Snowfall accumulation. Zero when no snowfall is expected.
    #[serde(deserialize_with = "nullable")]
    pub precip_accumulation: f64,
    #[serde(deserialize_with = "nullable")]
    pub temperature: f64,
    /// The "feels like" temperature.
    #[serde(deserialize_with = "nullable")]
    pub apparent_temperature: f64,
    #[serde(deserialize_with = "nullable")]
    pub temperature_high: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub temperature_high_time: i64,
    #[serde(deserialize_with = "nullable")]
    pub temperature_low: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub temperature_low_time: i64,
    #[serde(deserialize_with = "nullable")]
    pub apparent_temperature_high: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub apparent_temperature_high_time: i64,
    #[serde(deserialize_with = "nullable")]
    pub apparent_temperature_low: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub apparent_temperature_low_time: i64,
    #[serde(rename = "temperature_min", deserialize_with = "nullable")]
    pub temperature_min: f64,
    #[serde(rename = "temperature_min_time", deserialize_with = "unix_seconds")]
    pub temperature_min_time: i64,
    #[serde(rename = "temperature_max", deserialize_with = "nullable")]
    pub temperature_max: f64,
    #[serde(rename = "temperature_max_time", deserialize_with = "unix_seconds")]
    pub temperature_max_time: i64,
    #[serde(deserialize_with = "nullable")]
    pub apparent_temperature_min: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub apparent_temperature_min_time: i64,
    #[serde(deserialize_with = "nullable")]
    pub apparent_temperature_max: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub apparent_temperature_max_time: i64,
    #[serde(rename = "dew_point", deserialize_with = "nullable")]
    pub dew_point: f64,
    /// Relative humidity, between 0 and 1, inclusive.
    #[serde(deserialize_with = "nullable")]
    pub humidity: f64,
    /// Sea-level air pressure in millibars.
    #[serde(deserialize_with = "nullable")]
    pub pressure: f64,
    #[serde(deserialize_with = "nullable")]
    pub wind_speed: f64,
    #[serde(deserialize_with = "nullable")]
    pub wind_gust: f64,
    #[serde(deserialize_with = "unix_seconds")]
    pub wind_gust_time: i64,
    /// The direction the wind is coming from in degrees, with true north at 0 and progressing
    /// clockwise.
    #[serde(deserialize_with = "nullable")]
    pub wind_bearing: f64,
    /// The percentage of sky occluded by clouds, between 0 and 1, inclusive.
    #[serde(deserialize_with = "nullable")]
    pub cloud_cover: f64,
    #[serde(deserialize_with = "nullable")]
    pub uv_index: i64,
    #[serde(deserialize_with = "unix_seconds")]
    pub uv_index_time: i64,
    /// Columnar density of total atmospheric ozone in Dobson units.
    #[serde(deserialize_with = "nullable")]
    pub ozone: f64,
    /// Average visibility, capped at 10 miles.
    #[serde(deserialize_with = "nullable")]
    pub visibility: f64,
    /// Only on `currently`.
    #[serde(deserialize_with = "nullable")]
    pub nearest_storm_distance: f64,
    /// Only on `currently`.
    #[serde(deserialize_with = "nullable")]
    pub nearest_storm_bearing: f64,
}

impl DataPoint {
    pub fn time(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }

    pub fn sunrise(&self) -> Option<OffsetDateTime> {
        unix_time(self.sunrise_time)
    }

    pub fn sunset(&self) -> Option<OffsetDateTime> {
        unix_time(self.sunset_time)
    }

    pub fn precip_intensity_max_at(&self) -> Option<OffsetDateTime> {
        unix_time(self.precip_intensity_max_time)
    }

    pub fn temperature_high_at(&self) -> Option<OffsetDateTime> {
        unix_time(self.temperature_high_time)
    }

    pub fn temperature_low_at(&self) -> Option<OffsetDateTime> {
        unix_time(self.temperature_low_time)
    }

    pub fn wind_gust_at(&self) -> Option<OffsetDateTime> {
        unix_time(self.wind_gust_time)
    }

    pub fn uv_index_at(&self) -> Option<OffsetDateTime> {
        unix_time(self.uv_index_time)
    }
}

/// A severe weather warning issued for the requested location by a governmental authority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    /// A brief description of the alert.
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// A detailed description of the alert.
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    /// An HTTP(S) URI with detailed information about the alert.
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    /// The UNIX time at which the alert was issued.
    #[serde(deserialize_with = "unix_seconds")]
    pub time: i64,
    /// The UNIX time at which the alert will expire.
    #[serde(deserialize_with = "unix_seconds")]
    pub expires: i64,
    /// "advisory", "watch" or "warning".
    #[serde(deserialize_with = "nullable")]
    pub severity: String,
    /// Names of the regions covered by this alert.
    #[serde(deserialize_with = "nullable")]
    pub regions: Vec<String>,
}

impl Alert {
    pub fn issued(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        unix_time(self.expires)
    }
}

/// Metadata describing which data sources contributed to a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Flags {
    /// Set when the location is supported but a temporary error made the data unavailable.
    #[serde(deserialize_with = "nullable")]
    pub darksky_unavailable: String,
    #[serde(deserialize_with = "nullable")]
    pub darksky_stations: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub datapoint_stations: Vec<String>,
    #[serde(rename = "isds-stations", deserialize_with = "nullable")]
    pub isd_stations: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub lamp_stations: Vec<String>,
    #[serde(rename = "metars-stations", deserialize_with = "nullable")]
    pub metar_stations: Vec<String>,
    #[serde(rename = "metnol-license", deserialize_with = "nullable")]
    pub metno_license: String,
    /// IDs of every data source used to service the request.
    #[serde(deserialize_with = "nullable")]
    pub sources: Vec<String>,
    /// The units the data in this response is reported in.
    #[serde(deserialize_with = "nullable")]
    pub units: String,
    /// Distance to the nearest contributing station, for debugging.
    #[serde(deserialize_with = "nullable")]
    pub nearest_station: f64,
}

impl Flags {
    /// The station lists reported by each named source, skipping sources with no stations.
    pub fn stations(&self) -> Vec<(&'static str, &[String])> {
        [
            ("darksky", &self.darksky_stations),
            ("datapoint", &self.datapoint_stations),
            ("isd", &self.isd_stations),
            ("lamp", &self.lamp_stations),
            ("metar", &self.metar_stations),
        ]
        .into_iter()
        .filter(|(_, stations)| !stations.is_empty())
        .map(|(source, stations)| (source, stations.as_slice()))
        .collect()
    }
}

/// Decodes `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// UNIX seconds, sent as an integer or a float. Fractional seconds are truncated.
fn unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Whole(i64),
        Fractional(f64),
    }

    Ok(match Option::<Seconds>::deserialize(deserializer)? {
        None => 0,
        Some(Seconds::Whole(secs)) => secs,
        Some(Seconds::Fractional(secs)) => secs as i64,
    })
}

/// Zero marks an absent timestamp.
fn unix_time(secs: i64) -> Option<OffsetDateTime> {
    if secs == 0 {
        None
    } else {
        OffsetDateTime::from_unix_timestamp(secs).ok()
    }
}
