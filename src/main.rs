#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod config;
#[macro_use]
mod timed;

use crate::config::{Config, Overrides};

use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;
use forecast_client::{ForecastClient, ForecastResponse, NOW, Units};
use time::UtcOffset;
use time::macros::format_description;

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::process;

fn main() {
    let env = Env::default().filter_or("FORECAST_LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let matches = cli().get_matches();
    if let Err(err) = run(&matches) {
        error!("{err}");
        process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("forecast")
        .version("0.1")
        .author("Chris Lieb")
        .about("Fetch a forecast from the forecast.io API")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("JSON file with api_key, latitude, longitude and units"),
        )
        .arg(Arg::new("key").short('k').long("key").help("API key"))
        .arg(
            Arg::new("lat")
                .long("lat")
                .allow_hyphen_values(true)
                .help("Latitude"),
        )
        .arg(
            Arg::new("long")
                .long("long")
                .allow_hyphen_values(true)
                .help("Longitude"),
        )
        .arg(
            Arg::new("time")
                .short('t')
                .long("time")
                .default_value(NOW)
                .help("UNIX time or [YYYY]-[MM]-[DD]T[HH]:[MM]:[SS], or \"now\""),
        )
        .arg(
            Arg::new("units")
                .short('u')
                .long("units")
                .value_parser(clap::value_parser!(Units))
                .help("One of ca, si, us, uk, auto"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the decoded forecast as JSON"),
        )
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::default(),
    };
    let settings = config.resolve(Overrides {
        api_key: matches.get_one::<String>("key").cloned(),
        latitude: matches.get_one::<String>("lat").cloned(),
        longitude: matches.get_one::<String>("long").cloned(),
        time: matches.get_one::<String>("time").cloned(),
        units: matches.get_one::<Units>("units").copied(),
    })?;

    let client = ForecastClient::new(settings.api_key)?;
    let forecast = timed!(
        format!(
            "Fetching forecast for {},{}",
            settings.latitude, settings.longitude
        ),
        (|| client.get(
            &settings.latitude,
            &settings.longitude,
            &settings.time,
            settings.units
        ))
    )?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        print!("{}", Summary(&forecast));
    }
    Ok(())
}

/// A short human-readable rendition of a forecast
struct Summary<'a>(&'a ForecastResponse);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forecast = self.0;
        let now = &forecast.currently;

        writeln!(
            f,
            "{},{} ({})",
            forecast.latitude, forecast.longitude, forecast.timezone
        )?;
        if forecast.code != 0 {
            writeln!(f, "API returned error code {}", forecast.code)?;
        }
        if !now.summary.is_empty() {
            writeln!(f, "Now:   {}", now.summary)?;
        }
        writeln!(
            f,
            "Temp:  {:.1} (feels like {:.1}), humidity {:.0}%, wind {:.1}",
            now.temperature,
            now.apparent_temperature,
            now.humidity * 100.0,
            now.wind_speed
        )?;
        if !forecast.daily.summary.is_empty() {
            writeln!(f, "Week:  {}", forecast.daily.summary)?;
        }
        for alert in &forecast.alerts {
            let expires = alert
                .expires_at()
                .and_then(|at| {
                    at.to_offset(utc_offset(forecast.offset))
                        .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
                        .ok()
                })
                .unwrap_or_else(|| "unknown".to_string());
            writeln!(f, "Alert: {} (until {expires})", alert.title)?;
        }
        if !forecast.flags.units.is_empty() {
            writeln!(f, "Units: {}", forecast.flags.units)?;
        }
        writeln!(f, "API calls today: {}", forecast.api_calls)
    }
}

/// `offset` is in hours and may be fractional
fn utc_offset(hours: f64) -> UtcOffset {
    UtcOffset::from_whole_seconds((hours * 3600.0).round() as i32).unwrap_or(UtcOffset::UTC)
}
