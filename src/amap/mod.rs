// AMap REST API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::AmapClient;

use serde::Serialize;

pub const GEOCODE_PATH: &str = "/geocode/geo";
pub const WEATHER_PATH: &str = "/weather/weatherInfo";

/// Query string for `geocode/geo`.
#[derive(Debug, Serialize)]
pub struct GeocodeParams<'a> {
    pub address: &'a str,
    pub city: &'a str,
    pub output: &'static str,
    pub key: &'a str,
}

/// Query string for `weather/weatherInfo`. `extensions=base` selects live
/// conditions rather than the forecast.
#[derive(Debug, Serialize)]
pub struct WeatherParams<'a> {
    pub city: &'a str,
    pub key: &'a str,
    pub output: &'static str,
    pub extensions: &'static str,
}

impl<'a> GeocodeParams<'a> {
    pub fn new(address: &'a str, city: &'a str, key: &'a str) -> Self {
        Self {
            address,
            city,
            output: "json",
            key,
        }
    }
}

impl<'a> WeatherParams<'a> {
    pub fn new(city: &'a str, key: &'a str) -> Self {
        Self {
            city,
            key,
            output: "json",
            extensions: "base",
        }
    }
}
