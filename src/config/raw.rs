use std::{path::PathBuf, time::Duration};

use duration_str::deserialize_option_duration;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("geostage.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub geocoding: Option<Geocoding>,
    pub cache: Option<Cache>,
    pub locations: Option<Locations>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub contact: Option<String>,
    pub endpoint: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub min_delay: Option<Duration>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cache {
    pub staging_file: Option<PathBuf>,
    pub production_file: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Locations {
    #[serde(default)]
    pub cities: Vec<Location>,
    #[serde(default)]
    pub micro_hubs: Vec<Location>,
}

impl Default for Locations {
    fn default() -> Self {
        Config::default().locations.expect("Locations configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Location {
    pub label: String,
    pub address: String,
}
