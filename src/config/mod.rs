use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Result};

use geostage_entities::location::{LocationEntry, LocationGroup, LocationList};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geostage.toml";

const DEFAULT_STAGING_FILE: &str = "geocode_cache.staging.json";
const DEFAULT_PRODUCTION_FILE: &str = "geocode_cache.json";
const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);

const ENV_NAME_CONTACT: &str = "NOMINATIM_EMAIL";

pub struct Config {
    pub geocoding: Geocoding,
    pub cache: Cache,
    pub locations: LocationList,
}

pub struct Geocoding {
    /// Contact e-mail required by the upstream usage policy.
    pub contact: Option<String>,
    pub endpoint: String,
    /// Minimum pause after each upstream call.
    pub min_delay: Duration,
}

pub struct Cache {
    pub staging_file: PathBuf,
    pub production_file: PathBuf,
}

impl Config {
    pub fn try_load_from_file_or_default(file_path: Option<&Path>) -> Result<Self> {
        let file_path = file_path.unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(contact) = env::var(ENV_NAME_CONTACT) {
            cfg.geocoding.contact = Some(contact);
        }
        Ok(cfg)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;

    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            cache,
            locations,
        } = from;

        let raw::Geocoding {
            contact,
            endpoint,
            min_delay,
        } = geocoding.unwrap_or_default();

        let geocoding = Geocoding {
            contact,
            endpoint: endpoint
                .unwrap_or_else(|| geostage_gateways::nominatim::DEFAULT_ENDPOINT.to_string()),
            min_delay: min_delay.unwrap_or(DEFAULT_MIN_DELAY),
        };

        let raw::Cache {
            staging_file,
            production_file,
        } = cache.unwrap_or_default();

        let cache = Cache {
            staging_file: staging_file.unwrap_or_else(|| DEFAULT_STAGING_FILE.into()),
            production_file: production_file.unwrap_or_else(|| DEFAULT_PRODUCTION_FILE.into()),
        };

        let raw::Locations { cities, micro_hubs } = locations.unwrap_or_default();

        let mut entries = Vec::with_capacity(cities.len() + micro_hubs.len());
        for (group, raw_locations) in [
            (LocationGroup::City, cities),
            (LocationGroup::MicroHub, micro_hubs),
        ] {
            for raw::Location { label, address } in raw_locations {
                let name = address
                    .parse()
                    .map_err(|err| anyhow!("Invalid address for \"{label}\": {err}"))?;
                entries.push(LocationEntry { name, label, group });
            }
        }
        let locations = LocationList::from(entries);
        if locations.is_empty() {
            return Err(anyhow!("No locations defined"));
        }

        Ok(Self {
            geocoding,
            cache,
            locations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_configuration() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert_eq!(110, cfg.locations.len());
        assert_eq!(Duration::from_secs(1), cfg.geocoding.min_delay);
        assert_eq!(
            Path::new(DEFAULT_STAGING_FILE),
            cfg.cache.staging_file.as_path()
        );
        assert_eq!(
            Path::new(DEFAULT_PRODUCTION_FILE),
            cfg.cache.production_file.as_path()
        );
        // The public Nominatim instance requires an explicit contact.
        assert!(cfg.geocoding.contact.is_none());
    }

    #[test]
    fn load_custom_configuration() {
        let cfg_toml = r#"
            [geocoding]
            contact = "ops@example.com"
            min-delay = "250ms"

            [cache]
            staging-file = "/tmp/stage.json"

            [[locations.cities]]
            label = "Springfield"
            address = "Springfield, USA"

            [[locations.micro-hubs]]
            label = "Rivertown"
            address = "Rivertown, USA"
        "#;
        let raw_config: raw::Config = toml::from_str(cfg_toml).unwrap();
        let cfg = Config::try_from(raw_config).unwrap();
        assert_eq!(Some("ops@example.com".to_string()), cfg.geocoding.contact);
        assert_eq!(Duration::from_millis(250), cfg.geocoding.min_delay);
        assert_eq!(Path::new("/tmp/stage.json"), cfg.cache.staging_file.as_path());
        assert_eq!(
            Path::new(DEFAULT_PRODUCTION_FILE),
            cfg.cache.production_file.as_path()
        );
        assert_eq!(2, cfg.locations.len());
        let groups: Vec<_> = cfg.locations.iter().map(|l| l.group).collect();
        assert_eq!(vec![LocationGroup::City, LocationGroup::MicroHub], groups);
    }

    #[test]
    fn reject_a_blank_address() {
        let cfg_toml = r#"
            [[locations.cities]]
            label = "Nowhere"
            address = "  "
        "#;
        let raw_config: raw::Config = toml::from_str(cfg_toml).unwrap();
        assert!(Config::try_from(raw_config).is_err());
    }
}
