//! JSON file implementation of the geocode cache store.
//!
//! Two artifacts live side by side: the disposable staging file that
//! each pipeline run overwrites, and the production file the runtime
//! application reads at startup. All writes go through a temporary
//! file in the same directory followed by a rename, so a reader never
//! observes a half-written cache.

mod models;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::anyhow;

use geostage_core::{
    entities::cache::GeocodeCache,
    repositories::{CacheRepo, Error},
};

#[derive(Debug, Clone)]
pub struct GeocodeCacheFiles {
    staging: PathBuf,
    production: PathBuf,
}

impl GeocodeCacheFiles {
    pub fn new<S: Into<PathBuf>, P: Into<PathBuf>>(staging: S, production: P) -> Self {
        Self {
            staging: staging.into(),
            production: production.into(),
        }
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    pub fn production_path(&self) -> &Path {
        &self.production
    }
}

fn load_cache_file(path: &Path) -> Result<GeocodeCache, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("No cache file at {} => empty cache", path.display());
            return Ok(GeocodeCache::default());
        }
        Err(err) => return Err(err.into()),
    };
    let file: models::CacheFile = serde_json::from_str(&contents)
        .map_err(|err| anyhow!("Malformed cache file {}: {err}", path.display()))?;
    file.try_into()
}

fn write_cache_file(path: &Path, cache: &GeocodeCache) -> Result<(), Error> {
    let file = models::CacheFile::from(cache);
    let mut json = serde_json::to_string_pretty(&file)
        .map_err(|err| anyhow!("Could not serialize cache: {err}"))?;
    json.push('\n');
    let tmp_path = tmp_file_path(path);
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    log::debug!("Wrote {} cache entries to {}", cache.len(), path.display());
    Ok(())
}

fn tmp_file_path(path: &Path) -> PathBuf {
    let mut file_name = path.as_os_str().to_owned();
    file_name.push(".tmp");
    PathBuf::from(file_name)
}

impl CacheRepo for GeocodeCacheFiles {
    fn load_staging(&self) -> Result<GeocodeCache, Error> {
        load_cache_file(&self.staging)
    }

    fn save_staging(&self, cache: &GeocodeCache) -> Result<(), Error> {
        write_cache_file(&self.staging, cache)
    }

    fn load_production(&self) -> Result<GeocodeCache, Error> {
        load_cache_file(&self.production)
    }

    fn promote_staging(&self) -> Result<(), Error> {
        if !self.staging.is_file() {
            return Err(Error::MissingStaging);
        }
        // Atomic as long as both files live on the same filesystem.
        fs::rename(&self.staging, &self.production)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use geostage_core::entities::{
        cache::{CacheEntry, ResolvedCoordinate},
        geo::MapPoint,
        location::LocationName,
        time::Timestamp,
    };

    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("geostage-db-json-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn files_in(dir: &Path) -> GeocodeCacheFiles {
        GeocodeCacheFiles::new(
            dir.join("geocode_cache.staging.json"),
            dir.join("geocode_cache.json"),
        )
    }

    fn sample_cache() -> GeocodeCache {
        [
            (
                "Springfield".parse().unwrap(),
                CacheEntry::Resolved(ResolvedCoordinate {
                    pos: MapPoint::try_from_lat_lng_deg(39.78, -89.65).unwrap(),
                    display_name: Some("Springfield, Illinois".into()),
                    resolved_at: Timestamp::from_secs(1_700_000_000),
                }),
            ),
            ("Rivertown".parse().unwrap(), CacheEntry::Failed),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn save_and_reload_the_staging_cache() {
        let dir = test_dir("roundtrip");
        let repo = files_in(&dir);
        let cache = sample_cache();

        repo.save_staging(&cache).unwrap();

        assert_eq!(cache, repo.load_staging().unwrap());
        // No leftover temporary file.
        assert!(!tmp_file_path(repo.staging_path()).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failure_markers_are_serialized_as_null() {
        let dir = test_dir("null-marker");
        let repo = files_in(&dir);

        repo.save_staging(&sample_cache()).unwrap();

        let json = fs::read_to_string(repo.staging_path()).unwrap();
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert!(raw["Rivertown"].is_null());
        assert_eq!(39.78, raw["Springfield"]["lat"].as_f64().unwrap());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn a_missing_cache_file_loads_as_an_empty_cache() {
        let dir = test_dir("missing");
        let repo = files_in(&dir);

        assert!(repo.load_staging().unwrap().is_empty());
        assert!(repo.load_production().unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn a_truncated_cache_file_is_rejected() {
        let dir = test_dir("truncated");
        let repo = files_in(&dir);
        fs::write(repo.production_path(), "{\"Springfield\": {\"lat\": 39.7").unwrap();

        assert!(repo.load_production().is_err());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn out_of_range_coordinates_are_rejected_on_load() {
        let dir = test_dir("out-of-range");
        let repo = files_in(&dir);
        let json = r#"{"Atlantis": {"lat": 123.4, "lng": 5.6, "resolved_at": 0}}"#;
        fs::write(repo.production_path(), json).unwrap();

        let err = repo.load_production().unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate(name) if name == "Atlantis"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn promotion_replaces_production_completely() {
        let dir = test_dir("promote");
        let repo = files_in(&dir);
        let old_production: GeocodeCache =
            [("Oldtown".parse::<LocationName>().unwrap(), CacheEntry::Failed)]
                .into_iter()
                .collect();
        write_cache_file(repo.production_path(), &old_production).unwrap();
        let staging = sample_cache();
        repo.save_staging(&staging).unwrap();

        repo.promote_staging().unwrap();

        let production = repo.load_production().unwrap();
        assert_eq!(staging, production);
        assert!(production
            .get(&"Oldtown".parse::<LocationName>().unwrap())
            .is_none());
        // Promotion consumes the staging file.
        assert!(!repo.staging_path().exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn promotion_without_a_staging_file_is_rejected() {
        let dir = test_dir("promote-missing");
        let repo = files_in(&dir);

        assert!(matches!(
            repo.promote_staging().unwrap_err(),
            Error::MissingStaging
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
