// Low-level access to the persistent cache artifacts.
// The staging cache is owned by the pipeline and overwritten on
// every run. The production cache only ever changes on promotion.

use std::io;

use thiserror::Error;

use crate::entities::cache::GeocodeCache;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid coordinate for '{0}'")]
    InvalidCoordinate(String),
    #[error("There is no staging cache to promote")]
    MissingStaging,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait CacheRepo {
    /// A missing staging file is a valid state and loads as an
    /// empty cache.
    fn load_staging(&self) -> Result<GeocodeCache>;

    /// Writes the complete staging cache. Readers must never be
    /// able to observe a partially written file.
    fn save_staging(&self, cache: &GeocodeCache) -> Result<()>;

    /// A missing production file is a valid state and loads as an
    /// empty cache.
    fn load_production(&self) -> Result<GeocodeCache>;

    /// Atomically replaces the production cache with the staging
    /// cache. Full replacement, never a merge.
    fn promote_staging(&self) -> Result<()>;
}
