// Serializable models of the on-disk cache format, kept separate
// from the domain entities.
//
// The file is a single JSON object keyed by location name. A
// resolved entry carries the coordinate and resolution metadata,
// a failed resolution is recorded as `null`.

use std::collections::BTreeMap;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use geostage_core::{
    entities::{
        cache::{CacheEntry, GeocodeCache, ResolvedCoordinate},
        geo::MapPoint,
        location::LocationName,
        time::Timestamp,
    },
    repositories::Error,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CacheFile(pub(crate) BTreeMap<String, Option<EntryModel>>);

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EntryModel {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) display_name: Option<String>,
    pub(crate) resolved_at: i64,
}

impl From<&GeocodeCache> for CacheFile {
    fn from(cache: &GeocodeCache) -> Self {
        let entries = cache
            .entries()
            .map(|(name, entry)| {
                let model = match entry {
                    CacheEntry::Resolved(resolved) => {
                        let (lat, lng) = resolved.pos.to_lat_lng_deg();
                        Some(EntryModel {
                            lat,
                            lng,
                            display_name: resolved.display_name.clone(),
                            resolved_at: resolved.resolved_at.as_secs(),
                        })
                    }
                    CacheEntry::Failed => None,
                };
                (name.to_string(), model)
            })
            .collect();
        Self(entries)
    }
}

impl TryFrom<CacheFile> for GeocodeCache {
    type Error = Error;

    fn try_from(file: CacheFile) -> Result<Self, Self::Error> {
        file.0
            .into_iter()
            .map(|(name, model)| {
                let key: LocationName = name
                    .parse()
                    .map_err(|_| Error::Other(anyhow!("Empty location name in cache file")))?;
                let entry = match model {
                    Some(model) => {
                        let pos = MapPoint::try_from_lat_lng_deg(model.lat, model.lng)
                            .ok_or_else(|| Error::InvalidCoordinate(name.clone()))?;
                        CacheEntry::Resolved(ResolvedCoordinate {
                            pos,
                            display_name: model.display_name,
                            resolved_at: Timestamp::from_secs(model.resolved_at),
                        })
                    }
                    None => CacheEntry::Failed,
                };
                Ok((key, entry))
            })
            .collect()
    }
}
