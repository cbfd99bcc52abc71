use std::collections::BTreeMap;

use crate::{geo::MapPoint, location::LocationName, time::Timestamp};

/// A successful geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCoordinate {
    pub pos: MapPoint,
    /// Display name as returned by the provider.
    pub display_name: Option<String>,
    pub resolved_at: Timestamp,
}

/// Per-name resolution outcome.
///
/// Failures are recorded explicitly so that the runtime application
/// can distinguish "never resolved" from "resolution failed".
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Resolved(ResolvedCoordinate),
    Failed,
}

impl CacheEntry {
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// The complete resolution outcome of one pipeline run.
///
/// Backed by a `BTreeMap` so that the serialized cache file has a
/// deterministic, diffable order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GeocodeCache(BTreeMap<LocationName, CacheEntry>);

impl GeocodeCache {
    pub fn insert(&mut self, name: LocationName, entry: CacheEntry) -> Option<CacheEntry> {
        self.0.insert(name, entry)
    }

    pub fn get(&self, name: &LocationName) -> Option<&CacheEntry> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&LocationName, &CacheEntry)> {
        self.0.iter()
    }

    pub fn resolved_count(&self) -> usize {
        self.0.values().filter(|e| e.is_resolved()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.0.len() - self.resolved_count()
    }
}

impl FromIterator<(LocationName, CacheEntry)> for GeocodeCache {
    fn from_iter<I: IntoIterator<Item = (LocationName, CacheEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
