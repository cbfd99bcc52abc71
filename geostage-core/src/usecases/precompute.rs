use super::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrecomputeSummary {
    pub resolved: usize,
    pub failed: usize,
}

impl PrecomputeSummary {
    pub const fn total(self) -> usize {
        self.resolved + self.failed
    }
}

/// Resolves every distinct configured name and writes the outcome
/// to the staging cache.
///
/// Duplicate names collapse to a single lookup, first occurrence
/// wins. A failed lookup is recorded as an explicit failure marker
/// and does not abort the remaining lookups; only a failure to
/// persist the staging cache does.
pub fn precompute_geocode_cache<G, R>(
    gateway: &G,
    repo: &R,
    locations: &LocationList,
) -> Result<PrecomputeSummary>
where
    G: GeoCodingGateway,
    R: CacheRepo,
{
    if locations.is_empty() {
        return Err(Error::NoLocations);
    }
    let distinct = locations.dedup_names();
    let mut cache = GeocodeCache::default();
    let mut summary = PrecomputeSummary::default();
    for (nr, location) in distinct.iter().enumerate() {
        log::info!(
            "[{}/{}] Resolving {} hub \"{}\": {}",
            nr + 1,
            distinct.len(),
            location.group,
            location.label,
            location.name
        );
        let entry = match gateway.resolve_name_lat_lng(&location.name) {
            Ok(resolved) => {
                log::debug!(
                    "Resolved '{}' to {:?}",
                    location.name,
                    resolved.pos.to_lat_lng_deg()
                );
                summary.resolved += 1;
                CacheEntry::Resolved(resolved)
            }
            Err(err) => {
                log::warn!("Failed to resolve '{}': {}", location.name, err);
                summary.failed += 1;
                CacheEntry::Failed
            }
        };
        cache.insert(location.name.clone(), entry);
    }
    debug_assert_eq!(cache.len(), summary.total());
    repo.save_staging(&cache)?;
    Ok(summary)
}
