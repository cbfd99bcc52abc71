use super::prelude::*;

/// Promotes the reviewed staging cache to production.
///
/// The staging cache is loaded first so that a structurally invalid
/// or empty file is rejected before anything becomes visible to the
/// runtime application. Returns the number of promoted entries.
pub fn promote_staging_cache<R: CacheRepo>(repo: &R) -> Result<usize> {
    let staging = repo.load_staging()?;
    if staging.is_empty() {
        return Err(Error::EmptyStaging);
    }
    log::info!(
        "Promoting staging cache: {} entries ({} resolved, {} failed)",
        staging.len(),
        staging.resolved_count(),
        staging.failed_count()
    );
    repo.promote_staging()?;
    Ok(staging.len())
}
