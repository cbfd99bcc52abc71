use std::{thread, time::Duration};

use thiserror::Error;

use crate::entities::{cache::ResolvedCoordinate, location::LocationName};

#[derive(Debug, Error)]
pub enum Error {
    #[error("The name did not match any location")]
    NoMatch,
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

pub trait GeoCodingGateway {
    /// Performs exactly one upstream lookup.
    fn resolve_name_lat_lng(&self, name: &LocationName) -> Result<ResolvedCoordinate, Error>;
}

/// Wraps a gateway with a mandatory pause after every call.
///
/// The pause happens regardless of the outcome, so no two upstream
/// calls are ever issued within the configured interval. Required by
/// the usage policy of public geocoding services.
#[derive(Debug)]
pub struct Throttled<G> {
    gateway: G,
    min_delay: Duration,
}

impl<G> Throttled<G> {
    pub fn new(gateway: G, min_delay: Duration) -> Self {
        Self { gateway, min_delay }
    }
}

impl<G: GeoCodingGateway> GeoCodingGateway for Throttled<G> {
    fn resolve_name_lat_lng(&self, name: &LocationName) -> Result<ResolvedCoordinate, Error> {
        let res = self.gateway.resolve_name_lat_lng(name);
        thread::sleep(self.min_delay);
        res
    }
}
