use anyhow::{anyhow, Result};

use geostage_core::gateways::geocode::Throttled;
use geostage_gateways::Nominatim;

use crate::config;

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<Throttled<Nominatim>> {
    let contact = cfg.contact.as_deref().ok_or_else(|| {
        anyhow!("Missing contact e-mail: set NOMINATIM_EMAIL or `geocoding.contact`")
    })?;
    let gateway = Nominatim::with_endpoint(cfg.endpoint.clone(), contact)?;
    log::info!(
        "Use Nominatim gateway ({}, min. delay {:?})",
        cfg.endpoint,
        cfg.min_delay
    );
    Ok(Throttled::new(gateway, cfg.min_delay))
}
