use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use geostage_core::{
    entities::{cache::ResolvedCoordinate, geo::MapPoint, location::LocationName, time::Timestamp},
    gateways::geocode::{self, GeoCodingGateway},
};

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A forward geocoder backed by the Nominatim HTTP API.
///
/// The usage policy of the public instance requires a valid contact
/// address in the `User-Agent` header, so construction fails without
/// one. Callers are responsible for pacing their requests, see
/// `Throttled`.
#[derive(Debug, Clone)]
pub struct Nominatim {
    endpoint: String,
    user_agent: String,
    client: reqwest::blocking::Client,
}

impl Nominatim {
    pub fn new(contact_email: &str) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, contact_email)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, contact_email: &str) -> Result<Self> {
        let contact_email = contact_email.trim();
        if contact_email.is_empty() {
            return Err(anyhow!(
                "Missing contact e-mail required by the Nominatim usage policy"
            ));
        }
        let user_agent = format!(
            "geostage/{} (contact: {contact_email})",
            env!("CARGO_PKG_VERSION")
        );
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            user_agent,
            client,
        })
    }
}

// Nominatim returns coordinates as JSON strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl SearchHit {
    fn try_into_resolved(self) -> Result<ResolvedCoordinate> {
        let lat: f64 = self.lat.parse()?;
        let lng: f64 = self.lon.parse()?;
        let pos = MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or_else(|| anyhow!("Coordinate ({lat}, {lng}) is out of range"))?;
        Ok(ResolvedCoordinate {
            pos,
            display_name: self.display_name,
            resolved_at: Timestamp::now(),
        })
    }
}

impl GeoCodingGateway for Nominatim {
    fn resolve_name_lat_lng(
        &self,
        name: &LocationName,
    ) -> Result<ResolvedCoordinate, geocode::Error> {
        let response = self
            .client
            .get(self.endpoint.as_str())
            .query(&[
                ("q", name.as_str()),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "0"),
            ])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .map_err(|err| geocode::Error::Unavailable(err.into()))?;
        if !response.status().is_success() {
            return Err(geocode::Error::Unavailable(anyhow!(
                "Nominatim responded with status {}",
                response.status()
            )));
        }
        let hits: Vec<SearchHit> = response
            .json()
            .map_err(|err| geocode::Error::Unavailable(err.into()))?;
        let Some(hit) = hits.into_iter().next() else {
            return Err(geocode::Error::NoMatch);
        };
        let resolved = hit
            .try_into_resolved()
            .map_err(geocode::Error::Unavailable)?;
        log::debug!(
            "Resolved location '{}': {:?}",
            name,
            resolved.pos.to_lat_lng_deg()
        );
        Ok(resolved)
    }
}
