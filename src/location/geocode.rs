// src/location/geocode.rs

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::scraper::ScrapeError;

const GSI_SEARCH_URL: &str = "https://msearch.gsi.go.jp/address-search/AddressSearch";

/// Free-text address to coordinates. Behind a trait so the resolver can be
/// exercised without the network.
pub trait Geocoder {
    /// (latitude, longitude), or None when the address is not found. A
    /// transport failure also degrades to None; geocoding is best-effort.
    fn geocode(&self, address: &str) -> Option<(f64, f64)>;
}

/// Geocoder backed by the GSI address-search API.
pub struct GsiGeocoder {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GsiFeature {
    geometry: GsiGeometry,
}

#[derive(Debug, Deserialize)]
struct GsiGeometry {
    /// GeoJSON order: [longitude, latitude].
    coordinates: Vec<f64>,
}

impl GsiGeocoder {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    fn lookup(&self, address: &str) -> Result<Option<(f64, f64)>, ScrapeError> {
        let resp = self
            .client
            .get(GSI_SEARCH_URL)
            .query(&[("q", address)])
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ScrapeError::Network(format!(
                "geocoder HTTP {}",
                resp.status()
            )));
        }

        let features: Vec<GsiFeature> = resp
            .json()
            .map_err(|e| ScrapeError::JsonParse(e.to_string()))?;

        Ok(features.first().and_then(|f| {
            match f.geometry.coordinates.as_slice() {
                [lon, lat, ..] => Some((*lat, *lon)),
                _ => None,
            }
        }))
    }
}

impl Geocoder for GsiGeocoder {
    fn geocode(&self, address: &str) -> Option<(f64, f64)> {
        match self.lookup(address) {
            Ok(coords) => coords,
            Err(e) => {
                eprintln!("Warning: geocoding \"{address}\" failed: {e}");
                None
            }
        }
    }
}
