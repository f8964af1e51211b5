// src/landprice/api.rs
//
// Client for the reinfolib land-price point API (XPT002). Prices arrive as
// raw yen per m² and are converted to man-yen per m². A missing API key is
// not an error: every lookup just returns nothing.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::location::tile_for;
use crate::parse::parse_yen_amount;
use crate::scraper::ScrapeError;

const POINT_API_URL: &str = "https://www.reinfolib.mlit.go.jp/ex-api/external/XPT002";
const API_KEY_VAR: &str = "REINFOLIB_API_KEY";

/// Zoom level the point API is queried at.
pub const POINT_ZOOM: u32 = 13;
/// Survey year for land-price points.
pub const PRICE_YEAR: &str = "2024";

// The GeoJSON property names have shifted between API revisions; try the
// current names first, the legacy ones after.
const PRICE_KEYS: &[&str] = &["u_current_years_price_ja", "current_years_price_ja", "price"];
const PREF_KEYS: &[&str] = &["prefecture_name_ja", "prefecture"];
const CITY_KEYS: &[&str] = &["city_name_ja", "city_name", "city"];

/// One land-price survey point, flattened from a GeoJSON feature.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub lat: f64,
    pub lon: f64,
    pub prefecture: Option<String>,
    pub city: Option<String>,
    /// Current-year reference price, 万円/m².
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Value,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: [longitude, latitude].
    coordinates: Vec<f64>,
}

pub struct LandPriceApi {
    client: Client,
    api_key: Option<String>,
}

impl LandPriceApi {
    pub fn new(api_key: Option<String>) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;
        Ok(Self { client, api_key })
    }

    /// API key from the environment; absence degrades every lookup to empty.
    pub fn from_env() -> Result<Self, ScrapeError> {
        Self::new(std::env::var(API_KEY_VAR).ok())
    }

    /// All survey points inside one tile. Ok(empty) without an API key.
    pub fn lookup_tile(&self, zoom: u32, x: u32, y: u32) -> Result<Vec<PricePoint>, ScrapeError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let (z, x, y) = (zoom.to_string(), x.to_string(), y.to_string());
        let resp = self
            .client
            .get(POINT_API_URL)
            .header("Ocp-Apim-Subscription-Key", api_key)
            .query(&[
                ("response_format", "geojson"),
                ("z", z.as_str()),
                ("x", x.as_str()),
                ("y", y.as_str()),
                ("year", PRICE_YEAR),
            ])
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ScrapeError::Network(format!(
                "point API HTTP {}",
                resp.status()
            )));
        }

        let collection: FeatureCollection = resp
            .json()
            .map_err(|e| ScrapeError::JsonParse(e.to_string()))?;

        Ok(collection
            .features
            .into_iter()
            .filter_map(|f| flatten_feature(&f))
            .collect())
    }

    /// The survey point nearest the coordinate, by Euclidean distance in
    /// lat/lon space. Fetch failures degrade to None; this path is strictly
    /// best-effort.
    pub fn nearest_point(&self, lat: f64, lon: f64) -> Option<PricePoint> {
        let (x, y) = tile_for(lat, lon, POINT_ZOOM);
        let points = match self.lookup_tile(POINT_ZOOM, x, y) {
            Ok(points) => points,
            Err(e) => {
                eprintln!("Warning: land price lookup failed: {e}");
                return None;
            }
        };
        nearest(&points, lat, lon).cloned()
    }
}

pub fn nearest<'a>(points: &'a [PricePoint], lat: f64, lon: f64) -> Option<&'a PricePoint> {
    points.iter().min_by(|a, b| {
        let da = sq_distance(a, lat, lon);
        let db = sq_distance(b, lat, lon);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn sq_distance(p: &PricePoint, lat: f64, lon: f64) -> f64 {
    (p.lat - lat).powi(2) + (p.lon - lon).powi(2)
}

fn flatten_feature(feature: &Feature) -> Option<PricePoint> {
    let [lon, lat, ..] = feature.geometry.coordinates.as_slice() else {
        return None;
    };
    Some(PricePoint {
        lat: *lat,
        lon: *lon,
        prefecture: property_string(&feature.properties, PREF_KEYS),
        city: property_string(&feature.properties, CITY_KEYS),
        price: property_price(&feature.properties, PRICE_KEYS),
    })
}

fn property_string(properties: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        properties
            .get(k)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn property_price(properties: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        match properties.get(key) {
            // Price strings like "300,000(円/m²)": first number, yen -> man-yen.
            Some(Value::String(s)) => match parse_yen_amount(s) {
                Ok(Some(price)) => return Some(price),
                Ok(None) => continue,
                Err(_) => continue,
            },
            Some(Value::Number(n)) => {
                if let Some(yen) = n.as_f64() {
                    return Some(yen / 10000.0);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64, city: &str) -> PricePoint {
        PricePoint {
            lat,
            lon,
            prefecture: Some("千葉県".to_string()),
            city: Some(city.to_string()),
            price: Some(12.5),
        }
    }

    #[test]
    fn nearest_minimizes_euclidean_distance() {
        let points = vec![
            point(35.80, 139.95, "松戸市"),
            point(35.78, 139.90, "市川市"),
            point(35.87, 139.97, "柏市"),
        ];
        let best = nearest(&points, 35.787, 139.902).unwrap();
        assert_eq!(best.city.as_deref(), Some("市川市"));
    }

    #[test]
    fn nearest_of_empty_is_none() {
        assert!(nearest(&[], 35.0, 139.0).is_none());
    }

    #[test]
    fn feature_price_string_is_parsed_to_man_yen() {
        let json = serde_json::json!({
            "geometry": { "coordinates": [139.9026, 35.7873] },
            "properties": {
                "u_current_years_price_ja": "300,000(円/m²)",
                "prefecture_name_ja": "千葉県",
                "city_name_ja": "松戸市"
            }
        });
        let feature: Feature = serde_json::from_value(json).unwrap();
        let p = flatten_feature(&feature).unwrap();
        assert_eq!(p.price, Some(30.0));
        assert_eq!(p.prefecture.as_deref(), Some("千葉県"));
        assert_eq!(p.city.as_deref(), Some("松戸市"));
        assert_eq!((p.lat, p.lon), (35.7873, 139.9026));
    }

    #[test]
    fn numeric_price_is_converted_from_yen() {
        let json = serde_json::json!({
            "geometry": { "coordinates": [139.9, 35.8] },
            "properties": { "price": 125000 }
        });
        let feature: Feature = serde_json::from_value(json).unwrap();
        assert_eq!(flatten_feature(&feature).unwrap().price, Some(12.5));
    }

    #[test]
    fn missing_api_key_yields_empty_not_error() {
        let api = LandPriceApi::new(None).unwrap();
        assert!(api.lookup_tile(13, 7276, 3225).unwrap().is_empty());
        assert!(api.nearest_point(35.68, 139.76).is_none());
    }
}
