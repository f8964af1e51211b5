// src/location/resolver.rs
//
// Canonical (prefecture, city) resolution. Three strategies in fixed
// precedence, first success wins:
//   1. the numeric code triplet in the listing URL (authoritative: the site
//      assigns it, so it is never overridden by a best-effort geocode),
//   2. geocoding the free text and reading the nearest land-price point,
//   3. scanning the free text itself.
// The result is tagged with the strategy that fired so callers (and tests)
// can tell them apart.

use regex::Regex;

use crate::landprice::{LandPriceApi, PricePoint};
use crate::location::codes;
use crate::location::geocode::Geocoder;

pub use crate::location::codes::SENTINEL;

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    FromCode { prefecture: String, city: String },
    FromGeocode { prefecture: String, city: String },
    FromAddress { prefecture: String, city: String },
    Unresolved,
}

impl ResolvedLocation {
    /// The (prefecture, city) pair; the sentinel pair when unresolved.
    pub fn pair(&self) -> (&str, &str) {
        match self {
            ResolvedLocation::FromCode { prefecture, city }
            | ResolvedLocation::FromGeocode { prefecture, city }
            | ResolvedLocation::FromAddress { prefecture, city } => (prefecture, city),
            ResolvedLocation::Unresolved => (SENTINEL, SENTINEL),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, ResolvedLocation::Unresolved)
    }
}

pub struct LocationResolver<'a> {
    geocoder: &'a dyn Geocoder,
    land_api: &'a LandPriceApi,
}

impl<'a> LocationResolver<'a> {
    pub fn new(geocoder: &'a dyn Geocoder, land_api: &'a LandPriceApi) -> Self {
        Self { geocoder, land_api }
    }

    pub fn resolve(&self, source_url: Option<&str>, address: Option<&str>) -> ResolvedLocation {
        if let Some(url) = source_url {
            let by_code = resolve_from_url(url);
            if by_code.is_resolved() {
                return by_code;
            }
        }

        match address.filter(|a| !a.trim().is_empty()) {
            Some(address) => {
                let point = self.nearest_price_point(address);
                resolve_record(address, point.as_ref())
            }
            None => ResolvedLocation::Unresolved,
        }
    }

    /// Geocode the address and pick the Euclidean-nearest land-price point.
    /// Best-effort: any failure along the way is None.
    pub fn nearest_price_point(&self, address: &str) -> Option<PricePoint> {
        let (lat, lon) = self.geocoder.geocode(address)?;
        self.land_api.nearest_point(lat, lon)
    }
}

/// Strategies 2 and 3 for a record whose nearest price point (if any) has
/// already been fetched.
pub fn resolve_record(address: &str, point: Option<&PricePoint>) -> ResolvedLocation {
    if let Some(point) = point {
        if let (Some(prefecture), Some(city)) = (&point.prefecture, &point.city) {
            return ResolvedLocation::FromGeocode {
                prefecture: prefecture.clone(),
                city: city.clone(),
            };
        }
    }
    resolve_from_address(address)
}

/// Strategy 1: decode the region/prefecture/city triplet embedded in the
/// listing URL and look the codes up in the static table. A code with no
/// table entry gives Unresolved (the sentinel pair), never a panic.
pub fn resolve_from_url(url: &str) -> ResolvedLocation {
    let re = Regex::new(r"/search/([0-9]+)/([0-9]+)/([0-9]+)").unwrap();
    let Some(caps) = re.captures(url) else {
        return ResolvedLocation::Unresolved;
    };
    let Ok(pref_code) = caps[2].parse::<u32>() else {
        return ResolvedLocation::Unresolved;
    };
    let Ok(full_city_code) = caps[3].parse::<u32>() else {
        return ResolvedLocation::Unresolved;
    };
    // The city segment is the 5-digit JIS code: prefecture * 1000 + city.
    let city_code = full_city_code % 1000;

    match (
        codes::prefecture_name(pref_code),
        codes::city_name(pref_code, city_code),
    ) {
        (Some(prefecture), Some(city)) => ResolvedLocation::FromCode {
            prefecture: prefecture.to_string(),
            city: city.to_string(),
        },
        _ => ResolvedLocation::Unresolved,
    }
}

/// Strategy 3: free-text scan. Prefecture names are tried longest first so
/// e.g. 神奈川県 is never shadowed by a shorter name; the city token is then
/// taken by a suffix-anchored regex bounded to a plausible length. A city
/// with no prefecture in the text is reverse-looked-up in the code table.
pub fn resolve_from_address(address: &str) -> ResolvedLocation {
    let mut prefecture: Option<&str> = None;
    let mut rest = address;

    for name in codes::prefectures_longest_first() {
        if let Some(pos) = address.find(name) {
            prefecture = Some(name);
            rest = &address[pos + name.len()..];
            break;
        }
    }

    let city_re = Regex::new(r"[^都道府県\s]{1,10}?[市区町村]").unwrap();
    let city = city_re.find(rest).map(|m| m.as_str().to_string());

    match (prefecture, city) {
        (Some(prefecture), Some(city)) => ResolvedLocation::FromAddress {
            prefecture: prefecture.to_string(),
            city,
        },
        (None, Some(city)) => {
            let prefecture = codes::prefecture_of_city(&city).unwrap_or(SENTINEL);
            ResolvedLocation::FromAddress {
                prefecture: prefecture.to_string(),
                city,
            }
        }
        (Some(prefecture), None) => ResolvedLocation::FromAddress {
            prefecture: prefecture.to_string(),
            city: SENTINEL.to_string(),
        },
        (None, None) => ResolvedLocation::Unresolved,
    }
}
