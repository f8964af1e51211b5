mod codes;
mod geocode;
mod resolver;
mod tiles;

pub use geocode::GsiGeocoder;
pub use resolver::{resolve_from_url, resolve_record, LocationResolver, ResolvedLocation};
pub use tiles::tile_for;

#[cfg(test)]
pub use codes::SENTINEL;
#[cfg(test)]
pub use geocode::Geocoder;
