// src/location/tiles.rs

/// Slippy-map tile index for a coordinate at the given zoom level.
/// x = floor((lon+180)/360 * 2^z), y = floor((1 - asinh(tan(lat))/π)/2 * 2^z)
pub fn tile_for(lat: f64, lon: f64, zoom: u32) -> (u32, u32) {
    let n = f64::from(1u32 << zoom);
    let x = ((lon + 180.0) / 360.0 * n).floor() as u32;
    let y = ((1.0 - lat.to_radians().tan().asinh() / std::f64::consts::PI) / 2.0 * n).floor()
        as u32;
    (x, y)
}
