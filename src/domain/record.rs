// src/domain/record.rs

/// One scraped listing, flattened and normalized. Amounts are man-yen (万円),
/// areas m², unit prices 万円/m². `None` is the "unavailable" sentinel: past
/// the parser boundary a field is either a well-formed number or `None`,
/// never a half-parsed string. Immutable once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub location: String,
    pub total_amount: Option<f64>,
    pub building_amount: Option<f64>,
    pub building_area: Option<f64>,
    pub building_unit_price: Option<f64>,
    pub land_amount: Option<f64>,
    pub land_area: Option<f64>,
    pub land_unit_price: Option<f64>,
    pub maker: Option<String>,
    /// Reference land price from the point-data API, 万円/m².
    pub reference_land_price: Option<f64>,
    /// building_unit_price / reference_land_price.
    pub reference_ratio: Option<f64>,
}

/// Placeholder used when no location could be extracted from the item.
pub const UNKNOWN_LOCATION: &str = "不明";

impl PropertyRecord {
    /// True when the item yielded anything worth keeping: either a resolved
    /// location or at least one price.
    pub fn has_data(&self) -> bool {
        self.location != UNKNOWN_LOCATION
            || self.total_amount.is_some()
            || self.building_amount.is_some()
            || self.land_amount.is_some()
    }
}
