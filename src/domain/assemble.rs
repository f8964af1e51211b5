// src/domain/assemble.rs

use crate::domain::record::{PropertyRecord, UNKNOWN_LOCATION};
use crate::extract::RawFields;
use crate::parse::{parse_area, parse_man_amount, round2, unit_price};

/// Relative deviation of the scraped total from building+land above which
/// the total is considered mis-extracted and replaced by the sum.
const TOTAL_DEVIATION_LIMIT: f64 = 0.10;

/// Build a finished record from raw fragments. Never fails: a fragment that
/// does not parse degrades that one field to unavailable.
pub fn assemble_record(fields: &RawFields) -> PropertyRecord {
    let building_amount = parse_amount_fragment(fields.building_price.as_deref());
    let land_amount = parse_amount_fragment(fields.land_price.as_deref());
    let building_area = parse_area_fragment(fields.building_area.as_deref());
    let land_area = parse_area_fragment(fields.land_area.as_deref());

    let total_amount = reconcile_total(
        parse_amount_fragment(fields.total_price.as_deref()),
        building_amount,
        land_amount,
    );

    PropertyRecord {
        location: fields
            .location
            .clone()
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        total_amount,
        building_amount,
        building_area,
        building_unit_price: unit_price(building_amount, building_area),
        land_amount,
        land_area,
        land_unit_price: unit_price(land_amount, land_area),
        maker: fields.maker.clone(),
        reference_land_price: None,
        reference_ratio: None,
    }
}

/// Total-price consistency policy:
/// - total missing, building and land present -> total = building + land
/// - all three present and the total deviates from building+land by more
///   than 10% -> the sum is trusted over the scraped total
fn reconcile_total(
    total: Option<f64>,
    building: Option<f64>,
    land: Option<f64>,
) -> Option<f64> {
    let (Some(building), Some(land)) = (building, land) else {
        return total;
    };
    let sum = building + land;

    match total {
        None => Some(sum),
        Some(t) if sum > 0.0 && ((t - sum).abs() / sum) > TOTAL_DEVIATION_LIMIT => {
            eprintln!(
                "Warning: total {t}万円 deviates from building+land {sum}万円, using the sum"
            );
            Some(round2(sum))
        }
        Some(t) => Some(t),
    }
}

fn parse_amount_fragment(fragment: Option<&str>) -> Option<f64> {
    let fragment = fragment?;
    match parse_man_amount(fragment) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Warning: dropping price fragment: {e}");
            None
        }
    }
}

fn parse_area_fragment(fragment: Option<&str>) -> Option<f64> {
    let fragment = fragment?;
    match parse_area(fragment) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Warning: dropping area fragment: {e}");
            None
        }
    }
}
