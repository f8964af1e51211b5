// parse.rs
//
// Text-fragment parsing shared by the extractor and the land-price client.
// Amounts come back in man-yen (万円), areas in m². A field that reads "-"
// on the page is unavailable, not zero.

use regex::Regex;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// No amount pattern and no bare number in the fragment.
    NoAmount(String),
    /// A matched number failed float conversion.
    BadNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoAmount(frag) => write!(f, "no amount in fragment: {frag:?}"),
            ParseError::BadNumber(frag) => write!(f, "bad number in fragment: {frag:?}"),
        }
    }
}

impl std::error::Error for ParseError {}

const PLACEHOLDER: &str = "-";

fn strip_separators(text: &str) -> String {
    text.replace(',', "").replace('，', "").trim().to_string()
}

/// Parse a price fragment into man-yen (万円).
///
/// Priority order, first match wins:
/// 1. "N1億N2万円" -> N1 * 10000 + N2   (e.g. "1億2,000万円" -> 12000)
/// 2. "N億円"      -> N * 10000
/// 3. "N万円"      -> N
/// 4. first bare number, taken as already being man-yen
///
/// Ok(None) for the "-" placeholder, Err(ParseError) when nothing matches.
pub fn parse_man_amount(text: &str) -> Result<Option<f64>, ParseError> {
    let cleaned = strip_separators(text);
    if cleaned.is_empty() || cleaned == PLACEHOLDER {
        return Ok(None);
    }

    let oku_man = Regex::new(r"([0-9]+)億([0-9]+(?:\.[0-9]+)?)\s*万円").unwrap();
    if let Some(caps) = oku_man.captures(&cleaned) {
        let oku = parse_f64(&caps[1], text)?;
        let man = parse_f64(&caps[2], text)?;
        return Ok(Some(oku * 10000.0 + man));
    }

    let oku = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*億円").unwrap();
    if let Some(caps) = oku.captures(&cleaned) {
        return Ok(Some(parse_f64(&caps[1], text)? * 10000.0));
    }

    let man = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*万円").unwrap();
    if let Some(caps) = man.captures(&cleaned) {
        return Ok(Some(parse_f64(&caps[1], text)?));
    }

    // No currency unit at all: first number in the fragment, already man-yen.
    let bare = Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap();
    match bare.find(&cleaned) {
        Some(m) => Ok(Some(parse_f64(m.as_str(), text)?)),
        None => Err(ParseError::NoAmount(text.to_string())),
    }
}

/// Parse an area fragment into m². Both square-meter glyph variants are
/// accepted. Ok(None) for the "-" placeholder.
pub fn parse_area(text: &str) -> Result<Option<f64>, ParseError> {
    let cleaned = strip_separators(text).replace("m²", "").replace('㎡', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == PLACEHOLDER {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParseError::BadNumber(text.to_string()))
}

/// Parse a raw-yen price string (the point API's "300,000(円/m²)" notation)
/// into man-yen: first number in the fragment, divided by 10,000.
pub fn parse_yen_amount(text: &str) -> Result<Option<f64>, ParseError> {
    let cleaned = strip_separators(text);
    if cleaned.is_empty() || cleaned == PLACEHOLDER {
        return Ok(None);
    }
    let bare = Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap();
    match bare.find(&cleaned) {
        Some(m) => Ok(Some(parse_f64(m.as_str(), text)? / 10000.0)),
        None => Err(ParseError::NoAmount(text.to_string())),
    }
}

/// Price per m², rounded to two decimals. None when either input is missing
/// or the area is zero; never divides by zero.
pub fn unit_price(amount: Option<f64>, area: Option<f64>) -> Option<f64> {
    match (amount, area) {
        (Some(amount), Some(area)) if area != 0.0 => Some(round2(amount / area)),
        _ => None,
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn parse_f64(num: &str, original: &str) -> Result<f64, ParseError> {
    num.parse::<f64>()
        .map_err(|_| ParseError::BadNumber(original.to_string()))
}
