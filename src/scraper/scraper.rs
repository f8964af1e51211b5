// scraper.rs
use crate::domain::{assemble_record, PropertyRecord, UNKNOWN_LOCATION};
use crate::extract::{extract_fields, locate_items};
use crate::location::{resolve_record, LocationResolver, ResolvedLocation};
use crate::parse::round2;
use crate::scraper::ScrapeError;
use reqwest::blocking::Client;
use scraper::Html;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct SumStockScraper {
    client: Client,
}

impl SumStockScraper {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch one listing page, extract and assemble its records, then attach
    /// reference land prices and check record locations against the URL code.
    /// Network failure degrades to the error; everything past the fetch is
    /// non-fatal per record.
    pub fn scrape_url(
        &self,
        url: &str,
        resolver: &LocationResolver<'_>,
    ) -> Result<Vec<PropertyRecord>, ScrapeError> {
        let html = self.fetch_page(url)?;
        let mut records = parse_listing_page(&html);

        // URL-code location is authoritative for placement; the per-record
        // resolution below is advisory only. No address exists at page
        // level, so only the code strategy can fire here.
        let page_location = resolver.resolve(Some(url), None);

        for record in &mut records {
            self.enrich_record(record, &page_location, resolver);
        }

        Ok(records)
    }

    pub fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Network(format!("HTTP {status} for {url}")));
        }

        resp.text().map_err(|e| ScrapeError::Network(e.to_string()))
    }

    fn enrich_record(
        &self,
        record: &mut PropertyRecord,
        page_location: &ResolvedLocation,
        resolver: &LocationResolver<'_>,
    ) {
        if record.location == UNKNOWN_LOCATION {
            return;
        }

        // One geocode per record feeds both the advisory resolution and the
        // reference-price lookup.
        let point = resolver.nearest_price_point(&record.location);
        let record_location = resolve_record(&record.location, point.as_ref());

        if page_location.is_resolved()
            && record_location.is_resolved()
            && page_location.pair() != record_location.pair()
        {
            let (pp, pc) = page_location.pair();
            let (rp, rc) = record_location.pair();
            eprintln!(
                "Advisory: URL code says {pp}/{pc} but \"{}\" resolves to {rp}/{rc}; the URL code governs placement",
                record.location
            );
        }

        record.reference_land_price = point.and_then(|p| p.price);
        record.reference_ratio = match (record.building_unit_price, record.reference_land_price) {
            (Some(unit), Some(reference)) if reference != 0.0 => Some(round2(unit / reference)),
            _ => None,
        };
    }
}

/// Locate, extract and assemble every listing on a page. Pure with respect
/// to the network, so tests can feed raw HTML. Items that yield neither a
/// location nor any price are dropped; no selector match at all gives an
/// empty list, which callers render as the explicit no-data row.
pub fn parse_listing_page(html: &str) -> Vec<PropertyRecord> {
    let document = Html::parse_document(html);

    locate_items(&document)
        .into_iter()
        .map(|item| assemble_record(&extract_fields(item)))
        .filter(PropertyRecord::has_data)
        .collect()
}
