// End-to-end pipeline tests on static HTML, no network involved.

use chrono::NaiveDate;
use std::path::Path;

use crate::extract_urls;
use crate::landprice::LandPriceApi;
use crate::location::{resolve_from_url, Geocoder, LocationResolver, ResolvedLocation};
use crate::output::{format_markdown, output_path};
use crate::scraper::parse_listing_page;

struct StubGeocoder(Option<(f64, f64)>);

impl Geocoder for StubGeocoder {
    fn geocode(&self, _address: &str) -> Option<(f64, f64)> {
        self.0
    }
}

const LISTING_PAGE: &str = r#"
    <html><body>
    <article class="bukkenListWrap">
      <div class="bukkenUnitBox">
        <h5 class="bukkenName">市原市八幡2丁目</h5>
        <div class="price">価格総額 3,280万円</div>
        <div class="priceItems">建物価格 1,054 万円 / 土地価格 2,226 万円</div>
        <div class="area"><span class="label">建物面積</span><span class="value">105.3m²</span></div>
        <div class="area"><span class="label">土地面積</span><span class="value">210.6m²</span></div>
        <p>ミサワホーム施工</p>
      </div>
    </article>
    </body></html>"#;

#[test]
fn scrape_and_render_one_page() {
    let records = parse_listing_page(LISTING_PAGE);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.location, "市原市八幡2丁目");
    assert_eq!(record.total_amount, Some(3280.0));
    assert_eq!(record.building_unit_price, Some(10.01));
    assert_eq!(record.land_unit_price, Some(10.57));
    assert_eq!(record.maker.as_deref(), Some("ミサワホーム"));

    let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    let markdown = format_markdown(&records, "https://sumstock.jp/search/02/12/12217", date);
    assert!(markdown.contains("| 市原市八幡2丁目 | 3280万円 |"));
    assert!(markdown.contains("ミサワホーム"));
}

#[test]
fn url_code_places_the_file_even_when_the_address_disagrees() {
    // URL code 12215 is 柏市; the listing text says 市原市. The code decides
    // the directory, the record-level resolution is advisory only.
    let url = "https://sumstock.jp/search/02/12/12215";
    let page_location = resolve_from_url(url);
    assert_eq!(page_location.pair(), ("千葉県", "柏市"));

    let land_api = LandPriceApi::new(None).unwrap();
    let geocoder = StubGeocoder(None);
    let resolver = LocationResolver::new(&geocoder, &land_api);
    let record_location = resolver.resolve(None, Some("市原市八幡2丁目"));
    assert_eq!(record_location.pair(), ("千葉県", "市原市"));

    let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    let path = output_path(Path::new("data"), &page_location, date);
    assert_eq!(path, Path::new("data/千葉県/柏市/2025-04-01.md"));
}

#[test]
fn resolver_reports_the_strategy_that_fired() {
    let land_api = LandPriceApi::new(None).unwrap();
    let geocoder = StubGeocoder(None);
    let resolver = LocationResolver::new(&geocoder, &land_api);

    let by_code = resolver.resolve(
        Some("https://sumstock.jp/search/02/12/12207"),
        Some("柏市どこか1丁目"),
    );
    assert!(matches!(by_code, ResolvedLocation::FromCode { .. }));

    let by_text = resolver.resolve(None, Some("柏市どこか1丁目"));
    assert!(matches!(by_text, ResolvedLocation::FromAddress { .. }));

    let nothing = resolver.resolve(None, Some("0123456789"));
    assert_eq!(nothing, ResolvedLocation::Unresolved);
}

#[test]
fn empty_page_renders_the_no_data_report() {
    let records = parse_listing_page("<html><body><p>メンテナンス中</p></body></html>");
    assert!(records.is_empty());

    let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    let markdown = format_markdown(&records, "https://sumstock.jp/search/02/12/12207", date);
    assert!(markdown.contains("| データなし |"));
}

#[test]
fn issue_body_urls_are_extracted() {
    let body = "対象:\nhttps://sumstock.jp/search/02/12/12207\nと\nhttps://sumstock.jp/search/01/13/13112 をお願いします";
    assert_eq!(
        extract_urls(body),
        vec![
            "https://sumstock.jp/search/02/12/12207".to_string(),
            "https://sumstock.jp/search/01/13/13112".to_string(),
        ]
    );
    assert!(extract_urls("no urls here").is_empty());
}
