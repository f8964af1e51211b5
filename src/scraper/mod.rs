mod scraper;
mod scraper_error;

pub use scraper::{parse_listing_page, SumStockScraper};
pub use scraper_error::ScrapeError;
