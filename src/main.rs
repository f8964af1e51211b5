use chrono::Local;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::landprice::LandPriceApi;
use crate::location::{resolve_from_url, GsiGeocoder, LocationResolver};
use crate::scraper::SumStockScraper;

mod domain;
mod extract;
mod landprice;
mod location;
mod output;
mod parse;
mod scraper;

#[cfg(test)]
mod tests;

const OUTPUT_DIR: &str = "data";

fn main() {
    // URLs come from the command line, or from the triggering issue body.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let urls = if args.is_empty() {
        let issue_body = std::env::var("ISSUE_BODY").unwrap_or_default();
        extract_urls(&issue_body)
    } else {
        args
    };

    if urls.is_empty() {
        eprintln!(
            "Error: no SumStock URL found. Provide URLs as arguments or in the ISSUE_BODY environment variable."
        );
        std::process::exit(1);
    }

    println!("Found {} URL(s) to process", urls.len());

    if let Err(e) = run(&urls) {
        eprintln!("Scrape failed: {e}");
        std::process::exit(1);
    }
}

fn run(urls: &[String]) -> Result<(), scraper::ScrapeError> {
    let scraper = SumStockScraper::new()?;
    let geocoder = GsiGeocoder::new()?;
    let land_api = LandPriceApi::from_env()?;
    let resolver = LocationResolver::new(&geocoder, &land_api);

    let today = Local::now().date_naive();
    let mut filepaths: Vec<PathBuf> = Vec::new();

    // One URL at a time, to completion, before the next.
    for (i, url) in urls.iter().enumerate() {
        println!("\n[{}/{}] Scraping data from: {}", i + 1, urls.len(), url);

        let records = match scraper.scrape_url(url, &resolver) {
            Ok(records) => records,
            Err(e) => {
                // A failing URL degrades to an empty report; the run goes on.
                eprintln!("Warning: {e}");
                Vec::new()
            }
        };

        if records.is_empty() {
            eprintln!("Warning: no property data for URL {}; writing empty report", i + 1);
        }

        let markdown = output::format_markdown(&records, url, today);
        let location = resolve_from_url(url);
        let path = output::save_markdown(Path::new(OUTPUT_DIR), &location, today, &markdown)?;
        output::write_index_pages(Path::new(OUTPUT_DIR), &location)?;
        filepaths.push(path);

        println!("Successfully processed {} properties from URL {}", records.len(), i + 1);
    }

    println!("\n=== Summary ===");
    println!("Total URLs processed: {}", urls.len());
    println!("Total files created: {}", filepaths.len());

    write_github_output(&filepaths, &today.format("%Y-%m-%d").to_string())?;
    Ok(())
}

/// Pull every SumStock search URL out of free text (the triggering issue).
fn extract_urls(text: &str) -> Vec<String> {
    let re = Regex::new(r"https://sumstock\.jp/search/\d+/\d+/\d+").unwrap();
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Append the created paths for the calling workflow, when requested.
fn write_github_output(paths: &[PathBuf], date: &str) -> Result<(), scraper::ScrapeError> {
    let Ok(output_file) = std::env::var("GITHUB_OUTPUT") else {
        return Ok(());
    };

    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(output_file)
        .map_err(|e| scraper::ScrapeError::IoError(e.to_string()))?;

    let joined = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",");
    writeln!(file, "filepath={joined}")
        .and_then(|_| writeln!(file, "date={date}"))
        .and_then(|_| writeln!(file, "count={}", paths.len()))
        .map_err(|e| scraper::ScrapeError::IoError(e.to_string()))?;

    Ok(())
}
