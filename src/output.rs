// output.rs
//
// Markdown report rendering and location-based file placement. The directory
// a report lands in comes from the URL-code resolution only; address-derived
// locations never move files.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::PropertyRecord;
use crate::location::ResolvedLocation;
use crate::scraper::ScrapeError;

/// Render one page's records as the front-mattered markdown report.
/// An empty record set gets the explicit データなし row, so every requested
/// URL produces deterministic output.
pub fn format_markdown(records: &[PropertyRecord], url: &str, date: NaiveDate) -> String {
    let date_ja = date.format("%Y年%m月%d日");
    let mut markdown = format!(
        "---\n\
         layout: default\n\
         title: {iso}\n\
         parent: データ一覧\n\
         nav_order: {nav}\n\
         ---\n\
         \n\
         # スムストック物件データ\n\
         \n\
         ## 取得日: {date_ja}\n\
         ### 参照URL: [{url}]({url})\n\
         \n\
         | 所在地（町名） | 総額 | 建物価格 | 建物面積 | 建物単価（万円/m²） | 土地価格 | 土地面積 | 土地単価（万円/m²） | 地価（万円/m²） | 地価倍率 | ハウスメーカー |\n\
         |----------------|-------|------------|-------------|------------------------|------------|-------------|------------------------|----------------|----------|----------------|\n",
        iso = date.format("%Y-%m-%d"),
        nav = date.format("%Y%m%d"),
    );

    if records.is_empty() {
        markdown.push_str("| データなし | - | - | - | - | - | - | - | - | - | - |\n");
    } else {
        for record in records {
            markdown.push_str(&format_row(record));
        }
    }

    markdown.push_str("\n---\n\n**注意**: データは自動的に取得されます。\n");
    markdown
}

fn format_row(record: &PropertyRecord) -> String {
    format!(
        "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
        record.location,
        man_yen(record.total_amount),
        man_yen(record.building_amount),
        square_meters(record.building_area),
        per_square_meter(record.building_unit_price),
        man_yen(record.land_amount),
        square_meters(record.land_area),
        per_square_meter(record.land_unit_price),
        per_square_meter(record.reference_land_price),
        ratio(record.reference_ratio),
        record.maker.as_deref().unwrap_or("-"),
    )
}

// Unavailable renders as the "-" placeholder throughout.

fn man_yen(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}万円"),
        None => "-".to_string(),
    }
}

fn square_meters(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}m²"),
        None => "-".to_string(),
    }
}

fn per_square_meter(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("約{v:.2}万円/m²"),
        None => "-".to_string(),
    }
}

fn ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}x"),
        None => "-".to_string(),
    }
}

/// data/<prefecture>/<city>/<YYYY-MM-DD>.md, sentinel directories included.
pub fn output_path(output_dir: &Path, location: &ResolvedLocation, date: NaiveDate) -> PathBuf {
    let (prefecture, city) = location.pair();
    output_dir
        .join(prefecture)
        .join(city)
        .join(format!("{}.md", date.format("%Y-%m-%d")))
}

pub fn save_markdown(
    output_dir: &Path,
    location: &ResolvedLocation,
    date: NaiveDate,
    markdown: &str,
) -> Result<PathBuf, ScrapeError> {
    let path = output_path(output_dir, location, date);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScrapeError::IoError(e.to_string()))?;
    }
    fs::write(&path, markdown).map_err(|e| ScrapeError::IoError(e.to_string()))?;
    eprintln!("Saved data to {}", path.display());
    Ok(path)
}

/// Jekyll navigation pages for the directories a report lands in: an
/// index.md per prefecture and per city, and the data files under the city
/// re-parented from the top-level データ一覧 to the city index. Rewritten on
/// every save; the content depends only on the directory names.
pub fn write_index_pages(
    output_dir: &Path,
    location: &ResolvedLocation,
) -> Result<(), ScrapeError> {
    let (prefecture, city) = location.pair();
    let pref_dir = output_dir.join(prefecture);
    let city_dir = pref_dir.join(city);
    fs::create_dir_all(&city_dir).map_err(|e| ScrapeError::IoError(e.to_string()))?;

    fs::write(pref_dir.join("index.md"), prefecture_index(prefecture))
        .map_err(|e| ScrapeError::IoError(e.to_string()))?;
    fs::write(city_dir.join("index.md"), city_index(prefecture, city))
        .map_err(|e| ScrapeError::IoError(e.to_string()))?;

    for entry in fs::read_dir(&city_dir).map_err(|e| ScrapeError::IoError(e.to_string()))? {
        let entry = entry.map_err(|e| ScrapeError::IoError(e.to_string()))?;
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "md")
            || path.file_name().map_or(true, |name| name == "index.md")
        {
            continue;
        }
        reparent_data_file(&path, city)?;
    }
    Ok(())
}

fn prefecture_index(prefecture: &str) -> String {
    format!(
        "---\n\
         layout: default\n\
         title: {prefecture}\n\
         parent: データ一覧\n\
         has_children: true\n\
         nav_order: 10\n\
         ---\n\
         \n\
         # {prefecture}\n\
         \n\
         このページには{prefecture}の市町村別データが表示されています。\n\
         \n\
         各市町村を選択してデータをご覧ください。\n"
    )
}

fn city_index(prefecture: &str, city: &str) -> String {
    format!(
        "---\n\
         layout: default\n\
         title: {city}\n\
         parent: {prefecture}\n\
         has_children: true\n\
         nav_order: 10\n\
         ---\n\
         \n\
         # {city}\n\
         \n\
         このページには{prefecture}{city}の日付別データが表示されています。\n\
         \n\
         各日付を選択してデータをご覧ください。\n"
    )
}

fn reparent_data_file(path: &Path, city: &str) -> Result<(), ScrapeError> {
    let text = fs::read_to_string(path).map_err(|e| ScrapeError::IoError(e.to_string()))?;
    let mut reparented = false;
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        if !reparented && line.starts_with("parent:") {
            lines.push(format!("parent: {city}"));
            reparented = true;
        } else {
            lines.push(line.to_string());
        }
    }
    if reparented {
        fs::write(path, lines.join("\n") + "\n")
            .map_err(|e| ScrapeError::IoError(e.to_string()))?;
    }
    Ok(())
}
