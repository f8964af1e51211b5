// locator.rs
use scraper::{ElementRef, Html, Selector};

// SumStock-specific selectors first, then common patterns for property
// listing sites. First selector with at least one match wins outright.
const ITEM_SELECTORS: &[&str] = &[
    "div.bukkenUnitBox",
    "article.bukkenListWrap .bukkenUnitBox",
    ".bukkenUnitBox",
    "div.property-item",
    "div.property-card",
    "div.property",
    "li.property-item",
    "div[class*=\"property\"]",
    "article.property",
    "div.bukken-item",
    "div.item",
    "tr.property",
];

/// Find the repeating listing nodes in a parsed page. No merging across
/// selectors; an empty result means "no data", not an error.
pub fn locate_items(document: &Html) -> Vec<ElementRef<'_>> {
    for raw in ITEM_SELECTORS {
        let selector = Selector::parse(raw).unwrap();
        let items: Vec<ElementRef> = document.select(&selector).collect();
        if !items.is_empty() {
            eprintln!("Found {} items using selector: {}", items.len(), raw);
            return items;
        }
    }

    eprintln!("Warning: no listing items found with any selector");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_selector_wins_outright() {
        // Both bukkenUnitBox and div.item are present; only the former is used.
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">a</div>
               <div class="bukkenUnitBox">b</div>
               <div class="item">c</div>"#,
        );
        let items = locate_items(&html);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn falls_back_to_generic_patterns() {
        let html = Html::parse_document(r#"<div class="property-card">x</div>"#);
        assert_eq!(locate_items(&html).len(), 1);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let html = Html::parse_document("<p>nothing here</p>");
        assert!(locate_items(&html).is_empty());
    }
}
