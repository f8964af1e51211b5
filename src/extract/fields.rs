// fields.rs
//
// Per-item field extraction. Every field runs its own ordered fallback
// cascade; once a sub-field is set by an earlier strategy, later strategies
// never overwrite it. Output is raw text fragments; numeric conversion
// happens at the parser boundary (see parse.rs).

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Raw text fragments for one listing item, pre-parse.
#[derive(Debug, Default, PartialEq)]
pub struct RawFields {
    pub location: Option<String>,
    pub total_price: Option<String>,
    pub building_price: Option<String>,
    pub land_price: Option<String>,
    pub building_area: Option<String>,
    pub land_area: Option<String>,
    pub maker: Option<String>,
}

// Known house makers, matched as substrings of the item text.
const MAKERS: &[&str] = &[
    "積水ハウス",
    "ダイワハウス",
    "大和ハウス",
    "セキスイハイム",
    "パナホーム",
    "ミサワホーム",
    "ヘーベルハウス",
    "住友林業",
    "トヨタホーム",
    "三井ホーム",
];

pub fn extract_fields(item: ElementRef<'_>) -> RawFields {
    let item_text = flat_text(item);

    let mut fields = RawFields {
        location: extract_location(item, &item_text),
        maker: extract_maker(&item_text),
        ..RawFields::default()
    };

    extract_prices(item, &item_text, &mut fields);
    extract_areas(item, &item_text, &mut fields);

    fields
}

fn extract_location(item: ElementRef<'_>, item_text: &str) -> Option<String> {
    // Dedicated name element first, regex over flattened text as fallback.
    let name_sel = Selector::parse("h5.bukkenName").unwrap();
    if let Some(elem) = item.select(&name_sel).next() {
        let text = flat_text(elem);
        if !text.is_empty() {
            return Some(text);
        }
    }

    let patterns = [
        Regex::new(r"[都道府県][市区町村].*?[0-9０-９]+丁目").unwrap(),
        Regex::new(r"[市区町村].*?[0-9０-９]").unwrap(),
    ];
    for pattern in &patterns {
        if let Some(m) = pattern.find(item_text) {
            return Some(m.as_str().trim().to_string());
        }
    }
    None
}

fn amount_re() -> Regex {
    // Covers "1,054万円" and the "1億2,000万円" shape.
    Regex::new(r"(?:[0-9,]+億)?[0-9,]+\s*万円").unwrap()
}

fn extract_prices(item: ElementRef<'_>, item_text: &str, fields: &mut RawFields) {
    let amount = amount_re();

    // 1. Label-aware pass over the price-bearing elements. Label wins over
    //    DOM order: a 建物価格 block coming first never lands in `total`.
    //    A price element wrapping the labelled summary block is left to the
    //    summary pass; its flattened text carries the sub-field labels.
    let price_sel = Selector::parse("div.price").unwrap();
    let items_sel = Selector::parse("div.priceItems").unwrap();
    for elem in item.select(&price_sel) {
        if elem.select(&items_sel).next().is_some() {
            continue;
        }
        let text = flat_text(elem);
        let Some(m) = amount.find(&text) else { continue };
        let fragment = m.as_str().to_string();
        if text.contains("建物価格") {
            set_if_unset(&mut fields.building_price, fragment);
        } else if text.contains("土地価格") {
            set_if_unset(&mut fields.land_price, fragment);
        } else {
            set_if_unset(&mut fields.total_price, fragment);
        }
    }

    // 2. Combined building/land summary block, labelled regex. The gap
    //    between label and amount must not cross a "-" placeholder, a line
    //    break or an ideographic space, or a dash-valued sub-field would
    //    capture its neighbour's amount.
    if fields.building_price.is_none() || fields.land_price.is_none() {
        if let Some(elem) = item.select(&items_sel).next() {
            let text = flat_text(elem);
            let b_re = Regex::new(r"建物価格[^0-9\n\r\u{3000}-]*([0-9,]+\s*万円)").unwrap();
            let l_re = Regex::new(r"土地価格[^0-9\n\r\u{3000}-]*([0-9,]+\s*万円)").unwrap();
            if let Some(caps) = b_re.captures(&text) {
                set_if_unset(&mut fields.building_price, caps[1].to_string());
            }
            if let Some(caps) = l_re.captures(&text) {
                set_if_unset(&mut fields.land_price, caps[1].to_string());
            }
        }
    }

    // 3. Bolded numeric fragments in document order, mapped by count:
    //    three -> (total, building, land); two -> (building, land);
    //    one -> (total). Extras are ignored.
    if fields.total_price.is_none()
        || fields.building_price.is_none()
        || fields.land_price.is_none()
    {
        let bold_sel = Selector::parse("span.bold").unwrap();
        let bolds: Vec<String> = item
            .select(&bold_sel)
            .map(|e| flat_text(e))
            .filter(|t| t.chars().any(|c| c.is_ascii_digit()))
            .collect();
        match bolds.len() {
            0 => {}
            1 => set_if_unset(&mut fields.total_price, bolds[0].clone()),
            2 => {
                set_if_unset(&mut fields.building_price, bolds[0].clone());
                set_if_unset(&mut fields.land_price, bolds[1].clone());
            }
            _ => {
                set_if_unset(&mut fields.total_price, bolds[0].clone());
                set_if_unset(&mut fields.building_price, bolds[1].clone());
                set_if_unset(&mut fields.land_price, bolds[2].clone());
            }
        }
    }

    // 4. Final fallback: every amount-like fragment in the flattened item
    //    text, first three positional as (total, building, land).
    if fields.total_price.is_none()
        || fields.building_price.is_none()
        || fields.land_price.is_none()
    {
        let all: Vec<&str> = amount.find_iter(item_text).map(|m| m.as_str()).collect();
        if let Some(first) = all.first() {
            set_if_unset(&mut fields.total_price, first.to_string());
        }
        if let Some(second) = all.get(1) {
            set_if_unset(&mut fields.building_price, second.to_string());
        }
        if let Some(third) = all.get(2) {
            set_if_unset(&mut fields.land_price, third.to_string());
        }
    }
}

fn extract_areas(item: ElementRef<'_>, item_text: &str, fields: &mut RawFields) {
    // 1. Labelled area blocks: label/value sub-elements, label matched by
    //    whitespace-normalized containment.
    let area_sel = Selector::parse("div.area").unwrap();
    let label_sel = Selector::parse("span.label, .label, [class*=\"label\"]").unwrap();
    let value_sel = Selector::parse("span.value, .value, [class*=\"value\"]").unwrap();

    for area in item.select(&area_sel) {
        let label_elem = area.select(&label_sel).next();
        let value_elem = area.select(&value_sel).next();
        let (Some(label_elem), Some(value_elem)) = (label_elem, value_elem) else {
            continue;
        };

        let label: String = flat_text(label_elem)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let value = flat_text(value_elem);
        if value.is_empty() {
            continue;
        }

        if label.contains("建物") && label.contains("面積") {
            set_if_unset(&mut fields.building_area, value);
        } else if label.contains("土地") && label.contains("面積") {
            set_if_unset(&mut fields.land_area, value);
        }
    }

    if fields.building_area.is_some() || fields.land_area.is_some() {
        return;
    }

    // 2. Generic value elements in document order: first building, second
    //    land, extras ignored.
    let value_in_area_sel = Selector::parse(".area .value").unwrap();
    let mut values: Vec<String> = item
        .select(&value_in_area_sel)
        .map(|e| flat_text(e))
        .filter(|t| !t.is_empty())
        .collect();

    // 3. Bare numeric+unit regex over the full text, same positional mapping.
    if values.is_empty() {
        let unit_re = Regex::new(r"([0-9][0-9,.]*)\s*(?:m²|㎡)").unwrap();
        values = unit_re
            .captures_iter(item_text)
            .map(|caps| caps[1].to_string())
            .collect();
    }

    if let Some(first) = values.first() {
        fields.building_area = Some(first.clone());
    }
    if let Some(second) = values.get(1) {
        fields.land_area = Some(second.clone());
    }
}

fn extract_maker(item_text: &str) -> Option<String> {
    // First occurrence in document order, not list order.
    MAKERS
        .iter()
        .filter_map(|m| item_text.find(m).map(|pos| (pos, *m)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, m)| m.to_string())
}

fn set_if_unset(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn flat_text(elem: ElementRef<'_>) -> String {
    elem.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_item(html: &Html) -> ElementRef<'_> {
        let sel = Selector::parse("div.bukkenUnitBox").unwrap();
        html.select(&sel).next().expect("fixture has an item")
    }

    #[test]
    fn labelled_prices_win_over_dom_order() {
        // Building price appears before total; labels must still decide.
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <div class="price">建物価格 1,054万円</div>
                 <div class="price">3,280万円</div>
                 <div class="price">土地価格 2,226万円</div>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.total_price.as_deref(), Some("3,280万円"));
        assert_eq!(fields.building_price.as_deref(), Some("1,054万円"));
        assert_eq!(fields.land_price.as_deref(), Some("2,226万円"));
    }

    #[test]
    fn price_items_block_fills_unset_subfields() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <div class="price">3,280万円</div>
                 <div class="priceItems">建物価格 1,054 万円 / 土地価格 2,226 万円</div>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.total_price.as_deref(), Some("3,280万円"));
        assert_eq!(fields.building_price.as_deref(), Some("1,054 万円"));
        assert_eq!(fields.land_price.as_deref(), Some("2,226 万円"));
    }

    #[test]
    fn placeholder_subfield_never_captures_its_neighbour() {
        // Building price is the "-" placeholder; the land amount two tokens
        // over must not be read as the building price.
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <div class="priceItems">建物価格 - / 土地価格 2,226 万円</div>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.building_price, None);
        assert_eq!(fields.land_price.as_deref(), Some("2,226 万円"));
    }

    #[test]
    fn price_wrapping_the_summary_block_is_not_label_classified() {
        // The total sits in a div.price that nests the labelled summary; the
        // flattened text contains 建物価格, but the total must not land in
        // the building sub-field.
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <div class="price">3,280万円
                   <div class="priceItems">建物価格 1,054 万円 / 土地価格 2,226 万円</div>
                 </div>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.building_price.as_deref(), Some("1,054 万円"));
        assert_eq!(fields.land_price.as_deref(), Some("2,226 万円"));
        assert_eq!(fields.total_price.as_deref(), Some("3,280万円"));
    }

    #[test]
    fn two_bold_values_map_to_building_and_land() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <span class="bold">1,054</span>
                 <span class="bold">2,226</span>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.building_price.as_deref(), Some("1,054"));
        assert_eq!(fields.land_price.as_deref(), Some("2,226"));
    }

    #[test]
    fn surplus_positional_values_are_ignored() {
        // Four bold values: the first three map to (total, building, land),
        // the fourth is dropped rather than reshuffling anything.
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <span class="bold">3,280</span>
                 <span class="bold">1,054</span>
                 <span class="bold">2,226</span>
                 <span class="bold">9,999</span>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.total_price.as_deref(), Some("3,280"));
        assert_eq!(fields.building_price.as_deref(), Some("1,054"));
        assert_eq!(fields.land_price.as_deref(), Some("2,226"));
    }

    #[test]
    fn full_text_fallback_is_positional() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 総額3,280万円 建物1,054万円 土地2,226万円 その他999万円
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.total_price.as_deref(), Some("3,280万円"));
        assert_eq!(fields.building_price.as_deref(), Some("1,054万円"));
        assert_eq!(fields.land_price.as_deref(), Some("2,226万円"));
    }

    #[test]
    fn labelled_areas_match_normalized_labels() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <div class="area"><span class="label">土地 面積</span><span class="value">210.5m²</span></div>
                 <div class="area"><span class="label">建物面積</span><span class="value">105.3㎡</span></div>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.building_area.as_deref(), Some("105.3㎡"));
        assert_eq!(fields.land_area.as_deref(), Some("210.5m²"));
    }

    #[test]
    fn unlabelled_values_map_positionally() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <div class="area"><span class="value">105.3</span></div>
                 <div class="area"><span class="value">210.5</span></div>
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.building_area.as_deref(), Some("105.3"));
        assert_eq!(fields.land_area.as_deref(), Some("210.5"));
    }

    #[test]
    fn area_regex_fallback_over_full_text() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">建物 105.3㎡ / 土地 210.5m²</div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.building_area.as_deref(), Some("105.3"));
        assert_eq!(fields.land_area.as_deref(), Some("210.5"));
    }

    #[test]
    fn location_prefers_dedicated_name_element() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">
                 <h5 class="bukkenName">松戸市中金杉1丁目</h5>
                 柏市どこか2丁目
               </div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.location.as_deref(), Some("松戸市中金杉1丁目"));
    }

    #[test]
    fn location_regex_fallback() {
        // The patterns anchor at the administrative suffix character, so the
        // match starts at 県 rather than at the prefecture name.
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">千葉県市川市八幡3丁目 3,280万円</div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.location.as_deref(), Some("県市川市八幡3丁目"));
    }

    #[test]
    fn earliest_maker_in_text_wins() {
        let html = Html::parse_document(
            r#"<div class="bukkenUnitBox">住友林業の家（旧:積水ハウス管理）</div>"#,
        );
        let fields = extract_fields(first_item(&html));
        assert_eq!(fields.maker.as_deref(), Some("住友林業"));
    }

    #[test]
    fn missing_maker_is_none() {
        let html = Html::parse_document(r#"<div class="bukkenUnitBox">不明な工務店</div>"#);
        assert_eq!(extract_fields(first_item(&html)).maker, None);
    }
}
