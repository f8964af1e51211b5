mod fields;
mod locator;

pub use fields::{extract_fields, RawFields};
pub use locator::locate_items;
