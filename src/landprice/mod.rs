mod api;

pub use api::{LandPriceApi, PricePoint};
