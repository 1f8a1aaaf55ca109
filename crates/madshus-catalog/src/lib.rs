pub mod client;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use filter::{grid_query_string, GridQuery};
pub use normalize::{
    extract_features, extract_prices, extract_specs, extract_technologies, normalize_product,
    strip_html,
};
pub use types::{CatalogProduct, GraphqlError, GridProduct, OneOrMany, SpecValue};
