use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A catalog product extracted from one detail payload, ready to be upserted.
///
/// The four child collections always describe the complete dependent state of
/// the product as of this payload; persistence replaces, never merges, them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Opaque catalog identifier; the only durable identity of a product.
    pub uid: String,
    pub title: String,
    pub display_title: String,
    /// Storefront path, e.g. `"/en-us/products/redline-4-0-skate"`.
    pub url: String,
    /// HTML-stripped plain text. Empty when the payload carries none.
    pub description: String,
    pub tagline: Option<String>,
    pub specs: Vec<ProductSpec>,
    /// Region code to localized price, exactly as the payload keyed it.
    /// Blank or missing prices are kept here and dropped at write time.
    pub prices: BTreeMap<String, Option<String>>,
    pub technologies: Vec<ProductTechnology>,
    pub features: Vec<ProductFeature>,
}

impl NormalizedProduct {
    /// Returns the `(region, price)` pairs that should be persisted: region
    /// lower-cased, entries with an absent or blank price removed.
    #[must_use]
    pub fn storable_prices(&self) -> Vec<ProductPrice> {
        self.prices
            .iter()
            .filter_map(|(region, price)| {
                let price = price.as_deref()?;
                if price.trim().is_empty() {
                    return None;
                }
                Some(ProductPrice {
                    region: region.to_ascii_lowercase(),
                    price: price.to_string(),
                })
            })
            .collect()
    }
}

/// One specification line, e.g. `Length: 170cm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub spec_id: String,
    pub title: String,
    /// Scalar value, or a list value already joined with `", "`.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPrice {
    /// Lower-case region code, e.g. `"no"`.
    pub region: String,
    /// Free-text, currency-localized price, e.g. `"4 999 NOK"`.
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTechnology {
    pub title: String,
    /// HTML-stripped; may be empty.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeature {
    /// `None` when the payload group had no title. Renderers substitute a
    /// generic label; storage keeps the absence.
    pub group_title: Option<String>,
    /// HTML-stripped and never empty.
    pub content: String,
}

/// A persisted product with its child rows, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub uid: String,
    pub title: String,
    pub display_title: String,
    pub url: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub specs: Vec<ProductSpec>,
    pub prices: Vec<ProductPrice>,
    pub technologies: Vec<ProductTechnology>,
    pub features: Vec<ProductFeature>,
}
