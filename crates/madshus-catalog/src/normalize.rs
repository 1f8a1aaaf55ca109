//! Normalization from raw catalog payloads to [`NormalizedProduct`].
//!
//! Every extractor is total over the shapes [`crate::types`] accepts: missing
//! keys, nulls, and single-object-versus-list variance have already been
//! folded into one representation by the time these functions run.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use madshus_core::{NormalizedProduct, ProductFeature, ProductSpec, ProductTechnology};
use regex::Regex;

use crate::error::CatalogError;
use crate::types::{CatalogProduct, RawTechnology};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag regex"));

/// Removes `<...>` tag spans and collapses whitespace runs to one space.
///
/// Tags are matched non-greedily within a line; this is not an HTML parser,
/// so entities are left as-is and a tag split across lines survives.
#[must_use]
pub fn strip_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let without_tags = TAG_RE.replace_all(text, "");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_html_opt(text: Option<&str>) -> String {
    text.map(strip_html).unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Keeps specs with a non-empty id and title; list values are joined with `", "`.
#[must_use]
pub fn extract_specs(product: &CatalogProduct) -> Vec<ProductSpec> {
    product
        .updated_product_specs
        .iter()
        .filter_map(|spec| {
            let spec_id = spec.id.as_deref().filter(|s| !s.is_empty())?;
            let title = spec.title.as_deref().filter(|s| !s.is_empty())?;
            Some(ProductSpec {
                spec_id: spec_id.to_string(),
                title: title.to_string(),
                value: spec.value.as_ref().and_then(|v| v.to_text()),
            })
        })
        .collect()
}

/// Copies every region key verbatim. Blank prices are dropped at write time.
#[must_use]
pub fn extract_prices(product: &CatalogProduct) -> BTreeMap<String, Option<String>> {
    product.prices.clone()
}

/// Technology entries with a title; content is HTML-stripped.
#[must_use]
pub fn extract_technologies(product: &CatalogProduct) -> Vec<ProductTechnology> {
    let Some(technology) = product
        .details
        .as_ref()
        .and_then(|d| d.technology.as_ref())
    else {
        return Vec::new();
    };

    technology
        .as_slice()
        .iter()
        .filter_map(|RawTechnology { title, content }| {
            let title = title.as_deref().filter(|t| !t.is_empty())?;
            Some(ProductTechnology {
                title: title.to_string(),
                content: strip_html_opt(content.as_deref()),
            })
        })
        .collect()
}

/// One row per feature item, carrying its group's title. Items whose content
/// is empty after HTML stripping are dropped.
#[must_use]
pub fn extract_features(product: &CatalogProduct) -> Vec<ProductFeature> {
    let Some(details) = product.details.as_ref() else {
        return Vec::new();
    };

    details
        .feature_details
        .iter()
        .flat_map(|group| {
            let group_title = non_blank(group.group_title.as_deref()).map(str::to_string);
            group.group.iter().filter_map(move |item| {
                let content = strip_html_opt(item.content.as_deref());
                if content.is_empty() {
                    return None;
                }
                Some(ProductFeature {
                    group_title: group_title.clone(),
                    content,
                })
            })
        })
        .collect()
}

/// Converts a detail payload into a [`NormalizedProduct`].
///
/// `requested_url` is the URL the detail query was issued for; it is used
/// when the payload omits its own `url`.
///
/// # Errors
///
/// Returns [`CatalogError::MissingUid`] if the payload has no usable `uid`.
pub fn normalize_product(
    product: &CatalogProduct,
    requested_url: &str,
) -> Result<NormalizedProduct, CatalogError> {
    let uid = non_blank(product.uid.as_deref()).ok_or_else(|| CatalogError::MissingUid {
        url: requested_url.to_owned(),
    })?;

    let url = non_blank(product.url.as_deref()).unwrap_or(requested_url);

    Ok(NormalizedProduct {
        uid: uid.to_string(),
        title: product.title.clone().unwrap_or_default(),
        display_title: product.display_title.clone().unwrap_or_default(),
        url: url.to_string(),
        description: strip_html_opt(product.description.as_deref()),
        tagline: non_blank(product.tagline.as_deref()).map(str::to_string),
        specs: extract_specs(product),
        prices: extract_prices(product),
        technologies: extract_technologies(product),
        features: extract_features(product),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
