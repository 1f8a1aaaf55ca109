//! Text, Markdown, and JSON renderings of persisted products.
//!
//! Each child collection is first reduced to a list of display entries; the
//! plain-text rendering joins them on one line, the Markdown rendering emits
//! one bullet per entry.

use serde::Serialize;

use crate::products::{ProductFeature, ProductPrice, ProductRecord, ProductSpec, ProductTechnology};

/// Label used for features whose group has no title.
pub const DEFAULT_FEATURE_GROUP: &str = "General";

const SPEC_SEPARATOR: &str = "; ";
const PRICE_SEPARATOR: &str = "; ";
const TECHNOLOGY_SEPARATOR: &str = " | ";
const FEATURE_SEPARATOR: &str = " | ";

/// Structural dump of a product and its summaries, used as the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedProduct {
    pub uid: String,
    pub display_title: String,
    pub url: String,
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub specs_text: Option<String>,
    pub prices_text: Option<String>,
    pub technologies_text: Option<String>,
    pub features_text: Option<String>,
    /// The plain-text rendering of the product.
    pub formatted_text: String,
}

impl FormattedProduct {
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            uid: record.uid.clone(),
            display_title: record.display_title.clone(),
            url: record.url.clone(),
            description: record.description.clone(),
            tagline: record.tagline.clone(),
            specs_text: format_specs(&record.specs),
            prices_text: format_prices(&record.prices),
            technologies_text: format_technologies(&record.technologies),
            features_text: format_features(&record.features),
            formatted_text: render_text(record),
        }
    }
}

/// `Title: value` entries, one per distinct title.
///
/// Titles keep the position of their first occurrence; the value is the last
/// one seen. Titles whose final value is empty are omitted.
fn spec_entries(specs: &[ProductSpec]) -> Vec<String> {
    let mut grouped: Vec<(&str, Option<&str>)> = Vec::new();
    for spec in specs {
        let value = spec.value.as_deref();
        match grouped.iter_mut().find(|(title, _)| *title == spec.title) {
            Some(slot) => slot.1 = value,
            None => grouped.push((spec.title.as_str(), value)),
        }
    }

    grouped
        .into_iter()
        .filter_map(|(title, value)| match value {
            Some(v) if !v.is_empty() => Some(format!("{title}: {v}")),
            _ => None,
        })
        .collect()
}

fn price_entries(prices: &[ProductPrice]) -> Vec<String> {
    prices
        .iter()
        .filter(|p| !p.price.is_empty())
        .map(|p| format!("{}: {}", p.region.to_uppercase(), p.price))
        .collect()
}

fn technology_entries(technologies: &[ProductTechnology]) -> Vec<String> {
    technologies
        .iter()
        .map(|t| {
            if t.content.is_empty() {
                t.title.clone()
            } else {
                format!("{}: {}", t.title, t.content)
            }
        })
        .collect()
}

/// `Group: a, b` entries in first-seen group order.
fn feature_entries(features: &[ProductFeature]) -> Vec<String> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for feature in features {
        let group = feature
            .group_title
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_FEATURE_GROUP);
        match groups.iter_mut().find(|(title, _)| *title == group) {
            Some((_, contents)) => contents.push(feature.content.as_str()),
            None => groups.push((group, vec![feature.content.as_str()])),
        }
    }

    groups
        .into_iter()
        .map(|(group, contents)| format!("{group}: {}", contents.join(", ")))
        .collect()
}

fn join_entries(entries: &[String], separator: &str) -> Option<String> {
    if entries.is_empty() {
        None
    } else {
        Some(entries.join(separator))
    }
}

/// Specs summary, e.g. `Length: 170cm; Weight: 1200g`.
#[must_use]
pub fn format_specs(specs: &[ProductSpec]) -> Option<String> {
    join_entries(&spec_entries(specs), SPEC_SEPARATOR)
}

/// Prices summary, e.g. `NO: 100 NOK; SE: 100 SEK`.
#[must_use]
pub fn format_prices(prices: &[ProductPrice]) -> Option<String> {
    join_entries(&price_entries(prices), PRICE_SEPARATOR)
}

/// Technology summary, e.g. `Carbon: Light and stiff | Base`.
#[must_use]
pub fn format_technologies(technologies: &[ProductTechnology]) -> Option<String> {
    join_entries(&technology_entries(technologies), TECHNOLOGY_SEPARATOR)
}

/// Features summary, e.g. `Construction: Wood core, Carbon | General: Light`.
#[must_use]
pub fn format_features(features: &[ProductFeature]) -> Option<String> {
    join_entries(&feature_entries(features), FEATURE_SEPARATOR)
}

/// Renders a product as labeled plain-text lines in a fixed order.
///
/// `Tagline`, `Description`, and the four summary lines are omitted when
/// they would be empty.
#[must_use]
pub fn render_text(record: &ProductRecord) -> String {
    let mut lines = vec![format!("Product: {}", record.display_title)];
    if let Some(tagline) = non_empty(record.tagline.as_deref()) {
        lines.push(format!("Tagline: {tagline}"));
    }
    lines.push(format!("URL: {}", record.url));
    lines.push(format!("UID: {}", record.uid));
    if let Some(description) = non_empty(record.description.as_deref()) {
        lines.push(format!("Description: {description}"));
    }

    let summaries = [
        ("Specifications", format_specs(&record.specs)),
        ("Prices", format_prices(&record.prices)),
        ("Technology", format_technologies(&record.technologies)),
        ("Features", format_features(&record.features)),
    ];
    for (label, summary) in summaries {
        if let Some(text) = summary {
            lines.push(format!("{label}: {text}"));
        }
    }

    lines.join("\n")
}

/// Renders a product as a Markdown document with one `##` section per
/// non-empty summary and one bullet per entry.
#[must_use]
pub fn render_markdown(record: &ProductRecord) -> String {
    let mut lines = vec![format!("# {}", record.display_title)];
    if let Some(tagline) = non_empty(record.tagline.as_deref()) {
        lines.push(format!("*{tagline}*"));
    }
    lines.push(String::new());
    lines.push(format!("**URL:** {}", record.url));
    lines.push(format!("**UID:** {}", record.uid));
    lines.push(String::new());

    if let Some(description) = non_empty(record.description.as_deref()) {
        lines.push("## Description".to_string());
        lines.push(description.to_string());
        lines.push(String::new());
    }

    let sections = [
        ("Specifications", spec_entries(&record.specs)),
        ("Prices", price_entries(&record.prices)),
        ("Technology", technology_entries(&record.technologies)),
        ("Features", feature_entries(&record.features)),
    ];
    for (heading, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("## {heading}"));
        lines.extend(entries.into_iter().map(|entry| format!("- {entry}")));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
