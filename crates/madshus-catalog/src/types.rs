//! Raw request and response types for the Madshus catalog GraphQL API.
//!
//! The API is public and unversioned. Observed response characteristics:
//!
//! - Application failures come back as a top-level `errors` array, often
//!   alongside HTTP 200 and a partial or null `data` object.
//! - `updated_product_specs` is an opaque JSON scalar: a list of
//!   `{id, title, value}` objects where `value` may be a string, a list of
//!   strings, a number, or null.
//! - `details.technology` is a single `{title, content}` object on some
//!   products and a list of them on others.
//! - `prices` is an object keyed by region code (`no`, `se`, `gb`, ...). Values
//!   are localized strings, empty strings, or null.
//! - Any list may be returned as `null` instead of `[]`.
//!
//! Types here absorb that variance at decode time so the normalizer only ever
//! sees one shape per field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Request envelope
// ---------------------------------------------------------------------------

/// Body POSTed to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridVariables<'a> {
    pub query_string: &'a str,
    pub bc_region: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariables<'a> {
    pub url: &'a str,
    pub locale: &'a str,
    pub bc_region: &'a str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub path: Vec<Value>,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            path: Vec::new(),
            extensions: None,
        }
    }

    /// Decodes one `errors` entry. Entries that are not error objects are kept
    /// with their raw JSON as the message.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from_message(s),
            Value::Object(_) => serde_json::from_value(value.clone())
                .unwrap_or_else(|_| Self::from_message(&value.to_string())),
            other => Self::from_message(&other.to_string()),
        }
    }

    /// Decodes a top-level `errors` value, which is normally an array but is
    /// accepted as a single entry too.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().map(Self::from_value).collect(),
            other => vec![Self::from_value(other)],
        }
    }
}

// ---------------------------------------------------------------------------
// Grid query
// ---------------------------------------------------------------------------

/// `data` of the `GetPaginatedProductGrid` operation.
#[derive(Debug, Deserialize)]
pub struct GridData {
    #[serde(rename = "paginatedProductGrid", default)]
    pub paginated_product_grid: Option<ProductGrid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductGrid {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub products: Vec<GridProduct>,
    /// Total matches for the filter across all pages.
    #[serde(default, deserialize_with = "de::lenient_u64")]
    pub total: u64,
}

/// A product summary from the grid listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridProduct {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub display_title: Option<String>,
    /// Storefront path used as the detail query key.
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Detail query
// ---------------------------------------------------------------------------

/// `data` of the `GetProduct` operation. `product` is null for unknown URLs.
#[derive(Debug, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub product: Option<CatalogProduct>,
}

/// The full nested record returned by the detail query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogProduct {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub display_title: Option<String>,
    /// HTML fragment.
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub updated_product_specs: Vec<RawSpec>,
    /// Region code to price; `None` for null entries.
    #[serde(default, deserialize_with = "de::lenient_price_map")]
    pub prices: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub details: Option<ProductDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpec {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<SpecValue>,
}

/// A spec value as the API sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    List(Vec<Value>),
    Other(Value),
}

impl SpecValue {
    /// Collapses the value to the single string that is stored.
    ///
    /// Lists are joined with `", "`; an empty list yields `None`. Text is kept
    /// verbatim, including the empty string.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::List(items) if items.is_empty() => None,
            Self::List(items) => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Self::Other(Value::Null) => None,
            Self::Other(value) => Some(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDetails {
    #[serde(default)]
    pub technology: Option<OneOrMany<RawTechnology>>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub feature_details: Vec<RawFeatureGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTechnology {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    /// HTML fragment.
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatureGroup {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub group_title: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub group: Vec<RawFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub title: Option<String>,
    /// HTML fragment.
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub content: Option<String>,
}

/// A field the API returns either as one object or as a list of objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Many(items) => items,
            Self::One(item) => std::slice::from_ref(item),
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Lenient field deserializers.
mod de {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Accepts strings, numbers, and booleans; null becomes `None`.
    pub(super) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
    }

    /// Accepts a number or a numeric string; anything else counts as zero.
    pub(super) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let total = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        Ok(total)
    }

    /// Accepts an object of region to scalar; null or non-object becomes empty.
    pub(super) fn lenient_price_map<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Object(entries)) => entries
                .into_iter()
                .map(|(region, price)| (region, scalar_to_string(price)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(map)
    }

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }
}
