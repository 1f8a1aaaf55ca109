//! HTTP client for the Madshus catalog GraphQL endpoint.

mod fetch_all;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::query::{
    GET_PAGINATED_PRODUCT_GRID_QUERY, GET_PRODUCT_QUERY, GRID_OPERATION, PRODUCT_OPERATION,
};
use crate::types::{
    CatalogProduct, GraphqlError, GraphqlRequest, GridData, GridProduct, GridVariables,
    ProductData, ProductVariables,
};

/// Maximum number of grid pages fetched for one category before giving up.
/// Guards against a `total` that never converges.
pub(super) const MAX_PAGES: usize = 200;

/// Client for the catalog's two GraphQL operations.
///
/// Performs no retries. Application-level failures reported in the response
/// body surface as [`CatalogError::RemoteQuery`], distinct from transport
/// failures and from a legitimately empty result.
pub struct CatalogClient {
    pub(super) client: Client,
    pub(super) endpoint: Url,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidEndpoint`] if `endpoint` is not an absolute
    ///   `http` or `https` URL.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let endpoint = Self::parse_endpoint(endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn parse_endpoint(endpoint: &str) -> Result<Url, CatalogError> {
        let url = Url::parse(endpoint).map_err(|e| CatalogError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidEndpoint {
                url: endpoint.to_owned(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            });
        }
        Ok(url)
    }

    /// Fetches one page of the product grid.
    ///
    /// Returns the page's entries and the total number of matches across all
    /// pages. A null grid is treated as an empty page.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] / [`CatalogError::UnexpectedStatus`] on transport failure.
    /// - [`CatalogError::RemoteQuery`] if the body carries an `errors` field.
    /// - [`CatalogError::Deserialize`] / [`CatalogError::MissingData`] if the body
    ///   cannot be decoded.
    pub async fn fetch_grid(
        &self,
        query_string: &str,
        region: &str,
    ) -> Result<(Vec<GridProduct>, u64), CatalogError> {
        let variables = GridVariables {
            query_string,
            bc_region: region,
        };
        let data: GridData = self
            .execute(GRID_OPERATION, GET_PAGINATED_PRODUCT_GRID_QUERY, &variables)
            .await?;
        let grid = data.paginated_product_grid.unwrap_or_default();
        Ok((grid.products, grid.total))
    }

    /// Fetches the full record for one product URL.
    ///
    /// Returns `Ok(None)` when the catalog has no product at `url`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_grid`].
    pub async fn fetch_detail(
        &self,
        url: &str,
        locale: &str,
        region: &str,
    ) -> Result<Option<CatalogProduct>, CatalogError> {
        let variables = ProductVariables {
            url,
            locale,
            bc_region: region,
        };
        let data: ProductData = self
            .execute(PRODUCT_OPERATION, GET_PRODUCT_QUERY, &variables)
            .await?;
        Ok(data.product)
    }

    /// POSTs one GraphQL document and decodes its `data` object into `T`.
    ///
    /// The body is inspected for `errors` before the HTTP status, because the
    /// API reports query failures with both 200 and 4xx/5xx codes.
    async fn execute<V, T>(
        &self,
        operation: &str,
        query: &str,
        variables: &V,
    ) -> Result<T, CatalogError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let request = GraphqlRequest {
            query,
            operation_name: operation,
            variables,
        };

        tracing::debug!(operation, endpoint = %self.endpoint, "executing GraphQL operation");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let mut envelope = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(CatalogError::Deserialize {
                    context: format!("{operation} response from {}", self.endpoint),
                    source: e,
                });
            }
            Err(_) => {
                return Err(CatalogError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.endpoint.to_string(),
                });
            }
        };

        if let Some(errors) = envelope.get("errors").filter(|e| !e.is_null()) {
            let errors = GraphqlError::list_from_value(errors);
            tracing::debug!(operation, count = errors.len(), "GraphQL errors in response");
            return Err(CatalogError::RemoteQuery {
                operation: operation.to_owned(),
                errors,
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let data = match envelope.get_mut("data").map(Value::take) {
            Some(Value::Null) | None => {
                return Err(CatalogError::MissingData {
                    operation: operation.to_owned(),
                });
            }
            Some(data) => data,
        };

        serde_json::from_value::<T>(data).map_err(|e| CatalogError::Deserialize {
            context: format!("{operation} data"),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
