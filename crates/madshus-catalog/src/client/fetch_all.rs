//! Multi-page grid fetch for `CatalogClient`.

use std::time::Duration;

use crate::error::CatalogError;
use crate::filter::{grid_query_string, GridQuery};
use crate::types::GridProduct;

use super::CatalogClient;
use super::MAX_PAGES;

impl CatalogClient {
    /// Fetches every grid entry for one category by walking `skip` forward
    /// one page at a time.
    ///
    /// Stops on an empty page, or once `skip` reaches the reported `total`.
    /// A page shorter than `page_size` does not end the walk while entries
    /// remain, since the server may cap page length below the requested size. `inter_request_delay_ms` is applied between pages, never
    /// before the first.
    ///
    /// **All-or-nothing**: a failure on any page discards the pages already
    /// fetched and returns the error, so the caller skips the whole category.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_grid`].
    /// Returns [`CatalogError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn fetch_category_products(
        &self,
        category: u32,
        region: &str,
        locale: &str,
        page_size: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<GridProduct>, CatalogError> {
        let mut all_products: Vec<GridProduct> = Vec::new();
        let mut skip: u64 = 0;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(CatalogError::PaginationLimit {
                    category,
                    max_pages: MAX_PAGES,
                });
            }

            if page_count > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let query_string = grid_query_string(&GridQuery {
                category,
                region,
                locale,
                limit: page_size,
                skip,
            });
            let (page, total) = self.fetch_grid(&query_string, region).await?;
            let page_len = page.len() as u64;

            tracing::debug!(category, skip, page_len, total, "fetched grid page");

            all_products.extend(page);
            skip += page_len;

            if page_len == 0 || skip >= total {
                break;
            }
            if page_len < u64::from(page_size) {
                tracing::warn!(
                    category,
                    requested = page_size,
                    received = page_len,
                    skip,
                    total,
                    "short grid page before total; server may cap page size"
                );
            }
        }

        Ok(all_products)
    }
}
