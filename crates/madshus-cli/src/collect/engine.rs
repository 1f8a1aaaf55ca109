//! Category-by-category collection loop.
//!
//! One category and one product are processed at a time. The engine owns the
//! run's dedup state; it is created per run and dropped with it.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Context as _;
use madshus_catalog::{normalize_product, CatalogClient};
use madshus_core::AppConfig;
use madshus_db::{SqlitePool, UpsertOutcome};

use super::CollectOptions;

/// Result of one collection run.
#[derive(Debug, Default)]
pub(crate) struct CollectionOutcome {
    /// Distinct uids created or updated, in the order first collected.
    pub collected_uids: Vec<String>,
    pub created: usize,
    pub updated: usize,
    /// Categories whose grid fetch failed; none of their products were tried.
    pub failed_categories: Vec<u32>,
    /// Product URLs whose detail fetch, decode, or upsert failed.
    pub failed_urls: Vec<String>,
}

pub(crate) struct CollectionEngine<'a> {
    pool: &'a SqlitePool,
    client: &'a CatalogClient,
    options: CollectOptions,
    page_size: u32,
    inter_request_delay_ms: u64,
    /// URLs already attempted this run, successful or not.
    processed_urls: HashSet<String>,
    seen_uids: HashSet<String>,
    outcome: CollectionOutcome,
}

impl<'a> CollectionEngine<'a> {
    pub(crate) fn new(
        pool: &'a SqlitePool,
        client: &'a CatalogClient,
        config: &AppConfig,
        options: CollectOptions,
    ) -> Self {
        Self {
            pool,
            client,
            options,
            page_size: config.grid_page_size,
            inter_request_delay_ms: config.inter_request_delay_ms,
            processed_urls: HashSet::new(),
            seen_uids: HashSet::new(),
            outcome: CollectionOutcome::default(),
        }
    }

    /// The limit is a pre-check: it is tested before each category and before
    /// each grid entry, and the count only grows after a committed upsert, so
    /// a run never collects more than `limit` products.
    fn limit_reached(&self) -> bool {
        self.options
            .limit
            .is_some_and(|limit| self.outcome.collected_uids.len() as u64 >= limit)
    }

    pub(crate) async fn run(mut self) -> CollectionOutcome {
        let categories = std::mem::take(&mut self.options.categories);
        tracing::info!(
            categories = categories.len(),
            region = %self.options.region,
            locale = %self.options.locale,
            limit = ?self.options.limit,
            "starting collection"
        );

        for category in categories {
            if self.limit_reached() {
                tracing::info!(limit = ?self.options.limit, "reached product limit");
                break;
            }
            self.collect_category(category).await;
        }

        tracing::info!(
            collected = self.outcome.collected_uids.len(),
            created = self.outcome.created,
            updated = self.outcome.updated,
            failed_categories = self.outcome.failed_categories.len(),
            failed_products = self.outcome.failed_urls.len(),
            "collection finished"
        );
        self.outcome
    }

    async fn collect_category(&mut self, category: u32) {
        let entries = match self
            .client
            .fetch_category_products(
                category,
                &self.options.region,
                &self.options.locale,
                self.page_size,
                self.inter_request_delay_ms,
            )
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    category,
                    error_class = e.class(),
                    error = %e,
                    "skipping category"
                );
                self.outcome.failed_categories.push(category);
                return;
            }
        };

        tracing::info!(category, products = entries.len(), "collecting category");

        for entry in entries {
            if self.limit_reached() {
                break;
            }

            let Some(url) = entry.url.filter(|u| !u.trim().is_empty()) else {
                tracing::debug!(category, uid = ?entry.uid, "grid entry has no url");
                continue;
            };

            // Marked before the fetch so a failing URL is not retried this run.
            if !self.processed_urls.insert(url.clone()) {
                tracing::debug!(category, url = %url, "already processed this run");
                continue;
            }

            match self.collect_product(&url).await {
                Ok((uid, upsert)) => self.record(uid, upsert),
                Err(e) => {
                    tracing::warn!(
                        category,
                        url = %url,
                        error = %format!("{e:#}"),
                        "skipping product"
                    );
                    self.outcome.failed_urls.push(url);
                }
            }
        }
    }

    /// Fetches, normalizes, and upserts one product.
    async fn collect_product(&self, url: &str) -> anyhow::Result<(String, UpsertOutcome)> {
        if self.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
        }

        let payload = self
            .client
            .fetch_detail(url, &self.options.locale, &self.options.region)
            .await
            .with_context(|| format!("fetching detail for {url}"))?
            .with_context(|| format!("catalog has no product at {url}"))?;

        let product = normalize_product(&payload, url)?;

        let upsert = madshus_db::upsert_product(self.pool, &product)
            .await
            .with_context(|| format!("storing product {}", product.uid))?;

        match upsert {
            UpsertOutcome::Created => tracing::info!(uid = %product.uid, url, "created product"),
            UpsertOutcome::Updated => tracing::info!(uid = %product.uid, url, "updated product"),
        }

        Ok((product.uid, upsert))
    }

    fn record(&mut self, uid: String, upsert: UpsertOutcome) {
        match upsert {
            UpsertOutcome::Created => self.outcome.created += 1,
            UpsertOutcome::Updated => self.outcome.updated += 1,
        }
        if self.seen_uids.insert(uid.clone()) {
            self.outcome.collected_uids.push(uid);
        }
    }
}
