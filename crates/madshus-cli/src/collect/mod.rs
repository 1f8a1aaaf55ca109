//! `collect` command: crawls catalog categories and upserts products.
//!
//! The run is recorded in `collection_runs`. Category and product failures
//! are logged and skipped inside the engine; only failures of the run
//! bookkeeping itself, or a run in which every category failed, end the
//! command with an error.

mod engine;

use std::ops::RangeInclusive;

use clap::Args;
use madshus_catalog::CatalogClient;
use madshus_core::AppConfig;
use madshus_db::SqlitePool;

pub(crate) use engine::{CollectionEngine, CollectionOutcome};

/// Categories crawled when none are given on the command line.
pub(crate) const DEFAULT_CATEGORIES: RangeInclusive<u32> = 1..=300;

#[derive(Debug, Clone, Args)]
pub(crate) struct CollectArgs {
    /// Category id to crawl; repeat or comma-separate for several. Defaults to 1-300.
    #[arg(long = "category", short = 'c', value_name = "ID", value_delimiter = ',')]
    pub categories: Vec<u32>,

    /// Catalog region code. Defaults to MADSHUS_DEFAULT_REGION.
    #[arg(long, short)]
    pub region: Option<String>,

    /// Content locale. Defaults to MADSHUS_DEFAULT_LOCALE.
    #[arg(long, short)]
    pub locale: Option<String>,

    /// Stop after this many distinct products have been collected
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,
}

/// Run-scoped options resolved from flags and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollectOptions {
    pub region: String,
    pub locale: String,
    pub categories: Vec<u32>,
    pub limit: Option<u64>,
}

impl CollectOptions {
    pub(crate) fn resolve(args: &CollectArgs, config: &AppConfig) -> anyhow::Result<Self> {
        let region = match args.region.as_deref() {
            Some(raw) => madshus_core::config::normalize_region("--region", raw)?,
            None => config.default_region.clone(),
        };

        let locale = match args.locale.as_deref().map(str::trim) {
            Some("") => anyhow::bail!("--locale must not be empty"),
            Some(locale) => locale.to_string(),
            None => config.default_locale.clone(),
        };

        let categories = if args.categories.is_empty() {
            DEFAULT_CATEGORIES.collect()
        } else {
            args.categories.clone()
        };

        Ok(Self {
            region,
            locale,
            categories,
            limit: args.limit,
        })
    }
}

/// Attempt to mark a collection run as failed, logging any secondary error.
async fn fail_run_best_effort(pool: &SqlitePool, run_id: i64, message: String) {
    if let Err(mark_err) = madshus_db::fail_collection_run(pool, run_id, &message).await {
        tracing::error!(run_id, error = %mark_err, "failed to mark collection run as failed");
    }
}

/// Runs one collection pass and records it in `collection_runs`.
///
/// # Errors
///
/// Returns an error if the options are invalid, the catalog client cannot be
/// built, the run row cannot be created or transitioned, or every requested
/// category failed.
pub(crate) async fn run_collect(
    pool: &SqlitePool,
    config: &AppConfig,
    args: &CollectArgs,
) -> anyhow::Result<CollectionOutcome> {
    let options = CollectOptions::resolve(args, config)?;
    let client = CatalogClient::new(
        &config.graphql_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let run = madshus_db::create_collection_run(pool, "products", "cli").await?;
    if let Err(e) = madshus_db::start_collection_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }

    let category_count = options.categories.len();
    let outcome = CollectionEngine::new(pool, &client, config, options)
        .run()
        .await;

    if category_count > 0
        && outcome.failed_categories.len() == category_count
        && outcome.collected_uids.is_empty()
    {
        let message = format!("all {category_count} categories failed collection");
        fail_run_best_effort(pool, run.id, message.clone()).await;
        anyhow::bail!("{message}");
    }

    let records = i64::try_from(outcome.collected_uids.len()).unwrap_or(i64::MAX);
    if let Err(err) = madshus_db::complete_collection_run(pool, run.id, records).await {
        fail_run_best_effort(pool, run.id, format!("{err:#}")).await;
        return Err(err.into());
    }

    println!(
        "collected {} products ({} created, {} updated) across {category_count} categories",
        outcome.collected_uids.len(),
        outcome.created,
        outcome.updated,
    );
    if !outcome.failed_categories.is_empty() {
        let ids: Vec<String> = outcome
            .failed_categories
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("failed categories: {}", ids.join(","));
    }
    for url in &outcome.failed_urls {
        println!("failed product: {url}");
    }

    Ok(outcome)
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
