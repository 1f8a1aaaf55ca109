//! Database operations for `products` and its four child tables.
//!
//! A product's child rows (`product_specs`, `product_prices`,
//! `product_technologies`, `product_features`) always mirror the most recent
//! payload: every upsert deletes and reinserts all four sets inside the same
//! transaction as the root row.

use chrono::{DateTime, Utc};
use madshus_core::{
    NormalizedProduct, ProductFeature, ProductPrice, ProductRecord, ProductSpec, ProductTechnology,
};
use sqlx::{SqliteConnection, SqlitePool};

use crate::DbError;

const DELETE_CHILDREN: [&str; 4] = [
    "DELETE FROM product_specs WHERE product_uid = ?",
    "DELETE FROM product_prices WHERE product_uid = ?",
    "DELETE FROM product_technologies WHERE product_uid = ?",
    "DELETE FROM product_features WHERE product_uid = ?",
];

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub uid: String,
    pub title: String,
    pub display_title: String,
    pub url: String,
    /// `NULL` when the payload had no description text.
    pub description: Option<String>,
    pub tagline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSpecRow {
    pub id: i64,
    pub product_uid: String,
    pub spec_id: String,
    pub title: String,
    pub value: Option<String>,
}

/// A row from `product_prices`. Blank prices are never stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductPriceRow {
    pub id: i64,
    pub product_uid: String,
    pub region: String,
    pub price: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductTechnologyRow {
    pub id: i64,
    pub product_uid: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductFeatureRow {
    pub id: i64,
    pub product_uid: String,
    pub group_title: Option<String>,
    pub content: String,
}

/// Whether [`upsert_product`] inserted a new product or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Creates or updates a product and replaces all four of its child sets.
///
/// Runs as a single transaction: the root row is inserted or overwritten
/// (`ON CONFLICT (uid)`), then [`replace_product_children`] rewrites the
/// child tables. Any failure drops the transaction uncommitted, leaving the
/// previous state of the product untouched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement or the commit fails, including
/// a `url` already owned by a different `uid`.
pub async fn upsert_product(
    pool: &SqlitePool,
    product: &NormalizedProduct,
) -> Result<UpsertOutcome, DbError> {
    let mut tx = pool.begin().await?;

    let existing: Option<String> =
        sqlx::query_scalar::<_, String>("SELECT uid FROM products WHERE uid = ?")
            .bind(&product.uid)
            .fetch_optional(&mut *tx)
            .await?;

    let now = Utc::now();
    let description = Some(product.description.as_str()).filter(|d| !d.is_empty());

    sqlx::query(
        "INSERT INTO products \
             (uid, title, display_title, url, description, tagline, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT (uid) DO UPDATE SET \
             title         = excluded.title, \
             display_title = excluded.display_title, \
             url           = excluded.url, \
             description   = excluded.description, \
             tagline       = excluded.tagline, \
             updated_at    = excluded.updated_at",
    )
    .bind(&product.uid)
    .bind(&product.title)
    .bind(&product.display_title)
    .bind(&product.url)
    .bind(description)
    .bind(product.tagline.as_deref())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    replace_product_children(&mut *tx, &product.uid, product).await?;

    tx.commit().await?;

    Ok(if existing.is_some() {
        UpsertOutcome::Updated
    } else {
        UpsertOutcome::Created
    })
}

/// Deletes every spec, price, technology, and feature row for `uid` and
/// inserts the rows derived from `product`.
///
/// Takes a connection rather than a pool so the caller owns the transaction
/// boundary; run it inside the same transaction as the root-row write.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any delete or insert fails.
pub async fn replace_product_children(
    conn: &mut SqliteConnection,
    uid: &str,
    product: &NormalizedProduct,
) -> Result<(), DbError> {
    for statement in DELETE_CHILDREN {
        sqlx::query(statement)
            .bind(uid)
            .execute(&mut *conn)
            .await?;
    }

    for spec in &product.specs {
        sqlx::query(
            "INSERT INTO product_specs (product_uid, spec_id, title, value) VALUES (?, ?, ?, ?)",
        )
        .bind(uid)
        .bind(&spec.spec_id)
        .bind(&spec.title)
        .bind(spec.value.as_deref())
        .execute(&mut *conn)
        .await?;
    }

    for price in product.storable_prices() {
        sqlx::query("INSERT INTO product_prices (product_uid, region, price) VALUES (?, ?, ?)")
            .bind(uid)
            .bind(&price.region)
            .bind(&price.price)
            .execute(&mut *conn)
            .await?;
    }

    for tech in &product.technologies {
        sqlx::query(
            "INSERT INTO product_technologies (product_uid, title, content) VALUES (?, ?, ?)",
        )
        .bind(uid)
        .bind(&tech.title)
        .bind(&tech.content)
        .execute(&mut *conn)
        .await?;
    }

    for feature in &product.features {
        sqlx::query(
            "INSERT INTO product_features (product_uid, group_title, content) VALUES (?, ?, ?)",
        )
        .bind(uid)
        .bind(feature.group_title.as_deref())
        .bind(&feature.content)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetches the root row for `uid`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_by_uid(pool: &SqlitePool, uid: &str) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT uid, title, display_title, url, description, tagline, created_at, updated_at \
         FROM products \
         WHERE uid = ?",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns every product uid in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_product_uids(pool: &SqlitePool) -> Result<Vec<String>, DbError> {
    let uids = sqlx::query_scalar::<_, String>("SELECT uid FROM products ORDER BY rowid")
        .fetch_all(pool)
        .await?;
    Ok(uids)
}

/// Loads a product with all of its child rows, children in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any query fails.
pub async fn load_product_record(
    pool: &SqlitePool,
    uid: &str,
) -> Result<Option<ProductRecord>, DbError> {
    let Some(product) = find_by_uid(pool, uid).await? else {
        return Ok(None);
    };

    let specs = sqlx::query_as::<_, ProductSpecRow>(
        "SELECT id, product_uid, spec_id, title, value \
         FROM product_specs WHERE product_uid = ? ORDER BY id",
    )
    .bind(uid)
    .fetch_all(pool)
    .await?;

    let prices = sqlx::query_as::<_, ProductPriceRow>(
        "SELECT id, product_uid, region, price \
         FROM product_prices WHERE product_uid = ? ORDER BY id",
    )
    .bind(uid)
    .fetch_all(pool)
    .await?;

    let technologies = sqlx::query_as::<_, ProductTechnologyRow>(
        "SELECT id, product_uid, title, content \
         FROM product_technologies WHERE product_uid = ? ORDER BY id",
    )
    .bind(uid)
    .fetch_all(pool)
    .await?;

    let features = sqlx::query_as::<_, ProductFeatureRow>(
        "SELECT id, product_uid, group_title, content \
         FROM product_features WHERE product_uid = ? ORDER BY id",
    )
    .bind(uid)
    .fetch_all(pool)
    .await?;

    Ok(Some(ProductRecord {
        uid: product.uid,
        title: product.title,
        display_title: product.display_title,
        url: product.url,
        description: product.description,
        tagline: product.tagline,
        specs: specs
            .into_iter()
            .map(|r| ProductSpec {
                spec_id: r.spec_id,
                title: r.title,
                value: r.value,
            })
            .collect(),
        prices: prices
            .into_iter()
            .map(|r| ProductPrice {
                region: r.region,
                price: r.price,
            })
            .collect(),
        technologies: technologies
            .into_iter()
            .map(|r| ProductTechnology {
                title: r.title,
                content: r.content,
            })
            .collect(),
        features: features
            .into_iter()
            .map(|r| ProductFeature {
                group_title: r.group_title,
                content: r.content,
            })
            .collect(),
    }))
}

/// Loads the products named by `uids`, in the given order, or every product
/// when `uids` is `None`. Unknown uids are skipped.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any query fails.
pub async fn load_product_records(
    pool: &SqlitePool,
    uids: Option<&[String]>,
) -> Result<Vec<ProductRecord>, DbError> {
    let all;
    let uids = match uids {
        Some(uids) => uids,
        None => {
            all = list_product_uids(pool).await?;
            all.as_slice()
        }
    };

    let mut records = Vec::with_capacity(uids.len());
    for uid in uids {
        if let Some(record) = load_product_record(pool, uid).await? {
            records.push(record);
        }
    }
    Ok(records)
}
