//! Filter expressions for the grid query's `queryString` variable.
//!
//! The API parses this string itself: a JSON filter object followed by
//! `&`-joined paging, sort, and locale parameters. Field order and spacing
//! must stay exactly as produced here.

/// Parameters of one grid page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridQuery<'a> {
    pub category: u32,
    /// Lower-case region code; also selects the per-region sort field.
    pub region: &'a str,
    pub locale: &'a str,
    /// Page size.
    pub limit: u32,
    /// Number of entries to skip.
    pub skip: u64,
}

/// Builds the `queryString` for one page of a category listing.
#[must_use]
pub fn grid_query_string(query: &GridQuery<'_>) -> String {
    let GridQuery {
        category,
        region,
        locale,
        limit,
        skip,
    } = *query;
    format!(
        "{{\"bc_products.{region}.categories\":{{\"$in\":[{category}]}},\"regions\":{{\"$in\":[\"{region}\"]}}}}\
         &limit={limit}&skip={skip}&include_count=true&asc=bc_products.{region}.sort_order\
         &locale={locale}&include_fallback=true"
    )
}
