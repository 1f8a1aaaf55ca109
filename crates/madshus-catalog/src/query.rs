//! GraphQL documents sent to the catalog endpoint.
//!
//! Selections are limited to the fields the normalizer reads.

pub const GRID_OPERATION: &str = "GetPaginatedProductGrid";
pub const PRODUCT_OPERATION: &str = "GetProduct";

pub const GET_PAGINATED_PRODUCT_GRID_QUERY: &str = r"
query GetPaginatedProductGrid($queryString: String!, $bcRegion: String!) {
  paginatedProductGrid(queryString: $queryString) {
    products {
      uid
      title
      display_title
      url
      regions
      bcProduct(bcRegion: $bcRegion) {
        id
      }
    }
    total
  }
}
";

pub const GET_PRODUCT_QUERY: &str = r"
query GetProduct($url: String!, $locale: String!, $bcRegion: String!) {
  product(url: $url, locale: $locale) {
    url
    uid
    description
    display_title
    title
    tagline
    updated_product_specs
    prices {
      au
      at
      ca
      cz
      fr
      de
      it
      jp
      nl
      no
      ru
      pl
      es
      se
      ch
      gb
    }
    details(locale: $locale) {
      technology {
        title
        content
      }
      feature_details {
        group_title
        group {
          title
          content
        }
      }
    }
    bcProduct(bcRegion: $bcRegion) {
      id
    }
  }
}
";
