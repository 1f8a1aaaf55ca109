use thiserror::Error;

use crate::types::GraphqlError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("{operation} returned {} GraphQL error(s): {}", .errors.len(), join_messages(.errors))]
    RemoteQuery {
        operation: String,
        errors: Vec<GraphqlError>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} response has no data")]
    MissingData { operation: String },

    #[error("product at {url} has no uid")]
    MissingUid { url: String },

    #[error("pagination limit reached for category {category}: exceeded {max_pages} pages")]
    PaginationLimit { category: u32, max_pages: usize },

    #[error("invalid GraphQL endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl CatalogError {
    /// Short label for the failure class, used as a structured log field.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::UnexpectedStatus { .. } => "transport",
            Self::RemoteQuery { .. } => "remote_query",
            Self::Deserialize { .. } | Self::MissingData { .. } | Self::MissingUid { .. } => {
                "decode"
            }
            Self::PaginationLimit { .. } => "pagination",
            Self::InvalidEndpoint { .. } => "config",
        }
    }

    /// Returns `true` when the API could not be reached or answered with a
    /// non-2xx status and no GraphQL error body.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.class() == "transport"
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
