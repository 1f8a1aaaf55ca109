/// Process-wide settings, built once at startup and passed down by reference.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub graphql_url: String,
    /// Lower-cased catalog region, e.g. `no`.
    pub default_region: String,
    pub default_locale: String,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Number of grid entries requested per page.
    pub grid_page_size: u32,
    pub inter_request_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("graphql_url", &self.graphql_url)
            .field("default_region", &self.default_region)
            .field("default_locale", &self.default_locale)
            .field("log_level", &self.log_level)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("grid_page_size", &self.grid_page_size)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .finish()
    }
}
