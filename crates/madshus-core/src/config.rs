use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Validates a catalog region code and returns it lower-cased.
///
/// Region codes are embedded verbatim in the grid filter expression, so only
/// ASCII alphanumerics are accepted.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] naming `var` when the code is empty
/// or contains anything other than ASCII letters and digits.
pub fn normalize_region(var: &str, raw: &str) -> Result<String, ConfigError> {
    let region = raw.trim().to_ascii_lowercase();
    if region.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "region must not be empty".to_string(),
        });
    }
    if !region.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("region \"{raw}\" must be ASCII alphanumeric"),
        });
    }
    Ok(region)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = lookup("MADSHUS_DATABASE_URL")
        .or_else(|_| lookup("DATABASE_URL"))
        .unwrap_or_else(|_| "sqlite://madshus_products.db".to_string());
    let graphql_url = or_default("MADSHUS_GRAPHQL_URL", "https://madshus.com/api/graphql");

    let default_region = normalize_region(
        "MADSHUS_DEFAULT_REGION",
        &or_default("MADSHUS_DEFAULT_REGION", "no"),
    )?;

    let default_locale = or_default("MADSHUS_DEFAULT_LOCALE", "en-us")
        .trim()
        .to_string();
    if default_locale.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "MADSHUS_DEFAULT_LOCALE".to_string(),
            reason: "locale must not be empty".to_string(),
        });
    }

    let log_level = or_default("MADSHUS_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("MADSHUS_DB_MAX_CONNECTIONS", "5")?;
    let db_acquire_timeout_secs = parse_u64("MADSHUS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let request_timeout_secs = parse_u64("MADSHUS_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MADSHUS_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default(
        "MADSHUS_USER_AGENT",
        "madshus-products/0.1 (catalog-harvester)",
    );

    let grid_page_size = parse_u32("MADSHUS_GRID_PAGE_SIZE", "30")?;
    if grid_page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MADSHUS_GRID_PAGE_SIZE".to_string(),
            reason: "page size must be greater than zero".to_string(),
        });
    }
    let inter_request_delay_ms = parse_u64("MADSHUS_INTER_REQUEST_DELAY_MS", "0")?;

    Ok(AppConfig {
        database_url,
        graphql_url,
        default_region,
        default_locale,
        log_level,
        db_max_connections,
        db_acquire_timeout_secs,
        request_timeout_secs,
        user_agent,
        grid_page_size,
        inter_request_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
