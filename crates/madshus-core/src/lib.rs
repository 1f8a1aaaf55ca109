pub mod app_config;
pub mod config;
pub mod products;
pub mod render;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    NormalizedProduct, ProductFeature, ProductPrice, ProductRecord, ProductSpec, ProductTechnology,
};
pub use render::{render_markdown, render_text, FormattedProduct};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
