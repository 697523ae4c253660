pub mod app_config;
pub mod config;
pub mod error;
pub mod features;
pub mod profile;

pub use app_config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_IG_APP_ID, DEFAULT_USER_AGENT};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use features::{extract, FeatureRecord};
pub use profile::{Credentials, RawProfile};
