use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::env;

pub const DEFAULT_ATTIO_BASE_URL: &str = "https://api.attio.com/v2";
pub const DEFAULT_REGISTRY_BASE_URL: &str = "https://glacier-api.avax.network";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 20;

/// Runtime configuration, read once from the environment at startup and
/// passed by reference into the engine. No other configuration surface.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub attio_token: String,
    pub attio_object: String,
    pub attio_list_id: String,
    pub attio_base_url: String,
    pub registry_base_url: String,
    pub concurrent_requests: usize,
}

impl SyncConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            attio_token: require_var("ATTIO_TOKEN")?,
            attio_object: require_var("ATTIO_OBJ")?,
            attio_list_id: require_var("ATTIO_LIST_ID")?,
            attio_base_url: env::var("ATTIO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ATTIO_BASE_URL.to_string()),
            registry_base_url: env::var("REGISTRY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_REGISTRY_BASE_URL.to_string()),
            concurrent_requests: env::var("CONCURRENT_REQUESTS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| SyncError::MissingConfigError {
        field: name.to_string(),
    })
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("attio_token", &self.attio_token)?;
        validate_non_empty_string("attio_object", &self.attio_object)?;
        validate_non_empty_string("attio_list_id", &self.attio_list_id)?;
        validate_url("attio_base_url", &self.attio_base_url)?;
        validate_url("registry_base_url", &self.registry_base_url)?;
        validate_range(
            "concurrent_requests",
            self.concurrent_requests,
            1,
            100,
        )?;
        Ok(())
    }
}
