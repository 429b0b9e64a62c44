//! Runtime settings read once at startup.
//!
//! Values come from an optional YAML file merged with environment
//! variables (environment wins). The resulting [`Settings`] is immutable and
//! handed to each client constructor.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_SEND_LIMIT: usize = 4;
pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";
pub const DEFAULT_AIRTABLE_BASE_URL: &str = "https://api.airtable.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sendgrid_api_key: String,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    #[serde(default = "default_send_limit")]
    pub send_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_sendgrid_base_url")]
    pub sendgrid_base_url: String,
    #[serde(default = "default_airtable_base_url")]
    pub airtable_base_url: String,
    /// Exit with a failure code when any send could not be synced.
    #[serde(default)]
    pub fail_on_error: bool,
}

fn default_send_limit() -> usize {
    DEFAULT_SEND_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_sendgrid_base_url() -> String {
    DEFAULT_SENDGRID_BASE_URL.to_string()
}

fn default_airtable_base_url() -> String {
    DEFAULT_AIRTABLE_BASE_URL.to_string()
}

impl Settings {
    /// Loads settings from `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.send_limit == 0 {
            return Err(Error::Config("send_limit must be positive".to_owned()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be positive".to_owned(),
            ));
        }
        let required = [
            ("sendgrid_api_key", &self.sendgrid_api_key),
            ("airtable_api_key", &self.airtable_api_key),
            ("airtable_base_id", &self.airtable_base_id),
            ("airtable_table_name", &self.airtable_table_name),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(Error::Config(format!("Missed {name}")));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
