use crate::{handler::Mode, Error};
use aws_config::retry::RetryConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plain environment variable naming the table that receives image records.
pub const TABLE_ENV: &str = "TABLE";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_log")]
    pub log: String,
    /// Target table. Checked when an object is processed, not at load time.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override for both collaborators, e.g. a LocalStack URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
}

pub fn default_log() -> String {
    "image_labeler_lambda=info".to_string()
}

pub fn default_retry_max_attempts() -> u32 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: default_log(),
            table: None,
            mode: Mode::default(),
            region: None,
            endpoint: None,
            retry_max_attempts: default_retry_max_attempts(),
        }
    }
}

impl Settings {
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = path {
            builder = builder
                .add_source(File::with_name(&file.as_ref().to_string_lossy()).required(false));
        }
        builder
            .add_source(Environment::with_prefix("LABELER").separator("__"))
            .set_override_option("table", std::env::var(TABLE_ENV).ok())?
            .build()
            .and_then(|config| config.try_deserialize())
    }

    pub fn table(&self) -> Result<&str, Error> {
        self.table
            .as_deref()
            .filter(|table| !table.is_empty())
            .ok_or_else(|| Error::Config(format!("{TABLE_ENV} is not configured")))
    }

    pub fn retry_config(&self) -> RetryConfig {
        if self.retry_max_attempts <= 1 {
            RetryConfig::disabled()
        } else {
            RetryConfig::standard().with_max_attempts(self.retry_max_attempts)
        }
    }
}
