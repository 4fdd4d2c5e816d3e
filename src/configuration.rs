use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "nsot";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "NSOT_CONFIG_DIR";
/// Endpoint used when neither the file nor the command line names one.
pub const DEFAULT_URL: &str = "http://localhost:8990/api";
pub const DEFAULT_TIMEOUT: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("invalid value {value:?} for property {name:?}")]
    InvalidPropertyValue { name: String, value: String },
}

fn default_url() -> Url {
    Url::parse(DEFAULT_URL).expect("DEFAULT_URL is a valid absolute URL")
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

/// Settings for reaching the API: endpoint, identity, request timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_url")]
    url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default = "default_timeout")]
    timeout: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            url: default_url(),
            email: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Configuration {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Replace the endpoint for this invocation.
    pub fn set_url(&mut self, url: &str) -> Result<(), ConfigurationError> {
        self.url = Url::parse(url).map_err(|_| ConfigurationError::InvalidPropertyValue {
            name: "url".to_string(),
            value: url.to_string(),
        })?;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = Some(email.to_string());
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(mut default_config_file_path) => {
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load the default configuration file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {}...", default_file_path.display());

        if !default_file_path.exists() {
            debug!("Configuration file not found, using defaults");
            return Ok(Configuration::default());
        }

        Configuration::load_from_file(default_file_path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        let configuration = fs::read_to_string(&path).map_err(|cause| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }
        })?;

        serde_yaml::from_str(&configuration).map_err(|cause| ConfigurationError::FailedToLoadData {
            cause: Box::new(cause),
        })
    }
}
