use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::ads::AdMarkupPolicy;
use crate::benefits::{PolicyLoadError, PolicyTable};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: PolicyConfig,
    pub ads: AdsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let policy_file = env::var("APP_POLICY_FILE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let allowed_tags = list_var("APP_AD_ALLOWED_TAGS")?;
        let allowed_attributes = list_var("APP_AD_ALLOWED_ATTRIBUTES")?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            policy: PolicyConfig { file: policy_file },
            ads: AdsConfig {
                allowed_tags,
                allowed_attributes,
            },
        })
    }
}

/// Comma-separated override; unset means "keep the default", set-but-empty is an error.
fn list_var(variable: &'static str) -> Result<Option<Vec<String>>, ConfigError> {
    let Ok(raw) = env::var(variable) else {
        return Ok(None);
    };

    let items: Vec<String> = raw
        .split(',')
        .map(|item| item.trim().to_ascii_lowercase())
        .filter(|item| !item.is_empty())
        .collect();
    if items.is_empty() {
        return Err(ConfigError::EmptyAllowList { variable });
    }

    Ok(Some(items))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Where the benefit constants come from.
#[derive(Debug, Clone, Default)]
pub struct PolicyConfig {
    pub file: Option<PathBuf>,
}

impl PolicyConfig {
    /// The configured policy file, or the built-in table when none is set.
    pub fn load_table(&self) -> Result<PolicyTable, PolicyLoadError> {
        match &self.file {
            Some(path) => PolicyTable::from_path(path),
            None => Ok(PolicyTable::standard()),
        }
    }
}

/// Allow-list overrides for ad markup.
#[derive(Debug, Clone, Default)]
pub struct AdsConfig {
    pub allowed_tags: Option<Vec<String>>,
    pub allowed_attributes: Option<Vec<String>>,
}

impl AdsConfig {
    pub fn markup_policy(&self) -> AdMarkupPolicy {
        let defaults = AdMarkupPolicy::default();
        let allowed_tags = match &self.allowed_tags {
            Some(tags) => AdMarkupPolicy::new(tags, Vec::<String>::new()).allowed_tags,
            None => defaults.allowed_tags,
        };
        let allowed_attributes = match &self.allowed_attributes {
            Some(attributes) => {
                AdMarkupPolicy::new(Vec::<String>::new(), attributes).allowed_attributes
            }
            None => defaults.allowed_attributes,
        };

        AdMarkupPolicy {
            allowed_tags,
            allowed_attributes,
            allow_data_attributes: defaults.allow_data_attributes,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyAllowList { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyAllowList { variable } => {
                write!(f, "{variable} must list at least one name when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyAllowList { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
