use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Published Google Sheet holding the university admission criteria.
pub const DEFAULT_CATALOG_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRUIIUfVCv_71kTJSiCt0XINMCprn2X5i2yeDpMLiUodbYTOoeurF4RelnyLt9tv3KN_keeoQpfmZwR/pub?output=csv";

/// Upper bound on the catalog response body (5 MiB).
pub const DEFAULT_CATALOG_MAX_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage read from `APP_ENV`. Unknown labels fall back to development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_label(label: &str) -> Self {
        let label = label.to_ascii_lowercase();
        match label.as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the checker reads from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the environment on top of it.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = setting("APP_ENV")
            .map(|label| AppEnvironment::from_label(&label))
            .unwrap_or_default();

        let port = parsed_setting("APP_PORT", ConfigError::InvalidPort)?;
        let server = ServerConfig {
            host: setting("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
        };

        let log_level = setting("APP_LOG_LEVEL");
        let telemetry = TelemetryConfig {
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            catalog: CatalogConfig::from_env()?,
        })
    }
}

/// Bind address for `serve`. CLI flags may override both fields.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = match self.host.as_str() {
            host if host.eq_ignore_ascii_case("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Where the admission catalog comes from and how much of it we accept.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub url: String,
    pub max_bytes: usize,
    /// `None` leaves the request without a deadline.
    pub timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            max_bytes: DEFAULT_CATALOG_MAX_BYTES,
            timeout: None,
        }
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_bytes = match parsed_setting::<usize>(
            "CATALOG_MAX_BYTES",
            ConfigError::InvalidCatalogMaxBytes,
        )? {
            Some(0) => return Err(ConfigError::InvalidCatalogMaxBytes),
            Some(bytes) => bytes,
            None => defaults.max_bytes,
        };

        let timeout =
            parsed_setting::<u64>("CATALOG_TIMEOUT_SECS", ConfigError::InvalidCatalogTimeout)?
                .map(Duration::from_secs);

        Ok(Self {
            url: setting("CATALOG_URL").unwrap_or(defaults.url),
            max_bytes,
            timeout,
        })
    }
}

/// Trimmed value of `key`; blank counts as unset.
fn setting(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed_setting<T: FromStr>(key: &str, invalid: ConfigError) -> Result<Option<T>, ConfigError> {
    match setting(key) {
        Some(raw) => raw.parse().map(Some).map_err(|_| invalid),
        None => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("CATALOG_MAX_BYTES must be a positive byte count")]
    InvalidCatalogMaxBytes,
    #[error("CATALOG_TIMEOUT_SECS must be a whole number of seconds")]
    InvalidCatalogTimeout,
}
