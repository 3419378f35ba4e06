use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use portfolio_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    Sensitive,
};
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

/// Prefix for environment variables overriding single config values, e.g.
/// `PORTFOLIO_EMAIL__PASSWORD` for `email.password`.
pub const ENV_PREFIX: &str = "PORTFOLIO";

/// Load the config from the files listed in `PORTFOLIO_CONFIG` (or the
/// bundled `config.toml`), overridden by `PORTFOLIO_*` environment variables.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect::<Vec<_>>(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };
    load_paths(&paths, true)
}

/// Load the config from the given files only.
pub fn load_paths(paths: &[impl AsRef<Path>], with_env: bool) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = if with_env {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
    } else {
        builder
    };

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
    pub client: ClientConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub real_ip: Option<HttpRealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub email: EmailAddress,
    pub rate_limit: Option<ContactRateLimitConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub relay_url: Url,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Sensitive<String>,
}
