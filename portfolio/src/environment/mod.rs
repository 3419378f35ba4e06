use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use portfolio_api_rest::{HeaderName, RestServerConfig, RestServerRealIpConfig};
use portfolio_config::Config;
use portfolio_core_contact_impl::ContactFeatureConfig;
use portfolio_core_health_impl::HealthFeatureConfig;
use portfolio_di::provider;
use portfolio_extern_impl::relay::RelayApiServiceConfig;
use portfolio_shared_impl::rate_limit::{RateLimit, RateLimitServiceConfig};
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Extern
            RelayApiServiceConfig,

            // Shared
            RateLimitServiceConfig,

            // Core
            ContactFeatureConfig,
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Extern
        relay_api_service_config: RelayApiServiceConfig,

        // Shared
        rate_limit_service_config: RateLimitServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let real_ip_config = match &config.http.real_ip {
            Some(real_ip) => Some(Arc::new(RestServerRealIpConfig {
                header: real_ip
                    .header
                    .parse::<HeaderName>()
                    .with_context(|| format!("Invalid real ip header: {:?}", real_ip.header))?,
                set_from: real_ip.set_from,
            })),
            None => None,
        };

        let rest_server_config = RestServerConfig {
            addr: SocketAddr::new(config.http.host, config.http.port),
            real_ip_config,
        };

        // Extern
        let relay_api_service_config = RelayApiServiceConfig::new(&config.client.relay_url)?;

        // Shared
        let rate_limit_service_config = RateLimitServiceConfig {
            limit: config
                .contact
                .rate_limit
                .as_ref()
                .map(|rate_limit| {
                    RateLimit::new(rate_limit.max_requests, rate_limit.window.into())
                        .context("Invalid contact.rate_limit")
                })
                .transpose()?,
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            email: Arc::new(config.contact.email.clone().into()),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Extern
            relay_api_service_config,

            // Shared
            rate_limit_service_config,

            // Core
            contact_feature_config,
            health_feature_config,
        })
    }
}
