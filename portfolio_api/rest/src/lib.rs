use std::{net::SocketAddr, sync::Arc};

pub use axum::http::HeaderName;
use axum::Router;
use portfolio_core_contact_contracts::ContactFeatureService;
use portfolio_core_health_contracts::HealthFeatureService;
use portfolio_di::Build;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    config: RestServerConfig,
    health: Health,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub real_ip_config: Option<Arc<RestServerRealIpConfig>>,
}

/// Take the client address from `header` for requests coming from `set_from`
/// (usually a reverse proxy).
#[derive(Debug, Clone)]
pub struct RestServerRealIpConfig {
    pub header: HeaderName,
    pub set_from: std::net::IpAddr,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(config: RestServerConfig, health: Health, contact: Contact) -> Self {
        Self {
            config,
            health,
            contact,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        self.serve_with_listener(listener).await
    }

    pub async fn serve_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("Listening on {}", listener.local_addr()?);
        let router = self.router();
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = router.layer(CorsLayer::permissive());
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(self.config.real_ip_config)(router);
        middlewares::request_id::add(router)
    }
}
