use portfolio_core_contact_impl::ContactFeatureServiceImpl;
use portfolio_core_health_impl::HealthFeatureServiceImpl;
use portfolio_email_impl::EmailServiceImpl;
use portfolio_extern_impl::relay::RelayApiServiceImpl;
use portfolio_shared_impl::{rate_limit::RateLimitServiceImpl, time::TimeServiceImpl};

// API
pub type RestServer = portfolio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Client
pub type ContactForm = portfolio_client::ContactForm<RelayApi>;

// Email
pub type Email = EmailServiceImpl;

// Extern
pub type RelayApi = RelayApiServiceImpl;

// Shared
pub type Time = TimeServiceImpl;
pub type RateLimit = RateLimitServiceImpl<Time>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<RateLimit, Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email>;
