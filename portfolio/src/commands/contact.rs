use anyhow::bail;
use clap::Subcommand;
use portfolio_client::{ContactFormFields, Feedback};
use portfolio_config::Config;
use portfolio_di::Provide;
use tracing::info;
use url::Url;

use crate::environment::{types::ContactForm, ConfigProvider};

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form, like a visitor would
    #[command(aliases(["s"]))]
    Send {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Base url of the mail relay, overrides `client.relay_url`
        #[arg(long, env = "PORTFOLIO_RELAY_URL")]
        relay_url: Option<Url>,
    },
}

impl ContactCommand {
    pub async fn invoke(self, mut config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                message,
                relay_url,
            } => {
                if let Some(relay_url) = relay_url {
                    config.client.relay_url = relay_url;
                }
                send(
                    config,
                    ContactFormFields {
                        name,
                        email,
                        message,
                    },
                )
                .await
            }
        }
    }
}

async fn send(config: Config, fields: ContactFormFields) -> anyhow::Result<()> {
    let mut provider = ConfigProvider::new(&config)?;
    let mut form: ContactForm = provider.provide();
    *form.fields_mut() = fields;

    info!("Submitting contact message to {}", config.client.relay_url);
    match form.submit().await {
        Feedback::Success(message) => {
            println!("{message}");
            Ok(())
        }
        Feedback::Alert(alert) => bail!("{alert}"),
    }
}
