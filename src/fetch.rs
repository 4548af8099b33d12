use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::GrabError;
use crate::settings::Settings;

/// Anything that can turn a URL into page markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, GrabError>;
}

/// `reqwest`-backed page source.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self, GrabError> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|source| GrabError::Network {
            url: settings.base_url.clone(),
            source,
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn get(&self, url: &str) -> Result<String, GrabError> {
        let network = |source: reqwest::Error| GrabError::Network {
            url: url.to_string(),
            source,
        };

        info!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(network)?;

        // Error pages still get parsed; an unknown year is just an empty listing.
        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status, url);
        }

        response.text().await.map_err(network)
    }
}
