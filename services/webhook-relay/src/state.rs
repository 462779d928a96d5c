use std::sync::Arc;

use crate::config::RelayConfig;
use crate::messaging::MessagingClient;
use crate::prediction::PredictionClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub prediction: PredictionClient,
    pub messaging: MessagingClient,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.outbound_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            prediction: PredictionClient::new(http.clone(), config.prediction_url.clone()),
            messaging: MessagingClient::new(
                http,
                config.messaging_url.clone(),
                config.messaging_token.clone(),
            ),
            config: Arc::new(config),
        })
    }
}
