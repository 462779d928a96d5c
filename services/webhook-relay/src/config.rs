use std::time::Duration;

use relay_common::{env_or, env_required, MissingEnv};

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v22.0";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Missing(#[from] MissingEnv),
    #[error("PHONE_NUMBER_ID or WHATSAPP_API_URL is required")]
    MessagingEndpoint,
}

/// Process-wide settings, read once in `main` and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub port: u16,
    pub verify_token: String,
    pub messaging_url: String,
    pub messaging_token: String,
    pub prediction_url: String,
    pub outbound_timeout: Option<Duration>,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_or("PORT", 8000u16);
        // MYTOKEN is the name older deployments use.
        let verify_token = env_required(&["VERIFY_TOKEN", "MYTOKEN"])?;
        let messaging_url = match env_required(&["WHATSAPP_API_URL"]) {
            Ok(url) => url,
            Err(_) => {
                let phone_number_id =
                    env_required(&["PHONE_NUMBER_ID"]).map_err(|_| ConfigError::MessagingEndpoint)?;
                messages_url(&phone_number_id)
            }
        };
        let messaging_token = env_required(&["WHATSAPP_TOKEN"])?;
        let prediction_url = env_required(&["PREDICTION_API_URL"])?;
        let timeout_secs = env_or("OUTBOUND_TIMEOUT_SECS", 0u64);

        Ok(Self {
            port,
            verify_token,
            messaging_url,
            messaging_token,
            prediction_url,
            outbound_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

pub fn messages_url(phone_number_id: &str) -> String {
    format!("{GRAPH_API_BASE}/{}/messages", phone_number_id.trim())
}
