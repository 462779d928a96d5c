use serde::Serialize;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct VerifyQuery {
    pub mode: Option<String>,
    pub challenge: Option<String>,
    pub verify_token: Option<String>,
}

impl VerifyQuery {
    /// Repeated keys keep their last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "hub.mode" => query.mode = Some(value),
                "hub.challenge" => query.challenge = Some(value),
                "hub.verify_token" => query.verify_token = Some(value),
                _ => {}
            }
        }
        query
    }
}

#[derive(Serialize)]
pub struct PredictionRequest<'a> {
    pub question: &'a str,
}

#[derive(Serialize)]
pub struct OutboundMessage<'a> {
    pub messaging_product: &'static str,
    pub to: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: OutboundText<'a>,
}

#[derive(Serialize)]
pub struct OutboundText<'a> {
    pub body: &'a str,
}

impl<'a> OutboundMessage<'a> {
    pub fn text(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: OutboundText { body },
        }
    }
}

#[derive(Serialize)]
pub struct RelayResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::VerifyQuery;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn last_repeated_value_wins() {
        let query = VerifyQuery::from_pairs(pairs(&[
            ("hub.mode", "unsubscribe"),
            ("hub.mode", "subscribe"),
            ("hub.challenge", "7"),
            ("other", "x"),
        ]));
        assert_eq!(
            query,
            VerifyQuery {
                mode: Some("subscribe".to_string()),
                challenge: Some("7".to_string()),
                verify_token: None,
            }
        );
    }
}
