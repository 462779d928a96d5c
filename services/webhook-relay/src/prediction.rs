use serde_json::Value;

use crate::models::PredictionRequest;

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("prediction response is not JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    url: String,
}

impl PredictionClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// Ask the prediction service a question and return its JSON answer as-is.
    ///
    /// The HTTP status is not checked: an error document is still an answer.
    pub async fn ask(&self, question: &str) -> Result<Value, PredictionError> {
        let response = self
            .http
            .post(&self.url)
            .json(&PredictionRequest { question })
            .send()
            .await
            .map_err(PredictionError::Request)?;
        tracing::debug!(status = %response.status(), "prediction response");
        response.json::<Value>().await.map_err(PredictionError::Decode)
    }
}

/// Prefer the `text` field of an object answer, else render the whole answer.
pub fn reply_text(answer: &Value) -> String {
    match answer.get("text") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => match answer {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::reply_text;
    use serde_json::json;

    #[test]
    fn prefers_text_field() {
        let answer = json!({ "text": "hello!", "question": "hi", "chatId": "abc" });
        assert_eq!(reply_text(&answer), "hello!");
    }

    #[test]
    fn non_string_text_field_is_rendered_as_json() {
        assert_eq!(reply_text(&json!({ "text": 42 })), "42");
    }

    #[test]
    fn falls_back_to_whole_answer() {
        assert_eq!(
            reply_text(&json!({ "answer": "hello!" })),
            r#"{"answer":"hello!"}"#
        );
        assert_eq!(reply_text(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(reply_text(&json!("plain")), "plain");
    }
}
