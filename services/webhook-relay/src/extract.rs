//! Reads the first text message out of a WhatsApp notification.
//!
//! Only `entry[0].changes[0].value.messages[0]` is inspected; later entries,
//! changes and messages in the same notification are ignored.

use serde_json::Value;

#[derive(Debug, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub sender: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    Message(InboundMessage),
    /// Missing key, empty array, null or empty string along the path.
    Absent { field: &'static str },
    /// A value along the path has the wrong JSON type.
    Malformed {
        field: &'static str,
        expected: &'static str,
    },
}

pub fn extract_message(payload: &Value) -> Extraction {
    match first_message(payload) {
        Ok(message) => Extraction::Message(message),
        Err(outcome) => outcome,
    }
}

fn first_message(payload: &Value) -> Result<InboundMessage, Extraction> {
    let entry = first(key(payload, "entry")?, "entry")?;
    let change = first(key(entry, "changes")?, "entry[0].changes")?;
    let value = key(change, "value")?;
    let message = first(key(value, "messages")?, "value.messages")?;
    let text = string(key(key(message, "text")?, "body")?, "text.body")?;
    let sender = string(key(message, "from")?, "from")?;

    Ok(InboundMessage {
        text: text.to_string(),
        sender: sender.to_string(),
    })
}

fn key<'a>(parent: &'a Value, name: &'static str) -> Result<&'a Value, Extraction> {
    match parent {
        Value::Object(map) => map
            .get(name)
            .filter(|value| !value.is_null())
            .ok_or(Extraction::Absent { field: name }),
        _ => Err(Extraction::Malformed {
            field: name,
            expected: "object",
        }),
    }
}

fn first<'a>(value: &'a Value, field: &'static str) -> Result<&'a Value, Extraction> {
    match value {
        Value::Array(items) => items.first().ok_or(Extraction::Absent { field }),
        _ => Err(Extraction::Malformed {
            field,
            expected: "array",
        }),
    }
}

fn string<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, Extraction> {
    match value {
        Value::String(text) if text.is_empty() => Err(Extraction::Absent { field }),
        Value::String(text) => Ok(text),
        _ => Err(Extraction::Malformed {
            field,
            expected: "string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_message, Extraction, InboundMessage};
    use serde_json::json;

    fn notification(message: serde_json::Value) -> serde_json::Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "messages": [message]
                    }
                }]
            }]
        })
    }

    #[test]
    fn reads_text_and_sender_of_first_message() {
        let payload = notification(json!({
            "from": "1555000111",
            "type": "text",
            "text": { "body": "hi" }
        }));
        assert_eq!(
            extract_message(&payload),
            Extraction::Message(InboundMessage {
                text: "hi".to_string(),
                sender: "1555000111".to_string(),
            })
        );
    }

    #[test]
    fn missing_entry_is_absent() {
        let payload = json!({ "message": "test message" });
        assert_eq!(
            extract_message(&payload),
            Extraction::Absent { field: "entry" }
        );
    }

    #[test]
    fn status_update_without_messages_is_absent() {
        let payload = json!({
            "entry": [{ "changes": [{ "value": { "statuses": [{ "status": "delivered" }] } }] }]
        });
        assert_eq!(
            extract_message(&payload),
            Extraction::Absent { field: "messages" }
        );
    }

    #[test]
    fn empty_messages_array_is_absent() {
        let payload = json!({ "entry": [{ "changes": [{ "value": { "messages": [] } }] }] });
        assert_eq!(
            extract_message(&payload),
            Extraction::Absent {
                field: "value.messages"
            }
        );
    }

    #[test]
    fn image_message_without_text_is_absent() {
        let payload = notification(json!({ "from": "1555000111", "type": "image" }));
        assert_eq!(
            extract_message(&payload),
            Extraction::Absent { field: "text" }
        );
    }

    #[test]
    fn empty_body_is_absent() {
        let payload = notification(json!({ "from": "1555000111", "text": { "body": "" } }));
        assert_eq!(
            extract_message(&payload),
            Extraction::Absent { field: "text.body" }
        );
    }

    #[test]
    fn wrong_types_are_malformed() {
        let payload = json!({ "entry": { "changes": [] } });
        assert_eq!(
            extract_message(&payload),
            Extraction::Malformed {
                field: "entry",
                expected: "array"
            }
        );

        let payload = notification(json!({ "from": 1555000111, "text": { "body": "hi" } }));
        assert_eq!(
            extract_message(&payload),
            Extraction::Malformed {
                field: "from",
                expected: "string"
            }
        );

        assert_eq!(
            extract_message(&json!({ "entry": [1] })),
            Extraction::Malformed {
                field: "changes",
                expected: "object"
            }
        );

        assert!(matches!(
            extract_message(&json!([1, 2, 3])),
            Extraction::Malformed { field: "entry", .. }
        ));
    }
}
