//! Inbound command messages.
//!
//! A message is either a bare action name or an object
//! `{type?, action | modelAction | id, payload?}`. Objects with a `type`
//! other than the expected tag are dropped, as is anything without a string
//! action name.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct InboundMessage {
    pub action: String,
    pub payload: Option<Value>,
}

/// Decode `data`. `expected_type` is the tag structured messages must carry
/// if they carry one at all.
pub fn parse_message(data: &Value, expected_type: &str) -> Option<InboundMessage> {
    match data {
        Value::String(action) => Some(InboundMessage {
            action: action.clone(),
            payload: None,
        }),
        Value::Object(fields) => {
            if let Some(kind) = fields.get("type").filter(|kind| is_truthy(kind)) {
                if kind.as_str() != Some(expected_type) {
                    log::debug!("Ignoring message of type {}", kind);
                    return None;
                }
            }
            // the first present key wins, even if it is not a string
            let action = ["action", "modelAction", "id"]
                .iter()
                .find_map(|key| fields.get(*key).filter(|value| !value.is_null()))?;
            let Value::String(action) = action else {
                log::debug!("Ignoring message with non-string action {}", action);
                return None;
            };
            Some(InboundMessage {
                action: action.clone(),
                payload: fields.get("payload").filter(|p| !p.is_null()).cloned(),
            })
        }
        _ => {
            log::debug!("Ignoring malformed message {}", data);
            None
        }
    }
}

/// Decode a JSON document. Text that is not JSON is taken as a bare action name.
pub fn parse_message_str(text: &str, expected_type: &str) -> Option<InboundMessage> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => parse_message(&value, expected_type),
        Err(_) => parse_message(&Value::String(text.to_string()), expected_type),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
