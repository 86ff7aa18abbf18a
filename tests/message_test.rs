use flow_configurator::{
    config::MODEL_ACTION,
    message::{InboundMessage, parse_message, parse_message_str},
};
use serde_json::json;

fn action(name: &str) -> Option<InboundMessage> {
    Some(InboundMessage {
        action: name.to_string(),
        payload: None,
    })
}

#[test]
fn bare_string_is_an_action_name() {
    assert_eq!(parse_message(&json!("dustBox"), MODEL_ACTION), action("dustBox"));
}

#[test]
fn any_of_the_name_keys_is_accepted() {
    for key in ["action", "modelAction", "id"] {
        let data = json!({ key: "wheelsButton" });
        assert_eq!(parse_message(&data, MODEL_ACTION), action("wheelsButton"), "{key}");
    }
}

#[test]
fn action_key_takes_precedence() {
    let data = json!({"id": "c", "modelAction": "b", "action": "a"});
    assert_eq!(parse_message(&data, MODEL_ACTION), action("a"));
    let data = json!({"id": "c", "modelAction": "b", "action": null});
    assert_eq!(parse_message(&data, MODEL_ACTION), action("b"));
}

#[test]
fn payload_is_carried_along() {
    let data = json!({"type": MODEL_ACTION, "action": "dustBox", "payload": {"speed": 2}});
    let message = parse_message(&data, MODEL_ACTION);
    assert_eq!(
        message,
        Some(InboundMessage {
            action: "dustBox".to_string(),
            payload: Some(json!({"speed": 2})),
        })
    );
}

#[test]
fn foreign_message_types_are_ignored() {
    let data = json!({"type": "RESIZE", "action": "dustBox"});
    assert_eq!(parse_message(&data, MODEL_ACTION), None);
    // a falsy type counts as absent
    let data = json!({"type": "", "action": "dustBox"});
    assert_eq!(parse_message(&data, MODEL_ACTION), action("dustBox"));
    let data = json!({"type": 0, "action": "dustBox"});
    assert_eq!(parse_message(&data, MODEL_ACTION), action("dustBox"));
}

#[test]
fn malformed_messages_are_ignored() {
    assert_eq!(parse_message(&json!(42), MODEL_ACTION), None);
    assert_eq!(parse_message(&json!(null), MODEL_ACTION), None);
    assert_eq!(parse_message(&json!(["dustBox"]), MODEL_ACTION), None);
    assert_eq!(parse_message(&json!({"payload": 1}), MODEL_ACTION), None);
    // the first present key decides, even when it is not a string
    assert_eq!(parse_message(&json!({"action": 7, "id": "dustBox"}), MODEL_ACTION), None);
}

#[test]
fn text_messages() {
    assert_eq!(
        parse_message_str(r#"{"modelAction":"brushBarButton"}"#, MODEL_ACTION),
        action("brushBarButton")
    );
    assert_eq!(parse_message_str("brushBarButton", MODEL_ACTION), action("brushBarButton"));
    assert_eq!(parse_message_str(r#""dustBox""#, MODEL_ACTION), action("dustBox"));
}
