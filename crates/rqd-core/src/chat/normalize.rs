use serde_json::Value;

use super::message::{ChatMessage, MessageKind, QuickButton};

/// Normalize a raw inbound payload into one of the closed message
/// shapes. Decoders are tried in fixed priority order — template shape,
/// then a tagged object with a known `type`, then a bare string — and the
/// first successful decode wins. Anything unrecognized degrades to a
/// `text` message carrying the serialized payload, so no inbound payload
/// is ever dropped.
pub fn normalize(payload: &Value) -> ChatMessage {
    if let Some(msg) = decode_template(payload) {
        return msg;
    }
    if let Some(msg) = decode_tagged(payload) {
        return msg;
    }
    if let Value::String(text) = payload {
        return ChatMessage::text(text.clone());
    }
    ChatMessage::text(payload.to_string())
}

// A template payload carries header/body/footer objects with a
// `stringContent` field, plus up to three buttons under the fixed keys
// `button_1..button_3`.
fn decode_template(payload: &Value) -> Option<ChatMessage> {
    let obj = payload.as_object()?;

    let header = string_content(obj.get("header"));
    let body = string_content(obj.get("body"));
    let footer = string_content(obj.get("footer"));
    if header.is_none() && body.is_none() && footer.is_none() {
        return None;
    }

    let mut msg = ChatMessage::of_kind(MessageKind::Template);
    msg.header_text = header;
    msg.body_text = body;
    msg.footer_text = footer;

    let buttons: Vec<QuickButton> = ["button_1", "button_2", "button_3"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(decode_button))
        .collect();
    msg.buttons = Some(buttons);

    copy_identity(obj, &mut msg);
    Some(msg)
}

// A button entry counts only when its content string is present and its
// type tag equals "button"; anything else is skipped.
fn decode_button(value: &Value) -> Option<QuickButton> {
    let obj = value.as_object()?;
    if obj.get("type").and_then(Value::as_str) != Some("button") {
        return None;
    }
    let label = obj.get("stringContent").and_then(Value::as_str)?;
    Some(QuickButton {
        label: label.to_string(),
        action: obj
            .get("buttonSubType")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn decode_tagged(payload: &Value) -> Option<ChatMessage> {
    let obj = payload.as_object()?;
    let kind = match obj.get("type").and_then(Value::as_str)? {
        "text" => MessageKind::Text,
        "image" => MessageKind::Image,
        "video" => MessageKind::Video,
        "file" => MessageKind::File,
        "buttons" => MessageKind::Buttons,
        "template" => MessageKind::Template,
        _ => return None,
    };

    let mut msg = ChatMessage::of_kind(kind);
    msg.content = str_field(obj, "content");
    msg.media_url = str_field(obj, "mediaUrl");
    msg.file_name = str_field(obj, "fileName");
    msg.header_text = str_field(obj, "headerText");
    msg.body_text = str_field(obj, "bodyText");
    msg.footer_text = str_field(obj, "footerText");
    if let Some(buttons) = obj.get("buttons").and_then(Value::as_array) {
        // A present buttons key always lands, even when empty, so a
        // re-delivery can clear an earlier entry's buttons.
        msg.buttons = Some(
            buttons
                .iter()
                .filter_map(|b| {
                    let label = b.get("label").and_then(Value::as_str)?;
                    Some(QuickButton {
                        label: label.to_string(),
                        action: b.get("action").and_then(Value::as_str).map(str::to_string),
                    })
                })
                .collect(),
        );
    }

    copy_identity(obj, &mut msg);
    Some(msg)
}

fn copy_identity(obj: &serde_json::Map<String, Value>, msg: &mut ChatMessage) {
    msg.id = str_field(obj, "id");
    msg.client_id = str_field(obj, "clientId");
    msg.sender = str_field(obj, "sender");
    msg.timestamp = str_field(obj, "timestamp");
    msg.status = str_field(obj, "status");
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_content(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|v| v.get("stringContent"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_payload_passes_verbatim() {
        let msg = normalize(&json!("hello there"));
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.content.as_deref(), Some("hello there"));
    }

    #[test]
    fn unknown_object_serialized_into_text() {
        let msg = normalize(&json!({ "weird": [1, 2, 3] }));
        assert_eq!(msg.kind, MessageKind::Text);
        assert!(msg.content.unwrap().contains("weird"));
    }

    #[test]
    fn template_beats_type_tag() {
        // A payload with both a template shape and a type tag decodes as
        // template; the template decoder runs first.
        let msg = normalize(&json!({
            "type": "text",
            "body": { "stringContent": "Body" }
        }));
        assert_eq!(msg.kind, MessageKind::Template);
        assert_eq!(msg.body_text.as_deref(), Some("Body"));
    }

    #[test]
    fn malformed_buttons_skipped() {
        let msg = normalize(&json!({
            "header": { "stringContent": "Hi" },
            "button_1": { "type": "button", "buttonSubType": "OK" },
            "button_2": { "type": "url", "stringContent": "Open" },
            "button_3": { "type": "button", "stringContent": "Yes", "buttonSubType": "OK" }
        }));
        let buttons = msg.buttons.unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].label, "Yes");
    }
}
