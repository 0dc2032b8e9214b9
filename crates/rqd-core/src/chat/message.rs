use serde::{Deserialize, Serialize};

/// The closed set of display shapes an inbound payload normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Video,
    File,
    Buttons,
    Template,
}

/// A quick-reply button attached to a buttons or template message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickButton {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// One normalized chat message. Field presence depends on the kind;
/// everything beyond the kind is optional so that a merged re-delivery
/// can overwrite fields piecemeal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Client-assigned identifier used for re-delivery dedup.
    #[serde(rename = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    #[serde(rename = "type")]
    pub kind: MessageKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(rename = "mediaUrl", skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// `None` means the payload carried no buttons key at all; an
    /// explicitly empty list is `Some(vec![])` and overwrites on merge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<QuickButton>>,

    #[serde(rename = "headerText", skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,

    #[serde(rename = "bodyText", skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,

    #[serde(rename = "footerText", skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ChatMessage {
    /// An empty message of one kind; normalization fills in the rest.
    pub fn of_kind(kind: MessageKind) -> ChatMessage {
        ChatMessage {
            id: None,
            client_id: None,
            sender: None,
            kind,
            content: None,
            media_url: None,
            file_name: None,
            buttons: None,
            header_text: None,
            body_text: None,
            footer_text: None,
            timestamp: None,
            status: None,
        }
    }

    /// A plain text message.
    pub fn text(content: impl Into<String>) -> ChatMessage {
        let mut msg = ChatMessage::of_kind(MessageKind::Text);
        msg.content = Some(content.into());
        msg
    }

    /// Shallow field overwrite: fields present on `incoming` replace this
    /// message's fields, absent fields are kept. The kind is always
    /// taken from the incoming message.
    pub fn merge(&mut self, incoming: ChatMessage) {
        self.kind = incoming.kind;
        merge_field(&mut self.id, incoming.id);
        merge_field(&mut self.client_id, incoming.client_id);
        merge_field(&mut self.sender, incoming.sender);
        merge_field(&mut self.content, incoming.content);
        merge_field(&mut self.media_url, incoming.media_url);
        merge_field(&mut self.file_name, incoming.file_name);
        merge_field(&mut self.header_text, incoming.header_text);
        merge_field(&mut self.body_text, incoming.body_text);
        merge_field(&mut self.footer_text, incoming.footer_text);
        merge_field(&mut self.timestamp, incoming.timestamp);
        merge_field(&mut self.status, incoming.status);
        if incoming.buttons.is_some() {
            self.buttons = incoming.buttons;
        }
    }
}

fn merge_field(slot: &mut Option<String>, incoming: Option<String>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}
