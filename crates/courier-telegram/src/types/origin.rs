use courier_core::tagged::{self, TaggedUnion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Chat, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginUser {
    pub date: i64,
    pub sender_user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginHiddenUser {
    pub date: i64,
    pub sender_user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginChat {
    pub date: i64,
    pub sender_chat: Chat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOriginChannel {
    pub date: i64,
    pub chat: Chat,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
}

/// Where a forwarded message originally came from.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOrigin {
    User(MessageOriginUser),
    HiddenUser(MessageOriginHiddenUser),
    Chat(MessageOriginChat),
    Channel(MessageOriginChannel),
}

impl MessageOrigin {
    /// Unix time the original message was sent.
    pub fn date(&self) -> i64 {
        match self {
            Self::User(o) => o.date,
            Self::HiddenUser(o) => o.date,
            Self::Chat(o) => o.date,
            Self::Channel(o) => o.date,
        }
    }
}

impl TaggedUnion for MessageOrigin {
    const NAME: &'static str = "MessageOrigin";
    const TAG_FIELD: &'static str = "type";
    const TAGS: &'static [&'static str] = &["user", "hidden_user", "chat", "channel"];

    fn tag(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::HiddenUser(_) => "hidden_user",
            Self::Chat(_) => "chat",
            Self::Channel(_) => "channel",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "user" => tagged::variant(raw, Self::User),
            "hidden_user" => tagged::variant(raw, Self::HiddenUser),
            "chat" => tagged::variant(raw, Self::Chat),
            "channel" => tagged::variant(raw, Self::Channel),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::User(o) => tagged::payload(o),
            Self::HiddenUser(o) => tagged::payload(o),
            Self::Chat(o) => tagged::payload(o),
            Self::Channel(o) => tagged::payload(o),
        }
    }
}

courier_core::tagged_serde!(MessageOrigin);
