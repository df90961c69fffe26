use courier_core::tagged;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::{Chat, ChatBackground, MessageOrigin, PaidMediaInfo, PhotoSize, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    /// Unix time. Never 0 for an accessible message.
    pub date: i64,
    pub chat: Chat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_origin: Option<MessageOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_media: Option<PaidMediaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_background_set: Option<ChatBackground>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<MaybeInaccessibleMessage>>,
}

impl Message {
    /// Text, or the caption for media messages.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }
}

/// A message that was deleted or is otherwise out of the bot's reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InaccessibleMessage {
    pub chat: Chat,
    pub message_id: i64,
    /// Always 0; the wire marker for this variant.
    pub date: i64,
}

/// Either a full message or an inaccessible stub.
///
/// No string discriminator here: the variant is chosen by `date`, which is 0
/// only for inaccessible messages.
#[derive(Debug, Clone, PartialEq)]
pub enum MaybeInaccessibleMessage {
    Message(Box<Message>),
    Inaccessible(InaccessibleMessage),
}

impl MaybeInaccessibleMessage {
    pub fn chat(&self) -> &Chat {
        match self {
            Self::Message(m) => &m.chat,
            Self::Inaccessible(m) => &m.chat,
        }
    }

    pub fn message_id(&self) -> i64 {
        match self {
            Self::Message(m) => m.message_id,
            Self::Inaccessible(m) => m.message_id,
        }
    }

    pub fn accessible(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            Self::Inaccessible(_) => None,
        }
    }

    /// Decode from raw JSON bytes, branching on the `date` sentinel.
    pub fn decode(raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tagged::peek_field::<i64>(raw, "date")? {
            Some(0) => serde_json::from_slice(raw).map(Self::Inaccessible),
            Some(_) => serde_json::from_slice(raw).map(|m| Self::Message(Box::new(m))),
            None => Err(de::Error::missing_field("date")),
        }
    }
}

impl Serialize for MaybeInaccessibleMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Message(m) => m.serialize(serializer),
            Self::Inaccessible(m) => m.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MaybeInaccessibleMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <Box<RawValue>>::deserialize(deserializer)?;
        Self::decode(raw.get().as_bytes()).map_err(<D::Error as de::Error>::custom)
    }
}

/// A callback button was pressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MaybeInaccessibleMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub chat_instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    pub voter_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub total_voter_count: i64,
    pub is_closed: bool,
    pub is_anonymous: bool,
    /// "regular" or "quiz".
    #[serde(rename = "type")]
    pub poll_type: String,
    pub allows_multiple_answers: bool,
}

/// A user changed their answer in a non-anonymous poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter_chat: Option<Chat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Empty when the vote was retracted.
    pub option_ids: Vec<i64>,
}
