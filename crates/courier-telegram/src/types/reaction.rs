use courier_core::tagged::{self, TaggedUnion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Chat, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionTypeEmoji {
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionTypeCustomEmoji {
    pub custom_emoji_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionTypePaid {}

#[derive(Debug, Clone, PartialEq)]
pub enum ReactionType {
    Emoji(ReactionTypeEmoji),
    CustomEmoji(ReactionTypeCustomEmoji),
    Paid(ReactionTypePaid),
}

impl TaggedUnion for ReactionType {
    const NAME: &'static str = "ReactionType";
    const TAG_FIELD: &'static str = "type";
    const TAGS: &'static [&'static str] = &["emoji", "custom_emoji", "paid"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Emoji(_) => "emoji",
            Self::CustomEmoji(_) => "custom_emoji",
            Self::Paid(_) => "paid",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "emoji" => tagged::variant(raw, Self::Emoji),
            "custom_emoji" => tagged::variant(raw, Self::CustomEmoji),
            "paid" => tagged::variant(raw, Self::Paid),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::Emoji(r) => tagged::payload(r),
            Self::CustomEmoji(r) => tagged::payload(r),
            Self::Paid(r) => tagged::payload(r),
        }
    }
}

courier_core::tagged_serde!(ReactionType);

/// Reactions on a message changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReactionUpdated {
    pub chat: Chat,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_chat: Option<Chat>,
    pub date: i64,
    pub old_reaction: Vec<ReactionType>,
    pub new_reaction: Vec<ReactionType>,
}
