use courier_core::tagged::{self, TaggedUnion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Chat, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostSourcePremium {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostSourceGiftCode {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostSourceGiveaway {
    pub giveaway_message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_star_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unclaimed: Option<bool>,
}

/// How a chat boost was obtained, keyed by `source`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatBoostSource {
    Premium(ChatBoostSourcePremium),
    GiftCode(ChatBoostSourceGiftCode),
    Giveaway(ChatBoostSourceGiveaway),
}

impl TaggedUnion for ChatBoostSource {
    const NAME: &'static str = "ChatBoostSource";
    const TAG_FIELD: &'static str = "source";
    const TAGS: &'static [&'static str] = &["premium", "gift_code", "giveaway"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Premium(_) => "premium",
            Self::GiftCode(_) => "gift_code",
            Self::Giveaway(_) => "giveaway",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "premium" => tagged::variant(raw, Self::Premium),
            "gift_code" => tagged::variant(raw, Self::GiftCode),
            "giveaway" => tagged::variant(raw, Self::Giveaway),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::Premium(s) => tagged::payload(s),
            Self::GiftCode(s) => tagged::payload(s),
            Self::Giveaway(s) => tagged::payload(s),
        }
    }
}

courier_core::tagged_serde!(ChatBoostSource);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoost {
    pub boost_id: String,
    pub add_date: i64,
    pub expiration_date: i64,
    pub source: ChatBoostSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostUpdated {
    pub chat: Chat,
    pub boost: ChatBoost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBoostRemoved {
    pub chat: Chat,
    pub boost_id: String,
    pub remove_date: i64,
    pub source: ChatBoostSource,
}
