use courier_core::tagged::{self, TaggedUnion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
}

impl User {
    /// `@username` when set, otherwise the full name.
    pub fn display_name(&self) -> String {
        if let Some(ref un) = self.username {
            format!("@{un}")
        } else if let Some(ref ln) = self.last_name {
            format!("{} {ln}", self.first_name)
        } else {
            self.first_name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_forum: Option<bool>,
}

impl Chat {
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberOwner {
    pub user: User,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberAdministrator {
    pub user: User,
    pub can_be_edited: bool,
    pub is_anonymous: bool,
    pub can_manage_chat: bool,
    pub can_delete_messages: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberMember {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_date: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberRestricted {
    pub user: User,
    pub is_member: bool,
    pub can_send_messages: bool,
    /// 0 = restricted forever.
    pub until_date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberLeft {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberBanned {
    pub user: User,
    /// 0 = banned forever.
    pub until_date: i64,
}

/// A member's standing in a chat, keyed by `status`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMember {
    Owner(ChatMemberOwner),
    Administrator(ChatMemberAdministrator),
    Member(ChatMemberMember),
    Restricted(ChatMemberRestricted),
    Left(ChatMemberLeft),
    Banned(ChatMemberBanned),
}

impl ChatMember {
    pub fn user(&self) -> &User {
        match self {
            Self::Owner(m) => &m.user,
            Self::Administrator(m) => &m.user,
            Self::Member(m) => &m.user,
            Self::Restricted(m) => &m.user,
            Self::Left(m) => &m.user,
            Self::Banned(m) => &m.user,
        }
    }

    /// Whether the user currently belongs to the chat.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Owner(_) | Self::Administrator(_) | Self::Member(_) => true,
            Self::Restricted(m) => m.is_member,
            Self::Left(_) | Self::Banned(_) => false,
        }
    }
}

impl TaggedUnion for ChatMember {
    const NAME: &'static str = "ChatMember";
    const TAG_FIELD: &'static str = "status";
    const TAGS: &'static [&'static str] = &[
        "creator",
        "administrator",
        "member",
        "restricted",
        "left",
        "kicked",
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Owner(_) => "creator",
            Self::Administrator(_) => "administrator",
            Self::Member(_) => "member",
            Self::Restricted(_) => "restricted",
            Self::Left(_) => "left",
            Self::Banned(_) => "kicked",
        }
    }

    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error> {
        match tag {
            "creator" => tagged::variant(raw, Self::Owner),
            "administrator" => tagged::variant(raw, Self::Administrator),
            "member" => tagged::variant(raw, Self::Member),
            "restricted" => tagged::variant(raw, Self::Restricted),
            "left" => tagged::variant(raw, Self::Left),
            "kicked" => tagged::variant(raw, Self::Banned),
            other => Err(tagged::unknown_tag::<Self>(other)),
        }
    }

    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match self {
            Self::Owner(m) => tagged::payload(m),
            Self::Administrator(m) => tagged::payload(m),
            Self::Member(m) => tagged::payload(m),
            Self::Restricted(m) => tagged::payload(m),
            Self::Left(m) => tagged::payload(m),
            Self::Banned(m) => tagged::payload(m),
        }
    }
}

courier_core::tagged_serde!(ChatMember);

/// A member's status changed in a chat the bot can see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: i64,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
}
