use courier_core::error::CourierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    CallbackQuery, Chat, ChatBoostRemoved, ChatBoostUpdated, ChatMemberUpdated, Message,
    MessageReactionUpdated, Poll, PollAnswer, User,
};

/// One incoming event. Exactly one payload field is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reaction: Option<MessageReactionUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_answer: Option<PollAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_chat_member: Option<ChatMemberUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_member: Option<ChatMemberUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_boost: Option<ChatBoostUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_chat_boost: Option<ChatBoostRemoved>,
}

/// Borrowed view of the populated payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateKind<'a> {
    Message(&'a Message),
    EditedMessage(&'a Message),
    ChannelPost(&'a Message),
    EditedChannelPost(&'a Message),
    MessageReaction(&'a MessageReactionUpdated),
    CallbackQuery(&'a CallbackQuery),
    Poll(&'a Poll),
    PollAnswer(&'a PollAnswer),
    MyChatMember(&'a ChatMemberUpdated),
    ChatMember(&'a ChatMemberUpdated),
    ChatBoost(&'a ChatBoostUpdated),
    RemovedChatBoost(&'a ChatBoostRemoved),
}

impl UpdateKind<'_> {
    pub fn update_type(&self) -> UpdateType {
        match self {
            Self::Message(_) => UpdateType::Message,
            Self::EditedMessage(_) => UpdateType::EditedMessage,
            Self::ChannelPost(_) => UpdateType::ChannelPost,
            Self::EditedChannelPost(_) => UpdateType::EditedChannelPost,
            Self::MessageReaction(_) => UpdateType::MessageReaction,
            Self::CallbackQuery(_) => UpdateType::CallbackQuery,
            Self::Poll(_) => UpdateType::Poll,
            Self::PollAnswer(_) => UpdateType::PollAnswer,
            Self::MyChatMember(_) => UpdateType::MyChatMember,
            Self::ChatMember(_) => UpdateType::ChatMember,
            Self::ChatBoost(_) => UpdateType::ChatBoost,
            Self::RemovedChatBoost(_) => UpdateType::RemovedChatBoost,
        }
    }
}

impl Update {
    /// An update carrying only an id. Useful as a fixture.
    pub fn empty(update_id: i64) -> Self {
        Self {
            update_id,
            message: None,
            edited_message: None,
            channel_post: None,
            edited_channel_post: None,
            message_reaction: None,
            callback_query: None,
            poll: None,
            poll_answer: None,
            my_chat_member: None,
            chat_member: None,
            chat_boost: None,
            removed_chat_boost: None,
        }
    }

    /// The populated payload, or `None` for a type this model does not carry.
    pub fn kind(&self) -> Option<UpdateKind<'_>> {
        if let Some(ref m) = self.message {
            Some(UpdateKind::Message(m))
        } else if let Some(ref m) = self.edited_message {
            Some(UpdateKind::EditedMessage(m))
        } else if let Some(ref m) = self.channel_post {
            Some(UpdateKind::ChannelPost(m))
        } else if let Some(ref m) = self.edited_channel_post {
            Some(UpdateKind::EditedChannelPost(m))
        } else if let Some(ref r) = self.message_reaction {
            Some(UpdateKind::MessageReaction(r))
        } else if let Some(ref q) = self.callback_query {
            Some(UpdateKind::CallbackQuery(q))
        } else if let Some(ref p) = self.poll {
            Some(UpdateKind::Poll(p))
        } else if let Some(ref a) = self.poll_answer {
            Some(UpdateKind::PollAnswer(a))
        } else if let Some(ref c) = self.my_chat_member {
            Some(UpdateKind::MyChatMember(c))
        } else if let Some(ref c) = self.chat_member {
            Some(UpdateKind::ChatMember(c))
        } else if let Some(ref b) = self.chat_boost {
            Some(UpdateKind::ChatBoost(b))
        } else {
            self.removed_chat_boost
                .as_ref()
                .map(UpdateKind::RemovedChatBoost)
        }
    }

    /// Any of the message-like payloads (new or edited, chat or channel).
    pub fn any_message(&self) -> Option<&Message> {
        match self.kind()? {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(m),
            _ => None,
        }
    }

    /// The user who caused the update, when there is one.
    pub fn sender(&self) -> Option<&User> {
        match self.kind()? {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => m.from.as_ref(),
            UpdateKind::MessageReaction(r) => r.user.as_ref(),
            UpdateKind::CallbackQuery(q) => Some(&q.from),
            UpdateKind::PollAnswer(a) => a.user.as_ref(),
            UpdateKind::MyChatMember(c) | UpdateKind::ChatMember(c) => Some(&c.from),
            UpdateKind::Poll(_) | UpdateKind::ChatBoost(_) | UpdateKind::RemovedChatBoost(_) => {
                None
            }
        }
    }

    /// The chat the update happened in, when there is one.
    pub fn chat(&self) -> Option<&Chat> {
        match self.kind()? {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(&m.chat),
            UpdateKind::MessageReaction(r) => Some(&r.chat),
            UpdateKind::CallbackQuery(q) => q.message.as_ref().map(|m| m.chat()),
            UpdateKind::MyChatMember(c) | UpdateKind::ChatMember(c) => Some(&c.chat),
            UpdateKind::ChatBoost(b) => Some(&b.chat),
            UpdateKind::RemovedChatBoost(b) => Some(&b.chat),
            UpdateKind::Poll(_) | UpdateKind::PollAnswer(_) => None,
        }
    }
}

/// Update type names accepted by the `allowed_updates` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    MessageReaction,
    CallbackQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatBoost,
    RemovedChatBoost,
}

impl UpdateType {
    pub const ALL: [UpdateType; 12] = [
        Self::Message,
        Self::EditedMessage,
        Self::ChannelPost,
        Self::EditedChannelPost,
        Self::MessageReaction,
        Self::CallbackQuery,
        Self::Poll,
        Self::PollAnswer,
        Self::MyChatMember,
        Self::ChatMember,
        Self::ChatBoost,
        Self::RemovedChatBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::EditedMessage => "edited_message",
            Self::ChannelPost => "channel_post",
            Self::EditedChannelPost => "edited_channel_post",
            Self::MessageReaction => "message_reaction",
            Self::CallbackQuery => "callback_query",
            Self::Poll => "poll",
            Self::PollAnswer => "poll_answer",
            Self::MyChatMember => "my_chat_member",
            Self::ChatMember => "chat_member",
            Self::ChatBoost => "chat_boost",
            Self::RemovedChatBoost => "removed_chat_boost",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateType {
    type Err = CourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CourierError::Validation(format!("unknown update type '{s}'")))
    }
}
