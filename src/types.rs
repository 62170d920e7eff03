//! Wire-subset Telegram types.
//!
//! Only the fields needed to drive an update pipeline are modeled; this is
//! not a full Bot API schema. Field names follow the Bot API wire format
//! (`from`, `type`, snake_case member statuses) so serialized updates look
//! like the real thing to code that inspects them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Telegram user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl User {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            is_bot: false,
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Chat type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// A Telegram chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Chat {
    /// A one-to-one conversation. By platform convention its id equals the
    /// peer user's id.
    pub fn private(id: i64) -> Self {
        Self { id, kind: ChatType::Private, title: None }
    }

    pub fn group(id: i64, title: impl Into<String>) -> Self {
        Self { id, kind: ChatType::Group, title: Some(title.into()) }
    }
}

/// A shared phone contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Contact {
    pub fn new(phone_number: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            last_name: None,
            user_id: None,
        }
    }
}

/// One inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self { text: text.into(), callback_data: Some(data.into()) }
    }
}

/// An inline keyboard: rows of buttons attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self { inline_keyboard: rows }
    }
}

/// A chat message. Carries at most one content payload (text or contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub date: DateTime<Utc>,
    pub from: User,
    pub chat: Chat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Message {
    /// A plain text message stamped with the current time.
    pub fn text(message_id: i64, from: User, chat: Chat, text: impl Into<String>) -> Self {
        Self {
            message_id,
            date: Utc::now(),
            from,
            chat,
            text: Some(text.into()),
            contact: None,
            reply_markup: None,
        }
    }

    /// A shared-contact message stamped with the current time.
    pub fn contact(message_id: i64, from: User, chat: Chat, contact: Contact) -> Self {
        Self {
            message_id,
            date: Utc::now(),
            from,
            chat,
            text: None,
            contact: Some(contact),
            reply_markup: None,
        }
    }

    pub fn with_reply_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Membership status of a user in a chat. Closed set; `Left` doubles as the
/// implicit status for a pair that was never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

/// A user together with their current membership status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    pub user: User,
    pub status: ChatMemberStatus,
}

impl ChatMember {
    pub fn new(user: User, status: ChatMemberStatus) -> Self {
        Self { user, status }
    }

    /// The implicit record for a (chat, user) pair that was never written.
    pub fn unseen(user: User) -> Self {
        Self { user, status: ChatMemberStatus::Left }
    }
}

/// A button-press notification, delivered to the pipeline when a simulated
/// user clicks an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Message,
    pub chat_instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// The application's answer to a callback query, captured by the harness
/// instead of being sent anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub show_alert: bool,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A change in a user's membership status within a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: DateTime<Utc>,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
}

/// The payload of one inbound update. Closed set: adding a kind forces every
/// pipeline match to handle it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// A new incoming message.
    Message(Message),
    /// An inline button press.
    CallbackQuery(CallbackQuery),
    /// Another party's membership status changed.
    ChatMember(ChatMemberUpdated),
    /// The bot's own membership status changed.
    MyChatMember(ChatMemberUpdated),
}

/// One inbound update as the pipeline sees it.
///
/// Built by the control facade immediately before feeding and handed to the
/// pipeline by value; the harness keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(flatten)]
    pub kind: UpdateKind,
}

/// Identity of the simulated bot, passed to the pipeline with every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub id: i64,
    pub username: String,
}

impl BotInfo {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self { id, username: username.into() }
    }
}
