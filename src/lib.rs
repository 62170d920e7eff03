//! In-process Telegram mock backend for testing bot update pipelines.
//!
//! Plays the platform's role end-to-end without a network: test code
//! simulates user actions (send a message, click an inline button, change a
//! member's status) through [`TgControl`] or the private-chat view
//! [`PrivateChatTgControl`]; the harness synthesizes correctly sequenced
//! inbound updates, feeds them through the application's [`Dispatch`]
//! pipeline, and records the outgoing actions handlers perform through
//! [`MockBot`] so tests can assert on them afterwards.

pub mod bot;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod factory;
pub mod private;
pub mod selector;
pub mod state;
pub mod storage;
pub mod types;


pub use bot::MockBot;
pub use control::TgControl;
pub use dispatch::{Dispatch, DispatchError};
pub use error::MockError;
pub use private::{MemberUpdateOptions, PrivateChatTgControl};
pub use selector::{ButtonMatch, ButtonSelector};
pub use state::{SharedState, TgState};
pub use storage::{DEFAULT_DESTINY, InMemoryStorage, StateContext, Storage, StorageKey};
pub use types::{
    AnswerCallbackQuery, BotInfo, CallbackQuery, Chat, ChatMember, ChatMemberStatus,
    ChatMemberUpdated, ChatType, Contact, InlineKeyboardButton, InlineKeyboardMarkup, Message,
    Update, UpdateKind, User,
};
