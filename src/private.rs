//! Scoped view of a [`TgControl`] bound to one private conversation.

use crate::bot::MockBot;
use crate::control::TgControl;
use crate::error::MockError;
use crate::selector::ButtonSelector;
use crate::storage::{DEFAULT_DESTINY, StateContext};
use crate::types::{AnswerCallbackQuery, Chat, ChatMember, Contact, Message, User};

/// Optional arguments for [`PrivateChatTgControl::update_member_with`].
#[derive(Debug, Clone, Default)]
pub struct MemberUpdateOptions {
    /// Acting user; the bound user when `None`.
    pub from: Option<User>,
    /// Transition-from record; the currently recorded membership when `None`.
    pub old_member: Option<ChatMember>,
    /// `true` routes the update as a change about the bot itself; the
    /// default routes it as a change about another party.
    pub my: bool,
}

/// Control facade bound to one fixed (chat, user) pair.
///
/// Covers the common "private conversation with one user" case: every
/// simulated action defaults to the bound identity. Construction enforces
/// the platform convention that a private chat's id equals its peer user's
/// id, so a bad identity fails up front instead of on first use.
pub struct PrivateChatTgControl {
    control: TgControl,
    chat: Chat,
    user: User,
}

impl std::fmt::Debug for PrivateChatTgControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateChatTgControl")
            .field("chat", &self.chat)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl PrivateChatTgControl {
    pub fn new(control: TgControl, chat: Chat, user: User) -> Result<Self, MockError> {
        if chat.id != user.id {
            return Err(MockError::Validation(format!(
                "private chat id {} must equal user id {}",
                chat.id, user.id
            )));
        }
        Ok(Self { control, chat, user })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn chat(&self) -> &Chat {
        &self.chat
    }

    pub fn bot(&self) -> &MockBot {
        self.control.bot()
    }

    /// The underlying unscoped facade.
    pub fn control(&self) -> &TgControl {
        &self.control
    }

    /// Messages delivered to the bound chat, in delivery order.
    pub fn messages(&self) -> Vec<Message> {
        self.control.messages(self.chat.id)
    }

    /// The most recent message in the bound chat.
    pub fn last_message(&self) -> Result<Message, MockError> {
        self.control.last_message(self.chat.id)
    }

    /// Current membership of the bound user in the bound chat.
    pub fn member(&self) -> ChatMember {
        self.control.chat_member(self.chat.id, &self.user)
    }

    /// Conversation-state handle for the bound identity in `destiny`.
    pub fn state(&self, destiny: &str) -> StateContext {
        self.control
            .state_context(self.chat.id, self.user.id, destiny)
    }

    /// Conversation-state handle for the bound identity, default destiny.
    pub fn user_state(&self) -> StateContext {
        self.state(DEFAULT_DESTINY)
    }

    /// Simulate the bound user sending a text message.
    pub async fn send(&self, text: &str) -> Result<(), MockError> {
        self.control.send(&self.user, &self.chat, text).await
    }

    /// Simulate a third party sending a text message in the bound chat.
    pub async fn send_from(&self, from: &User, text: &str) -> Result<(), MockError> {
        self.control.send(from, &self.chat, text).await
    }

    /// Simulate the bound user sharing a contact.
    pub async fn send_contact(&self, contact: Contact) -> Result<(), MockError> {
        self.control
            .send_contact(&self.user, &self.chat, contact)
            .await
    }

    /// Click a button on the most recent message in the bound chat.
    pub async fn click<S: ButtonSelector>(
        &self,
        selector: &S,
    ) -> Result<AnswerCallbackQuery, MockError> {
        let message = self.last_message()?;
        self.click_on(selector, &message).await
    }

    /// Click a button on an explicit message as the bound user.
    pub async fn click_on<S: ButtonSelector>(
        &self,
        selector: &S,
        message: &Message,
    ) -> Result<AnswerCallbackQuery, MockError> {
        self.control.click(selector, message, &self.user).await
    }

    /// Record and feed a membership change for the bound identity, acting
    /// user and previous status defaulted, routed as a peer update.
    pub async fn update_member(&self, new_member: ChatMember) -> Result<(), MockError> {
        self.update_member_with(new_member, MemberUpdateOptions::default())
            .await
    }

    /// Record and feed a membership change with explicit options.
    pub async fn update_member_with(
        &self,
        new_member: ChatMember,
        options: MemberUpdateOptions,
    ) -> Result<(), MockError> {
        let from = options.from.unwrap_or_else(|| self.user.clone());
        let old_member = options.old_member.unwrap_or_else(|| self.member());
        self.control
            .update_chat_member(&self.chat, &from, old_member, new_member, options.my)
            .await
    }
}
