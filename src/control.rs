//! Control facade: turns simulated user actions into inbound updates and
//! drives them through the application's pipeline.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::bot::MockBot;
use crate::dispatch::Dispatch;
use crate::error::MockError;
use crate::selector::ButtonSelector;
use crate::state::SharedState;
use crate::storage::{DEFAULT_DESTINY, StateContext, Storage, StorageKey};
use crate::types::{
    AnswerCallbackQuery, CallbackQuery, Chat, ChatMember, ChatMemberUpdated, Contact, Message,
    Update, UpdateKind, User,
};

/// Drives one simulated scenario against one pipeline.
///
/// Each simulated action allocates identifiers from the shared state, builds
/// a fully-formed [`Update`], feeds it to the pipeline and waits for
/// processing to finish before returning, so state reads after an action are
/// consistent with it. Validation failures are raised before any id is
/// allocated; a failed call never feeds a malformed event.
pub struct TgControl {
    dispatch: Arc<dyn Dispatch>,
    storage: Arc<dyn Storage>,
    bot: MockBot,
    state: SharedState,
}

impl TgControl {
    pub fn new(
        dispatch: Arc<dyn Dispatch>,
        storage: Arc<dyn Storage>,
        bot: MockBot,
        state: SharedState,
    ) -> Self {
        Self { dispatch, storage, bot, state }
    }

    /// The intercepted action-API handle handlers see during feeds.
    pub fn bot(&self) -> &MockBot {
        &self.bot
    }

    /// The conversation-state store shared with the pipeline's handlers.
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage)
    }

    /// Messages delivered to `chat_id`, in delivery order.
    pub fn messages(&self, chat_id: i64) -> Vec<Message> {
        self.state.lock().unwrap().history(chat_id).to_vec()
    }

    /// The most recent message in `chat_id`.
    pub fn last_message(&self, chat_id: i64) -> Result<Message, MockError> {
        self.state.lock().unwrap().last_message(chat_id)
    }

    /// Current membership of `user` in `chat_id`.
    pub fn chat_member(&self, chat_id: i64, user: &User) -> ChatMember {
        self.state.lock().unwrap().member(chat_id, user)
    }

    /// Conversation-state handle for `(chat, user)` in the given destiny.
    pub fn state_context(&self, chat_id: i64, user_id: i64, destiny: &str) -> StateContext {
        let key = StorageKey::new(self.bot.info().id, chat_id, user_id, destiny);
        StateContext::new(Arc::clone(&self.storage), key)
    }

    /// Conversation-state handle for `(chat, user)` in the default destiny.
    pub fn user_state(&self, chat_id: i64, user_id: i64) -> StateContext {
        self.state_context(chat_id, user_id, DEFAULT_DESTINY)
    }

    async fn feed(&self, update: Update) -> Result<(), MockError> {
        debug!(update_id = update.update_id, "feeding update");
        self.dispatch
            .feed_update(&self.bot, update)
            .await
            .map_err(MockError::Pipeline)
    }

    async fn feed_message(&self, message: Message) -> Result<(), MockError> {
        let (update_id, message) = {
            let mut state = self.state.lock().unwrap();
            (state.next_update_id(), state.record_message(message))
        };
        self.feed(Update { update_id, kind: UpdateKind::Message(message) })
            .await
    }

    /// Simulate `from` sending a text message to `chat`.
    pub async fn send(&self, from: &User, chat: &Chat, text: &str) -> Result<(), MockError> {
        let message_id = self.state.lock().unwrap().next_message_id(chat.id);
        self.feed_message(Message::text(message_id, from.clone(), chat.clone(), text))
            .await
    }

    /// Simulate `from` sharing a contact in `chat`.
    pub async fn send_contact(
        &self,
        from: &User,
        chat: &Chat,
        contact: Contact,
    ) -> Result<(), MockError> {
        let message_id = self.state.lock().unwrap().next_message_id(chat.id);
        self.feed_message(Message::contact(message_id, from.clone(), chat.clone(), contact))
            .await
    }

    /// Simulate `user` clicking the one button on `message` that `selector`
    /// singles out, and return the answer the pipeline recorded for the
    /// resulting callback query.
    ///
    /// Fails before allocating any id if the message has no keyboard or the
    /// selector matches zero or several buttons; fails with `NotFound` after
    /// the feed if no handler answered the query.
    pub async fn click<S: ButtonSelector>(
        &self,
        selector: &S,
        message: &Message,
        user: &User,
    ) -> Result<AnswerCallbackQuery, MockError> {
        let Some(markup) = &message.reply_markup else {
            return Err(MockError::Validation(
                "message has no inline keyboard".into(),
            ));
        };

        let mut selected = markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter(|button| selector.matches(button));
        let button = match (selected.next(), selected.next()) {
            (None, _) => {
                return Err(MockError::AmbiguousSelection(
                    "selector skips all buttons".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(MockError::AmbiguousSelection(
                    "selector selects more than one button".into(),
                ));
            }
            (Some(button), None) => button.clone(),
        };

        let (update_id, callback_query_id) = {
            let mut state = self.state.lock().unwrap();
            (state.next_update_id(), state.next_callback_query_id())
        };
        // The chat instance token is derived from the local chat id.
        let query = CallbackQuery {
            id: callback_query_id.clone(),
            from: user.clone(),
            message: message.clone(),
            chat_instance: message.chat.id.to_string(),
            data: button.callback_data,
        };
        self.feed(Update { update_id, kind: UpdateKind::CallbackQuery(query) })
            .await?;
        self.state.lock().unwrap().callback_answer(&callback_query_id)
    }

    /// Simulate a membership change in `chat`: record `new_member` as
    /// current and feed the transition. `my = true` routes the update as a
    /// change about the bot itself, `false` as a change about another party.
    pub async fn update_chat_member(
        &self,
        chat: &Chat,
        from: &User,
        old_member: ChatMember,
        new_member: ChatMember,
        my: bool,
    ) -> Result<(), MockError> {
        let update_id = {
            let mut state = self.state.lock().unwrap();
            state.set_member(chat.id, new_member.clone());
            state.next_update_id()
        };
        let updated = ChatMemberUpdated {
            chat: chat.clone(),
            from: from.clone(),
            date: Utc::now(),
            old_chat_member: old_member,
            new_chat_member: new_member,
        };
        let kind = if my {
            UpdateKind::MyChatMember(updated)
        } else {
            UpdateKind::ChatMember(updated)
        };
        self.feed(Update { update_id, kind }).await
    }
}
