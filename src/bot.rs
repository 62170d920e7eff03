//! Intercepted platform-action API.
//!
//! Stands in for the real Bot API client inside handlers under test. Every
//! action lands in the shared simulation state instead of crossing a
//! network: sends append to chat history, callback answers are captured for
//! later assertion, member lookups read the membership table.

use chrono::Utc;
use tracing::debug;

use crate::state::SharedState;
use crate::types::{
    AnswerCallbackQuery, BotInfo, Chat, ChatMember, InlineKeyboardMarkup, Message, User,
};

/// Action-API handle passed to the pipeline with every fed update.
///
/// Cloning is cheap; all clones observe the same simulation state.
#[derive(Clone)]
pub struct MockBot {
    info: BotInfo,
    state: SharedState,
}

impl MockBot {
    pub fn new(info: BotInfo, state: SharedState) -> Self {
        Self { info, state }
    }

    /// Identity of the simulated bot.
    pub fn info(&self) -> &BotInfo {
        &self.info
    }

    /// The bot's user record, as it would appear in message `from` fields.
    pub fn user(&self) -> User {
        User {
            id: self.info.id,
            is_bot: true,
            first_name: self.info.username.clone(),
            last_name: None,
            username: Some(self.info.username.clone()),
        }
    }

    /// Send a text message as the bot. The message is stamped with the
    /// chat's next message id and appended to its history, then returned,
    /// matching what a real send would hand back.
    pub fn send_message(&self, chat: Chat, text: impl Into<String>) -> Message {
        self.send_inner(chat, text.into(), None)
    }

    /// Send a text message carrying an inline keyboard.
    pub fn send_message_with_markup(
        &self,
        chat: Chat,
        text: impl Into<String>,
        markup: InlineKeyboardMarkup,
    ) -> Message {
        self.send_inner(chat, text.into(), Some(markup))
    }

    fn send_inner(
        &self,
        chat: Chat,
        text: String,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Message {
        let mut state = self.state.lock().unwrap();
        let message_id = state.next_message_id(chat.id);
        let message = Message {
            message_id,
            date: Utc::now(),
            from: self.user(),
            chat,
            text: Some(text),
            contact: None,
            reply_markup,
        };
        debug!(chat_id = message.chat.id, message_id, "mock send_message");
        state.record_message(message.clone());
        message
    }

    /// Answer a callback query. The answer is recorded for the test to read
    /// back; nothing is sent anywhere.
    pub fn answer_callback_query(&self, answer: AnswerCallbackQuery) {
        debug!(id = %answer.callback_query_id, "mock answer_callback_query");
        self.state
            .lock()
            .unwrap()
            .record_callback_answer(answer.callback_query_id.clone(), answer);
    }

    /// Current membership of `user` in `chat_id`, from the membership table.
    pub fn get_chat_member(&self, chat_id: i64, user: &User) -> ChatMember {
        self.state.lock().unwrap().member(chat_id, user)
    }
}
