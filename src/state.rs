//! Canonical mutable simulation state.
//!
//! Single source of truth for chat histories, id counters, callback-query
//! answers and the membership table. All mutation goes through this type so
//! the backend invariants (monotonic ids, append-only history) cannot be
//! bypassed. Synchronous and side-effect-local; the facades own the locking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::MockError;
use crate::types::{AnswerCallbackQuery, ChatMember, ChatMemberStatus, Message, User};

/// One `TgState` shared between the control facade and the mock bot.
/// Never share a state across scenarios; create one per test.
pub type SharedState = Arc<Mutex<TgState>>;

/// First message id assigned in a chat that has no history yet.
const FIRST_MESSAGE_ID: i64 = 1;

/// Canonical simulation state for one test scenario.
#[derive(Debug)]
pub struct TgState {
    update_seq: i64,
    chat_histories: HashMap<i64, Vec<Message>>,
    message_seqs: HashMap<i64, i64>,
    callback_query_seq: i64,
    callback_answers: HashMap<String, AnswerCallbackQuery>,
    chat_members: HashMap<(i64, i64), ChatMember>,
}

impl TgState {
    /// Fresh state with update ids starting at 1.
    pub fn new() -> Self {
        Self::with_update_base(1)
    }

    /// Fresh state with update ids starting at `base`.
    pub fn with_update_base(base: i64) -> Self {
        Self {
            update_seq: base,
            chat_histories: HashMap::new(),
            message_seqs: HashMap::new(),
            callback_query_seq: 0,
            callback_answers: HashMap::new(),
            chat_members: HashMap::new(),
        }
    }

    /// Wrap a fresh state for sharing between facades.
    pub fn shared() -> SharedState {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Allocate the next global update id. Strictly increasing, never reused.
    pub fn next_update_id(&mut self) -> i64 {
        let id = self.update_seq;
        self.update_seq += 1;
        id
    }

    /// Allocate the next message id for `chat_id`. Per-chat counters are
    /// independent and strictly increasing.
    pub fn next_message_id(&mut self, chat_id: i64) -> i64 {
        let seq = self.message_seqs.entry(chat_id).or_insert(FIRST_MESSAGE_ID);
        let id = *seq;
        *seq += 1;
        id
    }

    /// Append `message` to its chat's history and hand it back.
    pub fn record_message(&mut self, message: Message) -> Message {
        self.chat_histories
            .entry(message.chat.id)
            .or_default()
            .push(message.clone());
        message
    }

    /// Messages delivered to `chat_id`, in delivery order. Empty for a chat
    /// the scenario never touched.
    pub fn history(&self, chat_id: i64) -> &[Message] {
        self.chat_histories
            .get(&chat_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The most recent message in `chat_id`.
    pub fn last_message(&self, chat_id: i64) -> Result<Message, MockError> {
        self.history(chat_id)
            .last()
            .cloned()
            .ok_or_else(|| MockError::NotFound(format!("chat {chat_id} has no messages")))
    }

    /// Allocate a fresh callback-query id. Allocation does not seed an
    /// answer; that happens when the pipeline answers the query.
    pub fn next_callback_query_id(&mut self) -> String {
        self.callback_query_seq += 1;
        self.callback_query_seq.to_string()
    }

    /// Record the application's answer for a callback query.
    pub fn record_callback_answer(&mut self, id: impl Into<String>, answer: AnswerCallbackQuery) {
        self.callback_answers.insert(id.into(), answer);
    }

    /// The recorded answer for a callback query. A miss means the pipeline
    /// never answered that query.
    pub fn callback_answer(&self, id: &str) -> Result<AnswerCallbackQuery, MockError> {
        self.callback_answers
            .get(id)
            .cloned()
            .ok_or_else(|| MockError::NotFound(format!("callback query {id} was never answered")))
    }

    /// Record `member` as the current membership of its user in `chat_id`,
    /// fully replacing any previous record.
    pub fn set_member(&mut self, chat_id: i64, member: ChatMember) {
        self.chat_members.insert((chat_id, member.user.id), member);
    }

    /// Current membership of `user` in `chat_id`. An unseen pair reads as
    /// [`ChatMemberStatus::Left`] rather than failing.
    pub fn member(&self, chat_id: i64, user: &User) -> ChatMember {
        self.chat_members
            .get(&(chat_id, user.id))
            .cloned()
            .unwrap_or_else(|| ChatMember::unseen(user.clone()))
    }

    /// Membership status without the user record; `Left` for an unseen pair.
    pub fn member_status(&self, chat_id: i64, user_id: i64) -> ChatMemberStatus {
        self.chat_members
            .get(&(chat_id, user_id))
            .map(|m| m.status)
            .unwrap_or(ChatMemberStatus::Left)
    }
}

impl Default for TgState {
    fn default() -> Self {
        Self::new()
    }
}
