//! Fixture helpers for the common private-chat setup.

use std::sync::Arc;

use crate::bot::MockBot;
use crate::control::TgControl;
use crate::dispatch::Dispatch;
use crate::error::MockError;
use crate::private::PrivateChatTgControl;
use crate::state::TgState;
use crate::storage::{InMemoryStorage, Storage};
use crate::types::{BotInfo, Chat, User};

/// Default simulated peer for private-chat fixtures.
pub fn default_user() -> User {
    User::new(1, "Test").with_username("test_user")
}

/// Private chat matching [`default_user`].
pub fn default_chat() -> Chat {
    Chat::private(1)
}

/// Default simulated bot identity.
pub fn default_bot() -> BotInfo {
    BotInfo::new(424242, "mock_bot")
}

/// Assemble a control facade around `dispatch` with a fresh state and an
/// in-memory conversation-state store.
pub fn tg_control(dispatch: Arc<dyn Dispatch>, bot: BotInfo) -> TgControl {
    tg_control_with_storage(dispatch, bot, InMemoryStorage::new())
}

/// Assemble a control facade around `dispatch` with a fresh state and the
/// given conversation-state store.
pub fn tg_control_with_storage(
    dispatch: Arc<dyn Dispatch>,
    bot: BotInfo,
    storage: Arc<dyn Storage>,
) -> TgControl {
    let state = TgState::shared();
    let bot = MockBot::new(bot, Arc::clone(&state));
    TgControl::new(dispatch, storage, bot, state)
}

/// One-call fixture for the common case: a fresh control facade scoped to
/// the default private conversation.
pub fn private_chat_tg_control(
    dispatch: Arc<dyn Dispatch>,
) -> Result<PrivateChatTgControl, MockError> {
    let control = tg_control(dispatch, default_bot());
    PrivateChatTgControl::new(control, default_chat(), default_user())
}
