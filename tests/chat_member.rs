//! End-to-end membership scenario against a handler-style pipeline.
//!
//! Run with: cargo test --test chat_member

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tg_mock::{
    ChatMember, ChatMemberStatus, ChatMemberUpdated, Dispatch, DispatchError, MockBot,
    PrivateChatTgControl, Update, UpdateKind, factory,
};

/// Pipeline with one chat-member handler, the way a bot would register one.
#[derive(Default)]
struct MemberWatcher {
    seen: Mutex<Vec<ChatMemberUpdated>>,
}

impl MemberWatcher {
    fn seen(&self) -> Vec<ChatMemberUpdated> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatch for MemberWatcher {
    async fn feed_update(&self, _bot: &MockBot, update: Update) -> Result<(), DispatchError> {
        if let UpdateKind::ChatMember(updated) = update.kind {
            self.seen.lock().unwrap().push(updated);
        }
        Ok(())
    }
}

fn harness(dispatch: Arc<MemberWatcher>) -> PrivateChatTgControl {
    // Opt-in log output: RUST_LOG=tg_mock=debug cargo test --test chat_member
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    factory::private_chat_tg_control(dispatch).expect("default identity is valid")
}

#[tokio::test]
async fn member_update_reaches_handler_and_harness_state() {
    let dispatch = Arc::new(MemberWatcher::default());
    let tg = harness(dispatch.clone());
    let user = tg.user().clone();

    tg.update_member(ChatMember::new(user.clone(), ChatMemberStatus::Kicked))
        .await
        .unwrap();

    // Harness-side observation points agree with the handler's view.
    assert_eq!(tg.member().status, ChatMemberStatus::Kicked);
    assert_eq!(
        tg.bot().get_chat_member(tg.chat().id, &user).status,
        ChatMemberStatus::Kicked
    );

    let seen = dispatch.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].old_chat_member.status, ChatMemberStatus::Left);
    assert_eq!(seen[0].new_chat_member.status, ChatMemberStatus::Kicked);
}

#[tokio::test]
async fn successive_updates_transition_from_the_recorded_status() {
    let dispatch = Arc::new(MemberWatcher::default());
    let tg = harness(dispatch.clone());
    let user = tg.user().clone();

    tg.update_member(ChatMember::new(user.clone(), ChatMemberStatus::Member))
        .await
        .unwrap();
    tg.update_member(ChatMember::new(user.clone(), ChatMemberStatus::Administrator))
        .await
        .unwrap();

    let seen = dispatch.seen();
    assert_eq!(seen[1].old_chat_member.status, ChatMemberStatus::Member);
    assert_eq!(seen[1].new_chat_member.status, ChatMemberStatus::Administrator);
}
