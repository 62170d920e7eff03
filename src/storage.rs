//! Keyed conversation-state store collaborator.
//!
//! Handlers keep per-conversation state in an external store addressed by a
//! composite (bot, chat, user, destiny) key. The harness never inspects
//! stored values; it only builds keys and hands out [`StateContext`]
//! handles. [`InMemoryStorage`] is the implementation tests reach for.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

/// Namespace used when a caller does not pick one.
pub const DEFAULT_DESTINY: &str = "default";

/// Composite key addressing one conversation-state slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub bot_id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub destiny: String,
}

impl StorageKey {
    pub fn new(bot_id: i64, chat_id: i64, user_id: i64, destiny: impl Into<String>) -> Self {
        Self {
            bot_id,
            chat_id,
            user_id,
            destiny: destiny.into(),
        }
    }
}

/// Store for opaque per-conversation state values.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn set(&self, key: &StorageKey, value: Value);
    async fn get(&self, key: &StorageKey) -> Option<Value>;
    async fn clear(&self, key: &StorageKey);
}

/// Handle to one conversation's state slot: a key bound to a store.
#[derive(Clone)]
pub struct StateContext {
    storage: Arc<dyn Storage>,
    key: StorageKey,
}

impl StateContext {
    pub fn new(storage: Arc<dyn Storage>, key: StorageKey) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub async fn set(&self, value: Value) {
        self.storage.set(&self.key, value).await;
    }

    pub async fn get(&self) -> Option<Value> {
        self.storage.get(&self.key).await
    }

    pub async fn clear(&self) {
        self.storage.clear(&self.key).await;
    }
}

/// Process-local storage backing for tests. One instance per scenario.
#[derive(Default)]
pub struct InMemoryStorage {
    slots: Mutex<HashMap<StorageKey, Value>>,
}

impl InMemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn set(&self, key: &StorageKey, value: Value) {
        self.slots.lock().unwrap().insert(key.clone(), value);
    }

    async fn get(&self, key: &StorageKey) -> Option<Value> {
        self.slots.lock().unwrap().get(key).cloned()
    }

    async fn clear(&self, key: &StorageKey) {
        self.slots.lock().unwrap().remove(key);
    }
}
