//! InMemory Presence Registry 実装
//!
//! 名前 → 接続、接続 → 名前 の 2 つの HashMap を 1 つのロックで保護する。
//! 重複チェックと束縛は同じロックの中で行うため、同じ名前の登録が
//! 同時に「空いている」と判断されることはない。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceError, PresenceRegistry, UserName};

#[derive(Default)]
struct Bindings {
    by_name: HashMap<UserName, ConnectionId>,
    by_connection: HashMap<ConnectionId, UserName>,
}

/// インメモリ Presence Registry 実装
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    bindings: Mutex<Bindings>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(
        &self,
        name: UserName,
        connection_id: ConnectionId,
    ) -> Result<(), PresenceError> {
        let mut bindings = self.bindings.lock().await;

        if let Some(existing) = bindings.by_connection.get(&connection_id) {
            return Err(PresenceError::AlreadyRegistered(
                existing.as_str().to_string(),
            ));
        }
        if bindings.by_name.contains_key(&name) {
            return Err(PresenceError::AlreadyTaken(name.into_string()));
        }

        bindings.by_name.insert(name.clone(), connection_id);
        bindings.by_connection.insert(connection_id, name);
        Ok(())
    }

    async fn lookup(&self, name: &UserName) -> Option<ConnectionId> {
        let bindings = self.bindings.lock().await;
        bindings.by_name.get(name).copied()
    }

    async fn name_of(&self, connection_id: &ConnectionId) -> Option<UserName> {
        let bindings = self.bindings.lock().await;
        bindings.by_connection.get(connection_id).cloned()
    }

    async fn release(&self, connection_id: &ConnectionId) -> Option<UserName> {
        let mut bindings = self.bindings.lock().await;
        let name = bindings.by_connection.remove(connection_id)?;
        bindings.by_name.remove(&name);
        Some(name)
    }

    async fn count(&self) -> usize {
        let bindings = self.bindings.lock().await;
        bindings.by_name.len()
    }
}
