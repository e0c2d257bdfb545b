//! Per-room serialization point.
//!
//! Every mutation of a room (history append/clear, membership change on
//! join) and the fan-out it triggers run while holding that room's turn.
//! Two events submitted to the same room are therefore recorded and
//! delivered in the same relative order. Rooms never wait on each other.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RoomId;

/// Held while a room is being mutated and its fan-out is enqueued.
pub type RoomTurn = OwnedMutexGuard<()>;

#[derive(Default)]
pub struct RoomSequencer {
    turns: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the room's turn. Waiters are served in FIFO order.
    pub async fn acquire(&self, room_id: &RoomId) -> RoomTurn {
        let turn = {
            let mut turns = self.turns.lock().await;
            turns.entry(room_id.clone()).or_default().clone()
        };
        turn.lock_owned().await
    }
}
