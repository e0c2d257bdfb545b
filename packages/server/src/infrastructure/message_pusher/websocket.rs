//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` と Room のメンバーシップを管理
//! - ドメインイベントをワイヤ形式（JSON）にシリアライズして配信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信はチャンネルへの enqueue のみで完了するため、遅い宛先や
//! 切断済みの宛先が他の宛先への配信をブロックすることはありません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomId, ServerEvent},
    infrastructure::dto::websocket::ServerMessage,
};

struct ClientEntry {
    channel: PusherChannel,
    room: Option<RoomId>,
}

#[derive(Default)]
struct Routes {
    clients: HashMap<ConnectionId, ClientEntry>,
    /// Room ID → 所属している接続
    members: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl Routes {
    fn leave_current_room(&mut self, connection_id: &ConnectionId) -> Option<RoomId> {
        let previous = self.clients.get_mut(connection_id)?.room.take()?;
        if let Some(members) = self.members.get_mut(&previous) {
            members.remove(connection_id);
            if members.is_empty() {
                self.members.remove(&previous);
            }
        }
        Some(previous)
    }

    /// ブロードキャストでは一部の送信失敗を許容
    fn fan_out(
        &self,
        room_id: &RoomId,
        exclude: Option<&ConnectionId>,
        event_name: &str,
        frame: &str,
    ) -> usize {
        let Some(members) = self.members.get(room_id) else {
            return 0;
        };

        let mut delivered = 0;
        for member in members.iter().filter(|member| Some(*member) != exclude) {
            let Some(entry) = self.clients.get(member) else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", member);
                continue;
            };
            if let Err(e) = entry.channel.send(frame.to_string()) {
                tracing::warn!("Failed to push '{}' to connection '{}': {}", event_name, member, e);
            } else {
                delivered += 1;
            }
        }
        tracing::debug!(
            "Broadcasted '{}' to {} connection(s) in room '{}'",
            event_name,
            delivered,
            room_id
        );
        delivered
    }
}

fn encode(event: ServerEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerMessage::from(event))
        .map_err(|e| MessagePushError::Serialization(e.to_string()))
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id, tx).await;
/// pusher.join_room(&connection_id, &room_id).await?;
/// pusher.broadcast_to_all(&room_id, ServerEvent::ClearBoard).await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    routes: Mutex<Routes>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut routes = self.routes.lock().await;
        routes.clients.insert(
            connection_id,
            ClientEntry {
                channel: sender,
                room: None,
            },
        );
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut routes = self.routes.lock().await;
        routes.leave_current_room(connection_id);
        routes.clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Option<RoomId>, MessagePushError> {
        let mut routes = self.routes.lock().await;
        if !routes.clients.contains_key(connection_id) {
            return Err(MessagePushError::ClientNotFound(connection_id.to_string()));
        }

        let previous = routes.leave_current_room(connection_id);
        routes
            .members
            .entry(room_id.clone())
            .or_default()
            .insert(*connection_id);
        if let Some(entry) = routes.clients.get_mut(connection_id) {
            entry.room = Some(room_id.clone());
        }
        Ok(previous)
    }

    async fn room_members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let routes = self.routes.lock().await;
        let mut members: Vec<ConnectionId> = routes
            .members
            .get(room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: ServerEvent,
    ) -> Result<(), MessagePushError> {
        let event_name = event.name();
        let frame = encode(event)?;
        let routes = self.routes.lock().await;

        let entry = routes
            .clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        entry
            .channel
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to connection '{}'", event_name, connection_id);
        Ok(())
    }

    async fn broadcast_to_others(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        event: ServerEvent,
    ) -> usize {
        let event_name = event.name();
        let frame = match encode(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Dropping '{}' for room '{}': {}", event_name, room_id, e);
                return 0;
            }
        };
        let routes = self.routes.lock().await;
        routes.fan_out(room_id, Some(sender), event_name, &frame)
    }

    async fn broadcast_to_all(&self, room_id: &RoomId, event: ServerEvent) -> usize {
        let event_name = event.name();
        let frame = match encode(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Dropping '{}' for room '{}': {}", event_name, room_id, e);
                return 0;
            }
        };
        let routes = self.routes.lock().await;
        routes.fan_out(room_id, None, event_name, &frame)
    }
}
