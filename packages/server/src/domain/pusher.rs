//! MessagePusher trait 定義
//!
//! 接続ごとの送信チャンネルと Room のメンバーシップを管理し、
//! イベントを適切な宛先に配信する（Broadcast Router）。
//!
//! 配信モードは 3 種類のみ:
//! - `broadcast_to_others`: Room のメンバー全員（送信者を除く）
//! - `broadcast_to_all`: Room のメンバー全員（送信者を含む）
//! - `push_to`: 特定の 1 接続
//!
//! 宛先ごとの送信失敗は独立しており、1 つの宛先の失敗が
//! 他の宛先への配信を妨げることはない。

use async_trait::async_trait;
use tokio::sync::mpsc;

#[cfg(test)]
use mockall::automock;

use super::{ConnectionId, MessagePushError, RoomId, ServerEvent};

/// 接続への送信チャンネル（シリアライズ済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルとメンバーシップを削除（冪等）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 接続を Room のメンバーにする。以前の Room からは抜ける。
    ///
    /// 直前に所属していた Room を返す。
    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Option<RoomId>, MessagePushError>;

    /// Room に所属している接続の一覧
    async fn room_members(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 特定の接続に送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// Room のメンバー全員（`sender` を除く）に送信し、配信できた数を返す
    async fn broadcast_to_others(
        &self,
        room_id: &RoomId,
        sender: &ConnectionId,
        event: ServerEvent,
    ) -> usize;

    /// Room のメンバー全員に送信し、配信できた数を返す
    async fn broadcast_to_all(&self, room_id: &RoomId, event: ServerEvent) -> usize;
}
