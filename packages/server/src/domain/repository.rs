//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//! テストではインメモリ実装やモックに差し替えられます。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{
    ConnectionId, DrawEvent, PresenceError, RepositoryError, Room, RoomId, RoomOwner, UserName,
};

/// Presence Registry trait
///
/// 表示名と生きている接続の対応を管理する。
/// 名前は接続中のユーザー間で一意であり、切断と同時に解放される。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// 名前を接続に束縛する（重複チェックと束縛はアトミックに行う）
    async fn register(
        &self,
        name: UserName,
        connection_id: ConnectionId,
    ) -> Result<(), PresenceError>;

    /// 名前から接続を引く
    async fn lookup(&self, name: &UserName) -> Option<ConnectionId>;

    /// 接続に束縛された名前を引く
    async fn name_of(&self, connection_id: &ConnectionId) -> Option<UserName>;

    /// 接続の束縛を解除する（冪等）。解除された名前を返す
    async fn release(&self, connection_id: &ConnectionId) -> Option<UserName>;

    /// 登録中のユーザー数
    async fn count(&self) -> usize;
}

/// Room Repository trait
///
/// Room のメタデータ（オーナー、描画履歴）を Room ID をキーに保持する。
/// 返される Room は常にスナップショット（コピー）であり、
/// 他の参加者による後続の変更の影響を受けない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を取得し、存在しなければ `owner` をオーナーとして作成する
    ///
    /// 確認と作成はアトミックに行われ、同じ Room ID に対して
    /// 同時に呼ばれても先着の呼び出しだけがオーナーになる。
    async fn ensure_room(&self, room_id: RoomId, owner: RoomOwner) -> Room;

    /// 描画イベントを履歴の末尾に追加
    async fn append_history(
        &self,
        room_id: &RoomId,
        event: DrawEvent,
    ) -> Result<(), RepositoryError>;

    /// 履歴を空にする（オーナーは変更しない）
    async fn clear_history(&self, room_id: &RoomId) -> Result<(), RepositoryError>;

    /// 履歴のスナップショットを取得
    async fn get_history(&self, room_id: &RoomId) -> Result<Vec<DrawEvent>, RepositoryError>;

    /// Room のスナップショットを取得
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// 全ての Room のスナップショットを Room ID 順に取得
    async fn list_rooms(&self) -> Vec<Room>;
}
