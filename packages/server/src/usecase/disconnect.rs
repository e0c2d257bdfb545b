//! UseCase: 切断処理
//!
//! 名前の束縛を解除し、送信チャンネルと Room のメンバーシップを削除する。
//! Room の他のメンバーへの通知は行わない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRegistry, UserName};

pub struct DisconnectUseCase {
    presence: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            presence,
            message_pusher,
        }
    }

    /// 切断を実行（冪等）。登録済みだった名前を返す
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<UserName> {
        // 名前を先に解放する（メンバー一覧から消えた時点で再登録できる）
        let released = self.presence.release(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        match &released {
            Some(name) => tracing::info!(
                "User '{}' disconnected ({} online)",
                name,
                self.presence.count().await
            ),
            None => tracing::info!("Connection '{}' closed before registering", connection_id),
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::Sequence;

    use super::DisconnectUseCase;
    use crate::{
        domain::{
            ConnectionId, DrawKind, MessagePusher, MockMessagePusher, MockPresenceRegistry,
            PresenceRegistry, RoomRepository,
        },
        usecase::test_support::{Fixture, drain, name, room, stroke},
    };

    #[tokio::test]
    async fn test_disconnect_releases_name_and_membership() {
        // テスト項目: 切断すると名前が解放され、Room のメンバーから外れる
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _alice_rx) = fixture.join("alice", "r1").await;
        let (bob, mut bob_rx) = fixture.join("bob", "r1").await;
        drain(&mut bob_rx);

        // when (操作):
        let released = fixture.usecases.disconnect.execute(&alice).await;

        // then (期待する結果): 他のメンバーには何も通知されない
        assert_eq!(released, Some(name("alice")));
        assert_eq!(fixture.presence.lookup(&name("alice")).await, None);
        assert_eq!(fixture.pusher.room_members(&room("r1")).await, vec![bob]);
        assert!(drain(&mut bob_rx).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_keeps_room_history() {
        // テスト項目: 全員が切断しても Room と描画履歴は残る
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _rx) = fixture.join("alice", "r1").await;
        fixture
            .usecases
            .draw
            .execute(alice, &room("r1"), stroke(DrawKind::Start, 0.0, 0.0))
            .await;

        // when (操作):
        fixture.usecases.disconnect.execute(&alice).await;

        // then (期待する結果):
        let remaining = fixture.rooms.get_room(&room("r1")).await.unwrap();
        assert_eq!(remaining.history.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_unregistered_connection() {
        // テスト項目: 未登録の接続の切断や二重切断でも問題なく処理される（冪等性）
        // given (前提条件):
        let fixture = Fixture::new();
        let (connection_id, _rx) = fixture.connect().await;

        // when (操作):
        let first = fixture.usecases.disconnect.execute(&connection_id).await;
        let second = fixture.usecases.disconnect.execute(&connection_id).await;

        // then (期待する結果):
        assert_eq!(first, None);
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn test_disconnect_releases_name_before_membership() {
        // テスト項目: 名前の解放はメンバーシップの削除より先に行われる
        // given (前提条件):
        let connection_id = ConnectionId::generate();
        let mut sequence = Sequence::new();
        let mut presence = MockPresenceRegistry::new();
        let mut pusher = MockMessagePusher::new();
        presence
            .expect_release()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Some(name("alice")));
        pusher
            .expect_unregister_client()
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        presence.expect_count().return_const(0usize);
        let usecase = DisconnectUseCase::new(Arc::new(presence), Arc::new(pusher));

        // when (操作):
        let released = usecase.execute(&connection_id).await;

        // then (期待する結果):
        assert_eq!(released, Some(name("alice")));
    }
}
