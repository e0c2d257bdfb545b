//! UseCase: ユーザー登録（ログイン）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase::execute() メソッド
//! - 名前の一意性チェックと、登録結果の返信
//!
//! ### なぜこのテストが必要か
//! - 名前の登録は他の全ての操作の前提条件（ログインゲート）
//! - 同じ名前のユーザーが同時に 2 人存在してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：空いている名前の登録
//! - 異常系：使用中の名前、不正な名前
//! - エッジケース：切断後の名前の再利用

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRegistry, ServerEvent, UserName};

use super::error::RegisterError;

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    presence: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RegisterUserUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            presence,
            message_pusher,
        }
    }

    /// 名前を接続に束縛し、結果（registration_success / registration_error）を返信する
    ///
    /// # Returns
    ///
    /// * `Ok(UserName)` - 登録された名前
    /// * `Err(RegisterError)` - 登録失敗（他のセッションには影響しない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: String,
    ) -> Result<UserName, RegisterError> {
        let result = self.bind(connection_id, name).await;

        let reply = match &result {
            Ok(name) => {
                tracing::info!("Registered '{}' on connection '{}'", name, connection_id);
                ServerEvent::RegistrationSuccess
            }
            Err(e) => {
                tracing::warn!("Registration rejected on '{}': {}", connection_id, e);
                ServerEvent::RegistrationError { reason: e.reason() }
            }
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, reply).await {
            tracing::warn!("Failed to reply to registration: {}", e);
        }

        result
    }

    async fn bind(&self, connection_id: ConnectionId, name: String) -> Result<UserName, RegisterError> {
        let name = UserName::new(name)?;
        self.presence.register(name.clone(), connection_id).await?;
        Ok(name)
    }
}
