//! UseCase layer errors.

use thiserror::Error;

use crate::domain::{MessagePushError, PresenceError, ValueObjectError};

/// 登録（ログイン）エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// 名前が不正
    #[error("invalid user name: {0}")]
    InvalidName(#[from] ValueObjectError),
    /// 名前の衝突（NameCollision）
    #[error(transparent)]
    NameCollision(#[from] PresenceError),
}

impl RegisterError {
    /// クライアントに返す理由
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidName(e) => format!("Invalid username: {e}."),
            Self::NameCollision(PresenceError::AlreadyTaken(_)) => {
                "Username is already taken. Try another.".to_string()
            }
            Self::NameCollision(PresenceError::AlreadyRegistered(name)) => {
                format!("Already registered as '{name}'.")
            }
        }
    }
}

/// Room 参加エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// 参加者の接続が既に存在しない（TransportLoss）
    #[error("failed to deliver room state: {0}")]
    Delivery(#[from] MessagePushError),
}

/// Room 詳細取得エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("invalid room id: {0}")]
    InvalidRoomId(#[from] ValueObjectError),
    #[error("room not found")]
    RoomNotFound,
}
