//! Domain layer errors.

use thiserror::Error;

/// Value Object の生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{field} is too long ({actual} > {max} characters)")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
}

/// Presence Registry のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenceError {
    /// 名前が既に他の接続に使われている
    #[error("user name '{0}' is already taken")]
    AlreadyTaken(String),
    /// 接続が既に別の名前で登録済み
    #[error("connection is already registered as '{0}'")]
    AlreadyRegistered(String),
}

/// Repository のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
    #[error("failed to serialize message: {0}")]
    Serialization(String),
}
