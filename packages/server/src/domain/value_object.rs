//! Value Object 定義
//!
//! 不変で、値そのものによって同一性が決まるドメインの基本型。
//! 生成時にバリデーションを行い、不正な値を持つインスタンスは存在しない。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a display name (in characters)
pub const USER_NAME_MAX_LEN: usize = 32;
/// Maximum length of a room identifier (in characters)
pub const ROOM_ID_MAX_LEN: usize = 64;
/// Maximum length of a chat message body (in characters)
pub const MESSAGE_CONTENT_MAX_LEN: usize = 1000;
/// Maximum length of stroke color / tool descriptors (in characters)
pub const STROKE_ATTRIBUTE_MAX_LEN: usize = 32;

fn validate_text(
    field: &'static str,
    value: String,
    max_len: usize,
) -> Result<String, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(ValueObjectError::TooLong {
            field,
            max: max_len,
            actual: len,
        });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// 接続 ID
///
/// サーバーがトランスポート接続ごとに払い出す不透明な識別子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ユーザー表示名
///
/// 接続中のユーザー間で一意となる名前。前後の空白は除去される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("user name", value, USER_NAME_MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("room id", value, ROOM_ID_MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("message content", value, MESSAGE_CONTENT_MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp (milliseconds, UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ストロークのサブイベント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Start,
    Draw,
    End,
}

/// 描画座標
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, ValueObjectError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValueObjectError::Invalid("point", format!("({x}, {y})")));
        }
        Ok(Self { x, y })
    }
}

/// ストロークの色 (e.g. `#000000`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeColor(String);

impl StrokeColor {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("stroke color", value, STROKE_ATTRIBUTE_MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 描画ツールの記述子 (e.g. `pencil`, `eraser`)
///
/// サーバーは内容を解釈せず、そのまま再配信する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool(String);

impl Tool {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text("tool", value, STROKE_ATTRIBUTE_MAX_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ストロークの太さ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeSize(f64);

impl StrokeSize {
    pub fn new(value: f64) -> Result<Self, ValueObjectError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValueObjectError::Invalid("stroke size", value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_trims_whitespace() {
        // テスト項目: ユーザー名の前後の空白が除去される
        // given (前提条件):
        let raw = "  alice ".to_string();

        // when (操作):
        let result = UserName::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_user_name_rejects_blank() {
        // テスト項目: 空白のみのユーザー名はエラーになる
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = UserName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("user name")));
    }

    #[test]
    fn test_user_name_rejects_too_long() {
        // テスト項目: 上限を超えるユーザー名はエラーになる
        // given (前提条件):
        let raw = "a".repeat(USER_NAME_MAX_LEN + 1);

        // when (操作):
        let result = UserName::new(raw);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ValueObjectError::TooLong { actual: 33, .. })
        ));
    }

    #[test]
    fn test_user_name_counts_characters_not_bytes() {
        // テスト項目: 長さはバイト数ではなく文字数で判定される
        // given (前提条件):
        let raw = "あ".repeat(USER_NAME_MAX_LEN);

        // when (操作):
        let result = UserName::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_room_id_try_from() {
        // テスト項目: String から RoomId に変換できる
        // given (前提条件):
        let raw = "r1".to_string();

        // when (操作):
        let result = RoomId::try_from(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "r1");
    }

    #[test]
    fn test_message_content_rejects_empty() {
        // テスト項目: 空のメッセージはエラーになる
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = MessageContent::new(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_point_rejects_non_finite() {
        // テスト項目: 有限でない座標はエラーになる
        // given (前提条件):

        // when (操作):
        let result = Point::new(f64::NAN, 0.0);

        // then (期待する結果):
        assert!(result.is_err());
        assert!(Point::new(10.0, 10.0).is_ok());
    }

    #[test]
    fn test_stroke_size_must_be_positive() {
        // テスト項目: ストロークの太さは正の値のみ許可される
        // given (前提条件):

        // when (操作):
        let zero = StrokeSize::new(0.0);
        let positive = StrokeSize::new(5.0);

        // then (期待する結果):
        assert!(zero.is_err());
        assert_eq!(positive.unwrap().value(), 5.0);
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される接続 ID は一意である
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
