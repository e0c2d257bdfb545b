//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub owner: String,
    pub history_length: usize,
    /// Number of connections currently joined to the room
    pub members: usize,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub owner: String,
    pub history_length: usize,
    /// Registered names of the joined connections, sorted
    pub members: Vec<String>,
    /// RFC 3339 (UTC)
    pub created_at: String,
}
