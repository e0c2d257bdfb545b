//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::GetRoomDetailError,
};
use sketchroom_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries = rooms
        .into_iter()
        .map(|overview| RoomSummaryDto {
            id: overview.room.id.as_str().to_string(),
            owner: overview.room.owner.as_str().to_string(),
            history_length: overview.room.history.len(),
            members: overview.member_count,
            created_at: timestamp_to_rfc3339(overview.room.created_at.value()),
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(detail) => {
            let room = detail.room;
            Ok(Json(RoomDetailDto {
                id: room.id.as_str().to_string(),
                owner: room.owner.as_str().to_string(),
                history_length: room.history.len(),
                members: detail
                    .members
                    .into_iter()
                    .map(|name| name.into_string())
                    .collect(),
                created_at: timestamp_to_rfc3339(room.created_at.value()),
            }))
        }
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(GetRoomDetailError::InvalidRoomId(e)) => {
            tracing::debug!("Rejected room lookup: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}
