//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{
        conversion::rooms_to_dto,
        http::{HealthDto, RoomsDto},
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Get active rooms and their members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<RoomsDto> {
    let rooms = state.list_rooms_usecase.snapshot().await;
    Json(rooms_to_dto(&rooms))
}
