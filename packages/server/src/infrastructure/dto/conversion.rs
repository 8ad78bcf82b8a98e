//! Conversion logic between DTOs and domain types.

use crate::domain::{OutboundEvent, RoomSummary};
use crate::infrastructure::dto::{http::RoomsDto, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

/// ルーム一覧をワイヤ形式のマップに変換
pub fn rooms_to_dto(rooms: &[RoomSummary]) -> RoomsDto {
    rooms
        .iter()
        .map(|room| {
            (
                room.name.as_str().to_string(),
                room.members
                    .iter()
                    .map(|member| member.as_str().to_string())
                    .collect(),
            )
        })
        .collect()
}

impl From<&OutboundEvent> for dto::ServerEvent {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::NameAccepted(name) => Self::NameResult(dto::NameResultPayload {
                success: true,
                name: Some(name.as_str().to_string()),
                message: None,
            }),
            OutboundEvent::NameRejected(reason) => Self::NameResult(dto::NameResultPayload {
                success: false,
                name: None,
                message: Some(reason.to_string()),
            }),
            OutboundEvent::JoinedRoom(room) => Self::JoinResult(dto::JoinResultPayload {
                room: room.as_str().to_string(),
            }),
            OutboundEvent::Text(text) => {
                Self::Message(dto::MessagePayload { text: text.clone() })
            }
            OutboundEvent::Rooms(rooms) => Self::Rooms(rooms_to_dto(rooms)),
        }
    }
}
