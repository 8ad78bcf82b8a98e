//! WebSocket event DTOs.
//!
//! Every text frame carries exactly one event, adjacently tagged:
//!
//! ```text
//! {"event": "nameAttempt", "data": "Alice"}
//! {"event": "message", "data": {"room": "Lobby", "text": "hi"}}
//! {"event": "join", "data": {"newRoom": "Games"}}
//! {"event": "rooms"}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Events sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Request a new display name
    NameAttempt(String),
    /// Send chat text to a room
    Message(SendMessagePayload),
    /// Leave the current room and join another
    Join(JoinPayload),
    /// Request the list of active rooms
    Rooms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub room: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub new_room: String,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    NameResult(NameResultPayload),
    JoinResult(JoinResultPayload),
    Message(MessagePayload),
    /// Room name -> member display names
    Rooms(BTreeMap<String, Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameResultPayload {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResultPayload {
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub text: String,
}
