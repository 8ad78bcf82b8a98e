//! Room-based chat relay and static file server.
//!
//! Clients connect over WebSocket, receive a guest name, land in the `Lobby`
//! room and can rename themselves, switch rooms and chat with the other
//! members of a room. Files under the public directory are served over plain
//! HTTP with in-memory memoization.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
