//! Request handlers.

pub mod http;
pub mod static_file;
pub mod websocket;
