//! UI 層
//!
//! HTTP / WebSocket の受け付けと、受信イベントのユースケースへの振り分け。

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::websocket::dispatch_event;
pub use server::Server;
