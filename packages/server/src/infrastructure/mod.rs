//! Infrastructure 層
//!
//! ドメイン層が定義するポートの具体的な実装と、ワイヤ形式（DTO）、静的ファイル配信を提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod static_files;
