//! HTTP API response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /api/rooms` のレスポンス: ルーム名 → メンバーの表示名
pub type RoomsDto = BTreeMap<String, Vec<String>>;

/// `GET /api/health` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
