//! Hiroba 共有ライブラリ
//!
//! サーバーバイナリとテストから共通で使うユーティリティ。

pub mod logger;
