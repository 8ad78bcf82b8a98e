//! 静的ファイル配信
//!
//! 公開ディレクトリ配下のファイルを読み込み、読み込みに成功した内容を
//! 解決済みパスをキーにメモ化します。TTL や無効化は無く、一度キャッシュした
//! ファイルはプロセス終了まで同じ内容を返します。
//! キャッシュのエントリ数には上限があり、上限に達した後の新しいファイルは
//! 毎回ディスクから読み込みます。

use std::{
    collections::HashMap,
    io,
    path::{Component, Path, PathBuf},
};

use axum::body::Bytes;
use thiserror::Error;
use tokio::sync::RwLock;

/// `/` に対応するファイル
pub const INDEX_DOCUMENT: &str = "index.html";

/// キャッシュの既定エントリ数
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum StaticFileError {
    /// 公開ディレクトリの外を指すパス
    #[error("Path '{0}' escapes the public directory")]
    Forbidden(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 配信するファイル
#[derive(Debug, Clone)]
pub struct StaticFile {
    pub path: PathBuf,
    pub contents: Bytes,
    pub content_type: String,
}

/// メモ化付きの静的ファイルストア
pub struct StaticFileStore {
    root: PathBuf,
    capacity: usize,
    cache: RwLock<HashMap<PathBuf, Bytes>>,
}

impl StaticFileStore {
    pub fn new(root: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            root: root.into(),
            capacity,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// リクエストパスを公開ディレクトリ配下のパスに解決
    ///
    /// `/` は `index.html` に対応する。`..` を含むパスは拒否する。
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf, StaticFileError> {
        if request_path == "/" {
            return Ok(self.root.join(INDEX_DOCUMENT));
        }

        let relative = Path::new(request_path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(StaticFileError::Forbidden(request_path.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// ファイルを取得（キャッシュにあればディスクを読まない）
    pub async fn load(&self, request_path: &str) -> Result<StaticFile, StaticFileError> {
        let path = self.resolve(request_path)?;
        let content_type = content_type_for(&path);

        if let Some(contents) = self.cache.read().await.get(&path).cloned() {
            tracing::debug!("Serving {} from cache", path.display());
            return Ok(StaticFile {
                path,
                contents,
                content_type,
            });
        }

        let contents = Bytes::from(tokio::fs::read(&path).await.map_err(|source| {
            StaticFileError::Read {
                path: path.clone(),
                source,
            }
        })?);

        let mut cache = self.cache.write().await;
        if cache.len() < self.capacity {
            cache.insert(path.clone(), contents.clone());
        } else {
            tracing::debug!(
                "Static file cache is full ({} entries); {} not memoized",
                self.capacity,
                path.display()
            );
        }

        Ok(StaticFile {
            path,
            contents,
            content_type,
        })
    }

    /// キャッシュ済みのエントリ数
    pub async fn cached_entries(&self) -> usize {
        self.cache.read().await.len()
    }
}

/// ファイル名から Content-Type を推定（不明な場合は application/octet-stream）
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
