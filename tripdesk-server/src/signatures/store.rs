//! 签名文件存储 — 内容寻址 + 孤儿清扫
//!
//! Files are named by a random UUID but indexed by content hash, so
//! re-submitting the same drawing (a retried close, a double-tapped
//! save) lands on the existing file and URL instead of a twin. The
//! sweep deletes files past the grace period that no slip links to.

use super::{InlinePayload, is_inline, parse_data_url};
use crate::db::repository::signature_file;
use sha2::{Digest, Sha256};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

/// URL prefix the slips store and the router serves
pub const URL_PREFIX: &str = "/signatures/";

#[derive(Clone)]
pub struct SignatureStore {
    pool: SqlitePool,
    signatures_dir: PathBuf,
}

impl SignatureStore {
    pub fn new(pool: SqlitePool, signatures_dir: PathBuf) -> Self {
        Self {
            pool,
            signatures_dir,
        }
    }

    /// Store a verified payload and return its serving URL. Identical
    /// content returns the already-stored file's URL.
    pub async fn store(&self, payload: &InlinePayload) -> AppResult<String> {
        let hash = content_hash(&payload.bytes);

        if let Some(existing) = signature_file::find_by_hash(&self.pool, &hash).await? {
            info!(hash = %hash, file = %existing, "signature already stored, reusing");
            return Ok(format!("{URL_PREFIX}{existing}"));
        }

        let file_name = format!("{}.{}", Uuid::new_v4(), payload.extension);
        let path = self.signatures_dir.join(&file_name);
        fs::write(&path, &payload.bytes)
            .await
            .map_err(|e| AppError::internal(format!("failed to write {}: {e}", path.display())))?;

        signature_file::record(
            &self.pool,
            &hash,
            &file_name,
            payload.bytes.len() as i64,
            shared::util::now_millis(),
        )
        .await?;

        info!(file = %file_name, size = payload.bytes.len(), "signature stored");
        Ok(format!("{URL_PREFIX}{file_name}"))
    }

    /// Resolve a link column in place: inline payloads are stored and
    /// replaced with their URL, anything else passes through untouched.
    pub async fn resolve_link(&self, link: &mut String) -> AppResult<()> {
        if !is_inline(link) {
            return Ok(());
        }
        let payload = parse_data_url(link)?;
        *link = self.store(&payload).await?;
        Ok(())
    }

    /// Absolute path for a stored file name
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.signatures_dir.join(file_name)
    }

    /// Delete stored files older than `grace` that no slip references.
    /// Returns how many files were removed.
    pub async fn sweep(&self, grace: Duration) -> AppResult<usize> {
        let cutoff = shared::util::now_millis() - grace.as_millis() as i64;
        let candidates = signature_file::files_older_than(&self.pool, cutoff).await?;
        if candidates.is_empty() {
            return Ok(0);
        }

        let referenced: std::collections::HashSet<String> =
            signature_file::referenced_links(&self.pool)
                .await?
                .iter()
                .filter_map(|link| link.strip_prefix(URL_PREFIX))
                .map(str::to_string)
                .collect();

        let mut deleted = 0;
        for file in candidates {
            if referenced.contains(&file.file_name) {
                continue;
            }
            if let Err(e) = remove_if_present(&self.file_path(&file.file_name)).await {
                warn!(file = %file.file_name, error = %e, "failed to delete orphan signature");
                continue;
            }
            signature_file::delete(&self.pool, &file.hash).await?;
            deleted += 1;
        }

        if deleted > 0 {
            info!(count = deleted, "orphan signatures swept");
        }
        Ok(deleted)
    }
}

fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

async fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
