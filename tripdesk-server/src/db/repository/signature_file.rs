//! Signature File Repository
//!
//! One row per stored signature image, keyed by content hash so the
//! same drawing uploaded twice lands on one file. The sweeper joins
//! this table against the slip link columns to find orphans.

use super::RepoResult;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SignatureFile {
    pub hash: String,
    pub file_name: String,
    pub size_bytes: i64,
    pub created_at: i64,
}

/// Record a stored file. Re-uploading identical content is a no-op.
pub async fn record(
    pool: &SqlitePool,
    hash: &str,
    file_name: &str,
    size_bytes: i64,
    created_at: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT OR IGNORE INTO signature_file (hash, file_name, size_bytes, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(hash)
    .bind(file_name)
    .bind(size_bytes)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Dedup lookup: file name previously stored for this content hash
pub async fn find_by_hash(pool: &SqlitePool, hash: &str) -> RepoResult<Option<String>> {
    let file_name: Option<String> =
        sqlx::query_scalar("SELECT file_name FROM signature_file WHERE hash = ?")
            .bind(hash)
            .fetch_optional(pool)
            .await?;
    Ok(file_name)
}

/// Files recorded before `cutoff`, oldest first
pub async fn files_older_than(pool: &SqlitePool, cutoff: i64) -> RepoResult<Vec<SignatureFile>> {
    let files = sqlx::query_as::<_, SignatureFile>(
        "SELECT hash, file_name, size_bytes, created_at
         FROM signature_file WHERE created_at < ? ORDER BY created_at",
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;
    Ok(files)
}

/// Every signature URL any slip still points at
pub async fn referenced_links(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let links = sqlx::query_scalar(
        "SELECT auth_signature_link FROM duty_slip WHERE auth_signature_link <> ''
         UNION
         SELECT guest_signature_link FROM duty_slip WHERE guest_signature_link <> ''
         UNION
         SELECT employee_signature_link FROM salary_slip WHERE employee_signature_link <> ''",
    )
    .fetch_all(pool)
    .await?;
    Ok(links)
}

pub async fn delete(pool: &SqlitePool, hash: &str) -> RepoResult<()> {
    sqlx::query("DELETE FROM signature_file WHERE hash = ?")
        .bind(hash)
        .execute(pool)
        .await?;
    Ok(())
}
