//! Signature Upload & Serving
//!
//! `uploadSignature` 动作接收 data-URL 负载，落盘后回 URL；
//! `GET /signatures/{file}` 把存好的图片送回页面。上传端在任何
//! 落盘动作之前就把坏负载挡掉。

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::header;
use serde::Deserialize;

use crate::core::ServerState;
use crate::signatures::parse_data_url;
use shared::AppResult;
use shared::envelopes::UploadAck;

/// `uploadSignature` body
#[derive(Debug, Deserialize)]
pub struct UploadPayload {
    #[serde(rename = "signatureData", default)]
    pub signature_data: String,
    /// Client-side name; only logged, the server picks its own
    #[serde(rename = "fileName", default)]
    pub file_name: String,
}

/// action=uploadSignature - store an inline data-URL payload
pub async fn upload(state: &ServerState, payload: UploadPayload) -> AppResult<Response> {
    let parsed = parse_data_url(&payload.signature_data)?;
    let url = state.signatures.store(&parsed).await?;
    tracing::info!(file = %payload.file_name, url = %url, "signature stored");
    Ok(Json(UploadAck::stored(url)).into_response())
}

/// Router for the non-action file route
pub fn router() -> Router<ServerState> {
    Router::new().route("/signatures/{file}", get(serve_signature))
}

/// Signature file response
enum SignatureFileResponse {
    Ok(&'static str, Vec<u8>),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for SignatureFileResponse {
    fn into_response(self) -> Response {
        match self {
            SignatureFileResponse::Ok(content_type, content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            SignatureFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            SignatureFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// GET /signatures/{file} - serve a stored signature image
async fn serve_signature(
    State(state): State<ServerState>,
    Path(file): Path<String>,
) -> SignatureFileResponse {
    // Security check: prevent path traversal (stored names are uuid.ext)
    if file.is_empty() || file.contains("..") || file.contains('/') || file.contains('\\') {
        return SignatureFileResponse::BadRequest("Invalid filename");
    }

    let path = state.signatures.file_path(&file);
    match tokio::fs::read(&path).await {
        Ok(content) => SignatureFileResponse::Ok(content_type_for(&file), content),
        Err(e) => {
            tracing::debug!(file = %file, error = %e, "signature file not found");
            SignatureFileResponse::NotFound
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_the_extension() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn upload_payload_reads_camel_case_keys() {
        let p: UploadPayload = serde_json::from_str(
            r#"{"signatureData":"data:image/png;base64,AA==","fileName":"sig.png"}"#,
        )
        .unwrap();
        assert!(p.signature_data.starts_with("data:image/png"));
        assert_eq!(p.file_name, "sig.png");
    }
}
