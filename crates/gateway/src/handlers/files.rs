//! File upload/download handlers over the chunked blob store

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::DeleteResponse;
use crate::AppState;
use lectern_common::{
    blobstore::BlobStore,
    db::Repository,
    errors::{AppError, Result},
};

/// Response after a successful upload
#[derive(Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub filename: String,
}

fn blob_store(state: &AppState) -> BlobStore {
    BlobStore::new(
        Repository::new(state.db.clone()),
        state.config.storage.chunk_size_bytes,
    )
}

/// Upload a file as a multipart form with a single `file` field
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let max_upload = state.config.storage.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation {
            message: format!("malformed multipart body: {}", e),
            field: None,
        })?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or("upload.bin")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field.bytes().await.map_err(|e| AppError::Validation {
            message: format!("failed to read upload: {}", e),
            field: Some("file".to_string()),
        })?;

        if data.len() > max_upload {
            return Err(AppError::PayloadTooLarge {
                size: data.len(),
                limit: max_upload,
            });
        }

        let store = blob_store(&state);
        let id = store
            .store(&data, &filename, &content_type, serde_json::json!({}))
            .await?;

        tracing::info!(
            object_id = %id,
            filename = %filename,
            length = data.len(),
            "File uploaded"
        );

        return Ok((StatusCode::CREATED, Json(UploadResponse { id, filename })));
    }

    Err(AppError::MissingField {
        field: "file".to_string(),
    })
}

/// Download a file by object identifier
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let blob = blob_store(&state).retrieve(id).await?;

    let headers = [
        (header::CONTENT_TYPE, blob.meta.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", blob.meta.filename),
        ),
    ];

    Ok((headers, blob.data).into_response())
}

/// Delete a file; the store layer is idempotent, this layer surfaces 404
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    if !blob_store(&state).delete(id).await? {
        return Err(AppError::ObjectNotFound { id: id.to_string() });
    }

    tracing::info!(object_id = %id, "File deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}
