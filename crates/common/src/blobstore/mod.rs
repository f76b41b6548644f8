//! Chunked blob store
//!
//! Stores binary payloads (PDFs, images) too large to embed in a
//! document row. Each object is a metadata row plus a sequence of
//! fixed-size chunk rows; chunks read back in index order concatenate
//! to the original byte stream exactly.

use crate::db::models::{BlobChunk, BlobChunkActiveModel, BlobObject, BlobObjectActiveModel};
use crate::db::Repository;
use crate::errors::{AppError, Result};
use metrics::counter;
use sea_orm::Set;
use tracing::{debug, warn};
use uuid::Uuid;

/// A retrieved object: its metadata row and the reassembled payload
pub struct Blob {
    pub meta: BlobObject,
    pub data: Vec<u8>,
}

/// Chunked storage over the blob tables
#[derive(Clone)]
pub struct BlobStore {
    repo: Repository,
    chunk_size: usize,
}

impl BlobStore {
    /// Create a store writing chunks of `chunk_size` bytes
    pub fn new(repo: Repository, chunk_size: usize) -> Self {
        Self {
            repo,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Store a payload under a freshly generated object identifier.
    ///
    /// The metadata row is written first, then every chunk in ascending
    /// index order, each acknowledged before the next is issued. If a
    /// chunk write fails partway, the rows written so far are removed
    /// before the storage error propagates, so no half-stored object
    /// remains visible.
    pub async fn store(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
        metadata: serde_json::Value,
    ) -> Result<Uuid> {
        let object_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let object = BlobObjectActiveModel {
            id: Set(object_id),
            filename: Set(filename.to_string()),
            content_type: Set(content_type.to_string()),
            length: Set(bytes.len() as i64),
            metadata: Set(metadata),
            uploaded_at: Set(now.into()),
        };
        self.repo.insert_blob_object(object).await?;

        for (index, slice) in split_into_chunks(bytes, self.chunk_size) {
            let chunk = BlobChunkActiveModel {
                id: Set(Uuid::new_v4()),
                object_id: Set(object_id),
                chunk_index: Set(index),
                data: Set(slice.to_vec()),
            };

            if let Err(e) = self.repo.insert_blob_chunk(chunk).await {
                self.cleanup_partial(object_id).await;
                return Err(AppError::Storage {
                    message: format!("chunk {} write failed for {}: {}", index, object_id, e),
                });
            }
        }

        counter!("lectern_blob_objects_stored_total").increment(1);
        counter!("lectern_blob_bytes_stored_total").increment(bytes.len() as u64);

        debug!(
            object_id = %object_id,
            filename = %filename,
            length = bytes.len(),
            chunk_size = self.chunk_size,
            "Blob stored"
        );

        Ok(object_id)
    }

    /// Retrieve a payload by object identifier.
    ///
    /// Fails with `ObjectNotFound` if no metadata row exists. The chunk
    /// sequence is verified contiguous and the reassembled length checked
    /// against the recorded one before the buffer is returned.
    pub async fn retrieve(&self, id: Uuid) -> Result<Blob> {
        let meta = self
            .repo
            .find_blob_object(id)
            .await?
            .ok_or_else(|| AppError::ObjectNotFound { id: id.to_string() })?;

        let chunks = self.repo.list_blob_chunks(id).await?;
        let data = assemble_chunks(meta.length as u64, &chunks)?;

        counter!("lectern_blob_bytes_read_total").increment(data.len() as u64);

        Ok(Blob { meta, data })
    }

    /// Delete an object and all of its chunks.
    ///
    /// Idempotent at this layer: deleting an absent identifier returns
    /// `Ok(false)`. Chunks go first so a failure between the two deletes
    /// cannot orphan them.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let chunks_removed = self.repo.delete_blob_chunks(id).await?;
        let removed = self.repo.delete_blob_object(id).await?;

        if removed {
            counter!("lectern_blob_objects_deleted_total").increment(1);
            debug!(object_id = %id, chunks = chunks_removed, "Blob deleted");
        }

        Ok(removed)
    }

    /// Best-effort removal of a partially written object
    async fn cleanup_partial(&self, object_id: Uuid) {
        if let Err(e) = self.repo.delete_blob_chunks(object_id).await {
            warn!(object_id = %object_id, error = %e, "Failed to clean up partial chunks");
        }
        if let Err(e) = self.repo.delete_blob_object(object_id).await {
            warn!(object_id = %object_id, error = %e, "Failed to clean up partial metadata");
        }
    }
}

/// Split a payload into chunk-sized slices paired with ascending indexes.
///
/// The last slice may be shorter; an empty payload yields no slices.
pub fn split_into_chunks(bytes: &[u8], chunk_size: usize) -> Vec<(i32, &[u8])> {
    bytes
        .chunks(chunk_size.max(1))
        .enumerate()
        .map(|(index, slice)| (index as i32, slice))
        .collect()
}

/// Reassemble chunk rows into one contiguous buffer.
///
/// Expects chunks sorted by ascending index; rejects gaps, reordering,
/// and any mismatch with the recorded payload length.
pub fn assemble_chunks(expected_len: u64, chunks: &[BlobChunk]) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(expected_len as usize);

    for (position, chunk) in chunks.iter().enumerate() {
        if chunk.chunk_index != position as i32 {
            return Err(AppError::Storage {
                message: format!(
                    "chunk sequence broken for {}: expected index {}, found {}",
                    chunk.object_id, position, chunk.chunk_index
                ),
            });
        }
        data.extend_from_slice(&chunk.data);
    }

    if data.len() as u64 != expected_len {
        return Err(AppError::Storage {
            message: format!(
                "assembled {} bytes but metadata records {}",
                data.len(),
                expected_len
            ),
        });
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    const CHUNK_SIZE: usize = 64 * 1024;

    fn chunk_rows(bytes: &[u8], chunk_size: usize) -> Vec<BlobChunk> {
        let object_id = Uuid::new_v4();
        split_into_chunks(bytes, chunk_size)
            .into_iter()
            .map(|(index, slice)| BlobChunk {
                id: Uuid::new_v4(),
                object_id,
                chunk_index: index,
                data: slice.to_vec(),
            })
            .collect()
    }

    fn round_trip(bytes: &[u8], chunk_size: usize) -> Vec<u8> {
        let chunks = chunk_rows(bytes, chunk_size);
        assemble_chunks(bytes.len() as u64, &chunks).unwrap()
    }

    #[test]
    fn empty_payload_has_no_chunks() {
        let chunks = chunk_rows(&[], CHUNK_SIZE);
        assert!(chunks.is_empty());
        assert_eq!(round_trip(&[], CHUNK_SIZE), Vec::<u8>::new());
    }

    #[test]
    fn boundary_sizes_round_trip() {
        for len in [1, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, 3 * CHUNK_SIZE] {
            let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            assert_eq!(round_trip(&bytes, CHUNK_SIZE), bytes, "len={}", len);
        }
    }

    #[test]
    fn chunk_count_matches_ceiling_division() {
        let bytes = vec![0u8; CHUNK_SIZE * 2 + 1];
        assert_eq!(chunk_rows(&bytes, CHUNK_SIZE).len(), 3);
        assert_eq!(chunk_rows(&bytes[..CHUNK_SIZE * 2], CHUNK_SIZE).len(), 2);
    }

    #[test]
    fn large_random_payload_round_trips() {
        let mut bytes = vec![0u8; 1024 * 1024];
        rand::thread_rng().fill_bytes(&mut bytes);
        assert_eq!(round_trip(&bytes, CHUNK_SIZE), bytes);
    }

    #[test]
    fn missing_chunk_is_rejected() {
        let bytes = vec![7u8; 3 * CHUNK_SIZE];
        let mut chunks = chunk_rows(&bytes, CHUNK_SIZE);
        chunks.remove(1);

        let err = assemble_chunks(bytes.len() as u64, &chunks).unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[test]
    fn reordered_chunks_are_rejected() {
        let bytes = vec![9u8; 2 * CHUNK_SIZE];
        let mut chunks = chunk_rows(&bytes, CHUNK_SIZE);
        chunks.swap(0, 1);

        let err = assemble_chunks(bytes.len() as u64, &chunks).unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let bytes = vec![1u8; CHUNK_SIZE];
        let chunks = chunk_rows(&bytes, CHUNK_SIZE);

        let err = assemble_chunks(bytes.len() as u64 + 1, &chunks).unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn delete_removes_chunks_before_metadata_and_leaves_none() {
        use crate::db::Db;
        use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
        use std::collections::BTreeMap;
        use std::sync::Arc;

        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                // chunk delete, then metadata delete
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                sea_orm::Value::BigInt(Some(0)),
            )])]])
            .into_connection();

        let db = Arc::new(Db::from_connection(conn));
        let repo = Repository::new(db.clone());
        let store = BlobStore::new(repo.clone(), CHUNK_SIZE);
        let id = Uuid::new_v4();

        assert!(store.delete(id).await.unwrap());
        assert_eq!(repo.count_blob_chunks(id).await.unwrap(), 0);

        drop((store, repo));
        let log = Arc::into_inner(db)
            .unwrap()
            .into_connection()
            .unwrap()
            .into_transaction_log();
        assert_eq!(log.len(), 3);
        let rendered: Vec<String> = log.iter().map(|t| format!("{:?}", t)).collect();
        assert!(rendered[0].contains("blob_chunks"));
        assert!(rendered[1].contains("blob_objects"));
    }
}
