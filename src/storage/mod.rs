//! File storage boundary: constraint checks and a local-disk store.
//!
//! Constraint violations come back as typed errors so handlers can surface
//! them as field-level validation problems instead of generic failures.

use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("content type {content_type} is not accepted here")]
    WrongType { content_type: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
const RECEIPT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];
const RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
const FIVE_MB: usize = 5 * 1024 * 1024;

/// Upload constraints enforced at the storage boundary.
#[derive(Debug, Clone, Copy)]
pub struct FileConstraints {
    pub max_bytes: usize,
    pub allowed_types: &'static [&'static str],
}

impl FileConstraints {
    pub fn profile_picture() -> Self {
        Self {
            max_bytes: FIVE_MB,
            allowed_types: IMAGE_TYPES,
        }
    }

    pub fn activity_image() -> Self {
        Self {
            max_bytes: FIVE_MB,
            allowed_types: IMAGE_TYPES,
        }
    }

    pub fn donation_receipt() -> Self {
        Self {
            max_bytes: FIVE_MB,
            allowed_types: RECEIPT_TYPES,
        }
    }

    pub fn resume() -> Self {
        Self {
            max_bytes: FIVE_MB,
            allowed_types: RESUME_TYPES,
        }
    }

    pub fn check(&self, size: usize, content_type: &str) -> Result<(), StorageError> {
        if size > self.max_bytes {
            return Err(StorageError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        if !self.allowed_types.contains(&content_type) {
            return Err(StorageError::WrongType {
                content_type: content_type.to_string(),
            });
        }
        Ok(())
    }
}

/// A file accepted by the store; `path` is relative to the upload root.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredFile {
    pub path: String,
    pub content_type: String,
    pub size: usize,
}

/// Writes uploads to a directory on local disk under random names.
#[derive(Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn store(
        &self,
        bytes: &[u8],
        content_type: &str,
        constraints: &FileConstraints,
    ) -> Result<StoredFile, StorageError> {
        constraints.check(bytes.len(), content_type)?;

        let name = format!("{}{}", Uuid::new_v4(), extension_for(content_type));
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&name), bytes).await?;

        Ok(StoredFile {
            path: name,
            content_type: content_type.to_string(),
            size: bytes.len(),
        })
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "application/pdf" => ".pdf",
        "application/msword" => ".doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        _ => "",
    }
}
