///! Tests for the file storage boundary: constraint presets and the
///! local-disk store.
///!
///! Run with: `cargo test --test storage_test`
use uuid::Uuid;

use tracer_backend::storage::{FileConstraints, LocalFileStore, StorageError};

fn temp_store() -> LocalFileStore {
    let root = std::env::temp_dir().join(format!("tracer-store-{}", Uuid::new_v4()));
    LocalFileStore::new(root)
}

#[tokio::test]
async fn test_store_writes_the_file_to_disk() {
    let store = temp_store();
    let bytes = b"not really a jpeg, but the store does not sniff content";

    let stored = store
        .store(bytes, "image/jpeg", &FileConstraints::activity_image())
        .await
        .expect("upload should be accepted");

    assert!(stored.path.ends_with(".jpg"));
    assert_eq!(stored.size, bytes.len());

    let on_disk = tokio::fs::read(store.root().join(&stored.path))
        .await
        .expect("stored file should exist");
    assert_eq!(on_disk, bytes);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let store = temp_store();
    let constraints = FileConstraints {
        max_bytes: 8,
        allowed_types: &["image/png"],
    };

    let err = store
        .store(&[0u8; 16], "image/png", &constraints)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::TooLarge { size: 16, limit: 8 }
    ));
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected() {
    let store = temp_store();

    let err = store
        .store(b"plain text", "text/plain", &FileConstraints::activity_image())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::WrongType { .. }));
}

#[test]
fn test_constraint_presets_accept_their_document_kinds() {
    // Images everywhere pictures are expected.
    assert!(FileConstraints::profile_picture()
        .check(1024, "image/png")
        .is_ok());
    assert!(FileConstraints::activity_image()
        .check(1024, "image/webp")
        .is_ok());

    // Receipts may be images or PDFs.
    assert!(FileConstraints::donation_receipt()
        .check(1024, "application/pdf")
        .is_ok());
    assert!(FileConstraints::donation_receipt()
        .check(1024, "image/jpeg")
        .is_ok());

    // Resumes are documents only.
    assert!(FileConstraints::resume()
        .check(1024, "application/pdf")
        .is_ok());
    assert!(FileConstraints::resume().check(1024, "image/png").is_err());

    // The 5 MB cap applies across presets.
    let six_mb = 6 * 1024 * 1024;
    assert!(matches!(
        FileConstraints::resume().check(six_mb, "application/pdf"),
        Err(StorageError::TooLarge { .. })
    ));
}
