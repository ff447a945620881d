//! End-to-end exports delivered through save-and-share on native hosts

mod common;

use common::{
    FlakyFileStore, RecordingShareSheet, assert_entry_names, descriptor_on, file_host, pdf_bytes,
};
use placement_archiver::config::DeliveryConfig;
use placement_archiver::delivery::{LocalFileStore, NoShareSheet};
use placement_archiver::{
    ArchiverConfig, BulkArchiver, DeliveryError, DeliveryReceipt, Error, PlatformServices,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn native_config(candidate_dirs: Vec<PathBuf>) -> ArchiverConfig {
    ArchiverConfig {
        delivery: DeliveryConfig {
            candidate_dirs,
            ..DeliveryConfig::default()
        },
        ..ArchiverConfig::default()
    }
}

#[tokio::test]
async fn first_directory_failing_falls_back_to_second() {
    let server = file_host(&[("/a.pdf", pdf_bytes("a")), ("/b.pdf", pdf_bytes("b"))]).await;
    let cache = TempDir::new().unwrap();
    let documents_dir = TempDir::new().unwrap();

    let store = Arc::new(FlakyFileStore::failing_in(&[cache.path()]));
    let share = Arc::new(RecordingShareSheet::new(true));
    let archiver = BulkArchiver::new(
        native_config(vec![
            cache.path().to_path_buf(),
            documents_dir.path().to_path_buf(),
        ]),
        PlatformServices::Native {
            store: store.clone(),
            share: share.clone(),
        },
    )
    .unwrap();

    let documents = [
        descriptor_on(&server, "/a.pdf", "A", "1", Some("offer_letter")),
        descriptor_on(&server, "/b.pdf", "B", "2", Some("offer_letter")),
    ];
    let report = archiver.export(&documents, "export.zip").await.unwrap();

    let expected = documents_dir.path().join("export.zip");
    assert_eq!(
        report.receipt,
        DeliveryReceipt::Shared {
            path: expected.clone(),
            attempts: 2
        }
    );
    assert_eq!(
        *store.attempts.lock().unwrap(),
        vec![cache.path().join("export.zip"), expected.clone()]
    );
    assert!(!cache.path().join("export.zip").exists());

    let written = std::fs::read(&expected).unwrap();
    assert_entry_names(&written, &["1_A_offer_letter.pdf", "2_B_offer_letter.pdf"]);

    let shared = share.shared.lock().unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].0, expected);
    assert_eq!(shared[0].1.mime_type, "application/zip");
    assert_eq!(shared[0].1.dialog_title, "Save export.zip");
}

#[tokio::test]
async fn first_directory_is_used_when_it_works() {
    let server = file_host(&[("/a.pdf", pdf_bytes("a"))]).await;
    let cache = TempDir::new().unwrap();
    let documents_dir = TempDir::new().unwrap();

    let share = Arc::new(RecordingShareSheet::new(true));
    let archiver = BulkArchiver::new(
        native_config(vec![
            cache.path().to_path_buf(),
            documents_dir.path().to_path_buf(),
        ]),
        PlatformServices::Native {
            store: Arc::new(LocalFileStore),
            share,
        },
    )
    .unwrap();

    let documents = [descriptor_on(&server, "/a.pdf", "A", "1", None)];
    assert!(archiver.archive_and_deliver(&documents, "export.zip").await);

    assert!(cache.path().join("export.zip").exists());
    assert!(!documents_dir.path().join("export.zip").exists());
}

#[tokio::test]
async fn missing_share_mechanism_fails_delivery() {
    let server = file_host(&[("/a.pdf", pdf_bytes("a"))]).await;
    let cache = TempDir::new().unwrap();

    let archiver = BulkArchiver::new(
        native_config(vec![cache.path().to_path_buf()]),
        PlatformServices::Native {
            store: Arc::new(LocalFileStore),
            share: Arc::new(NoShareSheet),
        },
    )
    .unwrap();

    let documents = [descriptor_on(&server, "/a.pdf", "A", "1", None)];
    let err = archiver.export(&documents, "export.zip").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Delivery(DeliveryError::AllAttemptsFailed { attempts: 1 })
    ));
    assert!(!archiver.archive_and_deliver(&documents, "export.zip").await);
}

#[tokio::test]
async fn every_directory_failing_reports_all_attempts() {
    let server = file_host(&[("/a.pdf", pdf_bytes("a"))]).await;
    let cache = TempDir::new().unwrap();
    let documents_dir = TempDir::new().unwrap();

    let store = Arc::new(FlakyFileStore::failing_in(&[
        cache.path(),
        documents_dir.path(),
    ]));
    let share = Arc::new(RecordingShareSheet::new(true));
    let archiver = BulkArchiver::new(
        native_config(vec![
            cache.path().to_path_buf(),
            documents_dir.path().to_path_buf(),
        ]),
        PlatformServices::Native {
            store: store.clone(),
            share: share.clone(),
        },
    )
    .unwrap();

    let documents = [descriptor_on(&server, "/a.pdf", "A", "1", None)];
    assert!(!archiver.archive_and_deliver(&documents, "export.zip").await);

    assert_eq!(store.attempts.lock().unwrap().len(), 2);
    assert!(share.shared.lock().unwrap().is_empty());
}

#[tokio::test]
async fn all_fetches_failing_writes_no_file() {
    let server = file_host(&[]).await;
    let cache = TempDir::new().unwrap();

    let store = Arc::new(FlakyFileStore::default());
    let archiver = BulkArchiver::new(
        native_config(vec![cache.path().to_path_buf()]),
        PlatformServices::Native {
            store: store.clone(),
            share: Arc::new(RecordingShareSheet::new(true)),
        },
    )
    .unwrap();

    let documents = [
        descriptor_on(&server, "/a.pdf", "A", "1", None),
        descriptor_on(&server, "/b.pdf", "B", "2", None),
    ];
    assert!(!archiver.archive_and_deliver(&documents, "export.zip").await);

    assert!(store.attempts.lock().unwrap().is_empty());
    assert!(!cache.path().join("export.zip").exists());
}
