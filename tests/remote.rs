//! HTTP-facing pieces against a local mock server.

use campus_connect::error::Error;
use campus_connect::models::{ModelDescriptor, ModelDownloader};
use campus_connect::storage::{KeyValueStore, PreferencesStore};
use campus_connect::version::{
    CheckOutcome, FirestoreVersionSource, FixedClock, GateSettings, StaticPrompt, UpdateChoice,
    UrlOpener, VersionGate, VersionRecord, VersionSource,
};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC_PATH: &str = "/v1/projects/campus-test/databases/(default)/documents/app_version/current";

#[tokio::test]
async fn firestore_document_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/campus-test/databases/(default)/documents/app_version/current",
            "fields": {
                "latest_version": { "stringValue": "1.3.0" },
                "update_url": { "stringValue": "https://example.com/update" }
            }
        })))
        .mount(&server)
        .await;

    let source = FirestoreVersionSource::new(server.uri(), "campus-test");
    let record = source.fetch("app_version/current").await.unwrap();

    assert_eq!(
        record,
        Some(VersionRecord::new("1.3.0").with_update_url("https://example.com/update"))
    );
}

#[tokio::test]
async fn firestore_404_means_missing_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let source = FirestoreVersionSource::new(server.uri(), "campus-test");
    assert_eq!(source.fetch("app_version/current").await.unwrap(), None);
}

#[tokio::test]
async fn firestore_server_error_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let source = FirestoreVersionSource::new(server.uri(), "campus-test");
    assert!(matches!(
        source.fetch("app_version/current").await,
        Err(Error::Status { status: 403, .. })
    ));
}

struct NoOpener;

impl UrlOpener for NoOpener {
    fn open(&self, _url: &str) -> campus_connect::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn gate_writes_preferences_file_after_remote_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": { "latest_version": { "stringValue": "1.2.0" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("preferences.json");
    let store = Arc::new(PreferencesStore::open(&prefs_path).unwrap());

    let gate = VersionGate::new(
        GateSettings {
            installed_version: "1.2.0".to_string(),
            last_check_key: "lastVersionCheck".to_string(),
            document_path: "app_version/current".to_string(),
        },
        store.clone(),
        Arc::new(FirestoreVersionSource::new(server.uri(), "campus-test")),
        Arc::new(StaticPrompt(UpdateChoice::RemindTomorrow)),
        Arc::new(NoOpener),
    )
    .with_clock(Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
    )));

    assert_eq!(gate.check_app_version().await, CheckOutcome::UpToDate);
    assert_eq!(
        gate.check_app_version().await,
        CheckOutcome::AlreadyCheckedToday
    );

    let reopened = PreferencesStore::open(&prefs_path).unwrap();
    assert_eq!(
        reopened.get("lastVersionCheck").await.unwrap().as_deref(),
        Some("2025-04-06")
    );
}

#[tokio::test]
async fn failed_date_write_is_retried_on_next_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DOC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": { "latest_version": { "stringValue": "1.2.0" } }
        })))
        .expect(2)
        .mount(&server)
        .await;

    // parent of the preferences file is a regular file, so every save fails
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let store = Arc::new(PreferencesStore::open(blocker.join("preferences.json")).unwrap());

    let gate = VersionGate::new(
        GateSettings {
            installed_version: "1.2.0".to_string(),
            last_check_key: "lastVersionCheck".to_string(),
            document_path: "app_version/current".to_string(),
        },
        store.clone(),
        Arc::new(FirestoreVersionSource::new(server.uri(), "campus-test")),
        Arc::new(StaticPrompt(UpdateChoice::RemindTomorrow)),
        Arc::new(NoOpener),
    )
    .with_clock(Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
    )));

    assert_eq!(gate.check_app_version().await, CheckOutcome::Failed);
    assert_eq!(store.get("lastVersionCheck").await.unwrap(), None);
    assert_eq!(gate.check_app_version().await, CheckOutcome::Failed);
    server.verify().await;
}

#[tokio::test]
async fn unreachable_firestore_fails_quietly() {
    // nothing listens on port 9 of localhost
    let source = FirestoreVersionSource::new("http://127.0.0.1:9", "campus-test");
    let store = Arc::new(campus_connect::MemoryStore::new());

    let gate = VersionGate::new(
        GateSettings {
            installed_version: "1.2.0".to_string(),
            last_check_key: "lastVersionCheck".to_string(),
            document_path: "app_version/current".to_string(),
        },
        store.clone(),
        Arc::new(source),
        Arc::new(StaticPrompt(UpdateChoice::UpdateNow)),
        Arc::new(NoOpener),
    );

    assert_eq!(gate.check_app_version().await, CheckOutcome::Failed);
    assert_eq!(store.get("lastVersionCheck").await.unwrap(), None);
}

fn test_descriptor(url: String) -> ModelDescriptor {
    ModelDescriptor::new("Modelo de teste", "12 B", url)
}

#[tokio::test]
async fn downloader_writes_artifact_and_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models/tiny.gguf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GGUF-weights".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = ModelDownloader::new(dir.path().join("models"));
    let model = test_descriptor(format!("{}/models/tiny.gguf", server.uri()));

    let mut updates = Vec::new();
    let path = downloader
        .download_model(&model, |p| updates.push(p))
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("models").join("tiny.gguf"));
    assert_eq!(std::fs::read(&path).unwrap(), b"GGUF-weights");
    assert!(!path.with_extension("part").exists());
    assert!(downloader.is_installed(&model));
    assert_eq!(updates.last().map(|p| p.bytes), Some(12));

    downloader.delete_model(&model).await.unwrap();
    assert!(!downloader.is_installed(&model));
}

#[tokio::test]
async fn downloader_rejects_checksum_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models/tiny.gguf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = ModelDownloader::new(dir.path());
    let target = dir.path().join("tiny.gguf");

    let result = downloader
        .download_file(
            &format!("{}/models/tiny.gguf", server.uri()),
            &target,
            "0000000000000000000000000000000000000000000000000000000000000000",
            |_| {},
        )
        .await;

    assert!(matches!(result, Err(Error::ChecksumMismatch { .. })));
    assert!(!target.exists());
    assert!(!target.with_extension("part").exists());
}

#[tokio::test]
async fn downloader_surfaces_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = ModelDownloader::new(dir.path());
    let model = test_descriptor(format!("{}/models/missing.gguf", server.uri()));

    assert!(matches!(
        downloader.download_model(&model, |_| {}).await,
        Err(Error::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn downloader_cleans_up_after_truncated_body() {
    // announces 100 bytes, sends 3, then hangs up
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nabc")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let dir = tempfile::tempdir().unwrap();
    let downloader = ModelDownloader::new(dir.path());
    let model = test_descriptor(format!("http://{addr}/models/tiny.gguf"));

    assert!(downloader.download_model(&model, |_| {}).await.is_err());
    assert!(!downloader.is_installed(&model));
    assert!(!downloader.model_path(&model).with_extension("part").exists());
}
