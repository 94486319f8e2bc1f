use super::types::VersionRecord;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Remote lookup of the version document. `Ok(None)` means the document
/// does not exist, which callers treat differently from a failed fetch.
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn fetch(&self, document_path: &str) -> Result<Option<VersionRecord>>;
}

/// Reads documents through the Firestore REST API.
pub struct FirestoreVersionSource {
    client: Client,
    base_url: String,
    project: String,
    timeout: Duration,
}

impl FirestoreVersionSource {
    pub fn new(base_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project: project.into(),
            timeout: Duration::from_secs(8),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.firestore_base_url, &config.firestore_project)
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn document_url(&self, document_path: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.base_url,
            self.project,
            document_path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl VersionSource for FirestoreVersionSource {
    async fn fetch(&self, document_path: &str) -> Result<Option<VersionRecord>> {
        let url = self.document_url(document_path);
        debug!("Fetching version document from {}", url);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body: Value = response.json().await?;
        Ok(Some(parse_document(&body)))
    }
}

/// Pull the two string fields out of a Firestore document body.
/// Missing or non-string fields come back as `None`.
pub fn parse_document(body: &Value) -> VersionRecord {
    let field = |name: &str| {
        body.get("fields")
            .and_then(|fields| fields.get(name))
            .and_then(|v| v.get("stringValue"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    VersionRecord {
        latest_version: field("latest_version"),
        update_url: field("update_url"),
    }
}
