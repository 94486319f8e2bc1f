use super::types::{DownloadProgress, ModelDescriptor};
use crate::error::{Error, Result};
use futures_util::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

/// Fetches catalog artifacts into a local models directory.
pub struct ModelDownloader {
    client: Client,
    models_dir: PathBuf,
}

impl ModelDownloader {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            models_dir: models_dir.into(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn model_path(&self, model: &ModelDescriptor) -> PathBuf {
        self.models_dir.join(model.file_name())
    }

    pub fn is_installed(&self, model: &ModelDescriptor) -> bool {
        self.model_path(model).exists()
    }

    pub async fn download_model<F>(
        &self,
        model: &ModelDescriptor,
        on_progress: F,
    ) -> Result<PathBuf>
    where
        F: FnMut(DownloadProgress),
    {
        let model_path = self.model_path(model);
        info!("Downloading {} ({}) to {:?}", model.name, model.size, model_path);

        self.download_file(&model.url, &model_path, "", on_progress)
            .await?;

        info!("Model ready: {:?}", model_path);
        Ok(model_path)
    }

    /// Stream `url` into `file_path` through a `.part` file. An empty
    /// `expected_sha256` skips verification.
    pub async fn download_file<F>(
        &self,
        url: &str,
        file_path: &Path,
        expected_sha256: &str,
        mut on_progress: F,
    ) -> Result<()>
    where
        F: FnMut(DownloadProgress),
    {
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let part_path = file_path.with_extension("part");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let total_size = response.content_length().unwrap_or(0);

        // No half-written or unverified .part file survives a failure
        let written = match write_part(response, &part_path, total_size, &mut on_progress).await {
            Ok(written) => verify_checksum(&part_path, expected_sha256)
                .await
                .map(|_| written),
            Err(e) => Err(e),
        };
        let downloaded = match written {
            Ok(downloaded) => downloaded,
            Err(e) => {
                let _ = tokio::fs::remove_file(&part_path).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&part_path, file_path).await?;
        debug!("Wrote {} bytes to {:?}", downloaded, file_path);

        Ok(())
    }

    pub async fn delete_model(&self, model: &ModelDescriptor) -> Result<()> {
        let model_path = self.model_path(model);

        if model_path.exists() {
            tokio::fs::remove_file(&model_path).await?;
            info!("Deleted {:?}", model_path);
        }

        Ok(())
    }
}

async fn write_part<F>(
    response: reqwest::Response,
    part_path: &Path,
    total_size: u64,
    on_progress: &mut F,
) -> Result<u64>
where
    F: FnMut(DownloadProgress),
{
    let mut file = File::create(part_path).await?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        on_progress(DownloadProgress::new(downloaded, total_size));
    }

    file.flush().await?;
    Ok(downloaded)
}

async fn verify_checksum(file_path: &Path, expected: &str) -> Result<()> {
    if expected.is_empty() {
        return Ok(());
    }

    let mut file = File::open(file_path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let actual = format!("{:x}", hasher.finalize());
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}
