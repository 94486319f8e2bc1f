use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const LAST_VERSION_CHECK_KEY: &str = "lastVersionCheck";
pub const USER_NAME_KEY: &str = "userName";
pub const VERSION_COLLECTION: &str = "app_version";
pub const VERSION_DOCUMENT: &str = "current";
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Version string of the running application package.
    pub installed_version: String,
    pub last_check_key: String,
    pub version_collection: String,
    pub version_document: String,
    pub firestore_base_url: String,
    pub firestore_project: String,
    pub request_timeout_secs: u64,
    /// Where downloaded models land. `None` means the platform data dir.
    pub models_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            installed_version: env!("CARGO_PKG_VERSION").to_string(),
            last_check_key: LAST_VERSION_CHECK_KEY.to_string(),
            version_collection: VERSION_COLLECTION.to_string(),
            version_document: VERSION_DOCUMENT.to_string(),
            firestore_base_url: FIRESTORE_BASE_URL.to_string(),
            firestore_project: "campus-connect".to_string(),
            request_timeout_secs: 8,
            models_dir: None,
        }
    }
}

impl AppConfig {
    /// Load `config.json` from the project config dir, then apply env overrides.
    pub fn load() -> Result<Self> {
        let dirs = project_dirs()?;
        let path = dirs.config_dir().join("config.json");
        let mut config = Self::from_file(&path);
        config.apply_env();
        Ok(config)
    }

    /// Missing or unparsable files fall back to defaults.
    pub fn from_file(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|content| serde_json::from_str(&content).map_err(Error::from))
        {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("CAMPUS_CONNECT_INSTALLED_VERSION") {
            self.installed_version = v;
        }
        if let Some(v) = lookup("CAMPUS_CONNECT_FIRESTORE_URL") {
            self.firestore_base_url = v;
        }
        if let Some(v) = lookup("CAMPUS_CONNECT_FIRESTORE_PROJECT") {
            self.firestore_project = v;
        }
        if let Some(v) = lookup("CAMPUS_CONNECT_MODELS_DIR") {
            self.models_dir = Some(PathBuf::from(v));
        }
        if let Some(raw) = lookup("CAMPUS_CONNECT_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => warn!(
                    "Invalid CAMPUS_CONNECT_TIMEOUT_SECS='{}', keeping {}",
                    raw, self.request_timeout_secs
                ),
            }
        }
    }

    /// `collection/document` path of the version record.
    pub fn version_document_path(&self) -> String {
        format!("{}/{}", self.version_collection, self.version_document)
    }

    pub fn resolve_models_dir(&self) -> Result<PathBuf> {
        match &self.models_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().join("models")),
        }
    }
}

pub fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("br", "ifpe", "CampusConnect")
        .ok_or_else(|| Error::Config("Failed to get project directories".to_string()))
}
