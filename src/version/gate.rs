use super::firestore::VersionSource;
use super::interaction::{Clock, SystemClock, UpdatePrompt, UrlOpener};
use super::types::{CheckOutcome, UpdateChoice, UpdateNotice};
use crate::config::AppConfig;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Fixed inputs of the gate: what is installed and where things live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateSettings {
    pub installed_version: String,
    pub last_check_key: String,
    pub document_path: String,
}

impl GateSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            installed_version: config.installed_version.clone(),
            last_check_key: config.last_check_key.clone(),
            document_path: config.version_document_path(),
        }
    }
}

/// Once-per-day check of the installed version against the remote record.
pub struct VersionGate {
    settings: GateSettings,
    store: Arc<dyn KeyValueStore>,
    source: Arc<dyn VersionSource>,
    prompt: Arc<dyn UpdatePrompt>,
    opener: Arc<dyn UrlOpener>,
    clock: Arc<dyn Clock>,
}

impl VersionGate {
    pub fn new(
        settings: GateSettings,
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn VersionSource>,
        prompt: Arc<dyn UpdatePrompt>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            settings,
            store,
            source,
            prompt,
            opener,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    /// Run the check. Best effort: failures are logged and reported as
    /// [`CheckOutcome::Failed`], never propagated.
    pub async fn check_app_version(&self) -> CheckOutcome {
        let current = self.settings.installed_version.as_str();
        info!("Installed version: {}", current);

        let today = self.clock.today().format("%Y-%m-%d").to_string();

        let last_check = match self.store.get(&self.settings.last_check_key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read last version check, assuming none: {}", e);
                None
            }
        };

        if last_check.as_deref() == Some(today.as_str()) {
            debug!("Version check already done today ({})", today);
            return CheckOutcome::AlreadyCheckedToday;
        }

        let record = match self.source.fetch(&self.settings.document_path).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!(
                    "Version document {} not found",
                    self.settings.document_path
                );
                return CheckOutcome::DocumentMissing;
            }
            Err(e) => {
                error!("Version check failed: {}", e);
                return CheckOutcome::Failed;
            }
        };

        debug!(
            "Remote latest version: {:?}, update url: {:?}",
            record.latest_version, record.update_url
        );

        let mut outcome = CheckOutcome::UpToDate;
        if record.differs_from(current) {
            let notice = UpdateNotice {
                current_version: current.to_string(),
                latest_version: record.latest_version.clone().unwrap_or_default(),
                update_url: record.update_url.clone(),
            };
            let choice = self.prompt.ask(&notice).await;
            self.handle_choice(choice, &notice);
            outcome = CheckOutcome::UpdateOffered {
                latest_version: notice.latest_version,
                choice,
            };
        } else {
            info!("App is up to date");
        }

        if let Err(e) = self.store.set(&self.settings.last_check_key, &today).await {
            error!("Could not record version check for {}: {}", today, e);
            return CheckOutcome::Failed;
        }

        outcome
    }

    fn handle_choice(&self, choice: UpdateChoice, notice: &UpdateNotice) {
        match choice {
            UpdateChoice::UpdateNow => match notice.update_url.as_deref() {
                Some(url) => {
                    if let Err(e) = self.opener.open(url) {
                        warn!("Could not open update URL {}: {}", url, e);
                    }
                }
                None => warn!("Update requested but no update URL is published"),
            },
            UpdateChoice::RemindTomorrow => info!("Reminding about the update tomorrow"),
        }
    }
}
