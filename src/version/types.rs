use serde::{Deserialize, Serialize};

/// Snapshot of the remote `app_version` document.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionRecord {
    pub latest_version: Option<String>,
    pub update_url: Option<String>,
}

impl VersionRecord {
    pub fn new(latest_version: impl Into<String>) -> Self {
        Self {
            latest_version: Some(latest_version.into()),
            update_url: None,
        }
    }

    pub fn with_update_url(mut self, url: impl Into<String>) -> Self {
        self.update_url = Some(url.into());
        self
    }

    /// Plain string inequality; "1.10" vs "1.9" is not ordered, only compared.
    pub fn differs_from(&self, installed: &str) -> bool {
        match self.latest_version.as_deref() {
            Some(latest) if !latest.is_empty() => latest != installed,
            _ => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateChoice {
    UpdateNow,
    RemindTomorrow,
}

impl UpdateChoice {
    pub fn label(self) -> &'static str {
        match self {
            Self::UpdateNow => "Atualizar agora",
            Self::RemindTomorrow => "Lembrar novamente amanhã",
        }
    }
}

/// What the user sees when a newer version exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateNotice {
    pub current_version: String,
    pub latest_version: String,
    pub update_url: Option<String>,
}

impl UpdateNotice {
    pub const TITLE: &'static str = "Atualização disponível";

    pub fn message(&self) -> String {
        format!(
            "Sua versão do app é {} \nA versão mais recente é {}.",
            self.current_version, self.latest_version
        )
    }

    pub fn choices(&self) -> [UpdateChoice; 2] {
        [UpdateChoice::UpdateNow, UpdateChoice::RemindTomorrow]
    }
}

/// Completion signal of one gate run. Never an error: every failure
/// collapses into `Failed` after being logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    AlreadyCheckedToday,
    DocumentMissing,
    UpToDate,
    UpdateOffered {
        latest_version: String,
        choice: UpdateChoice,
    },
    Failed,
}

impl CheckOutcome {
    pub fn prompted(&self) -> bool {
        matches!(self, Self::UpdateOffered { .. })
    }
}
