use super::types::{UpdateChoice, UpdateNotice};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Source of "today" in the device's local timezone.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Fixed date, for tests and replays.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Presents the update dialog and waits for the user's answer.
#[async_trait]
pub trait UpdatePrompt: Send + Sync {
    async fn ask(&self, notice: &UpdateNotice) -> UpdateChoice;
}

/// Always answers the same way. Used for `--yes`/`--no` and in tests.
pub struct StaticPrompt(pub UpdateChoice);

#[async_trait]
impl UpdatePrompt for StaticPrompt {
    async fn ask(&self, notice: &UpdateNotice) -> UpdateChoice {
        info!(
            "{}: {} -> {}",
            UpdateNotice::TITLE,
            notice.message().replace('\n', ""),
            self.0.label()
        );
        self.0
    }
}

/// Asks on stdin. Anything other than "1" counts as "remind tomorrow".
pub struct TerminalPrompt;

#[async_trait]
impl UpdatePrompt for TerminalPrompt {
    async fn ask(&self, notice: &UpdateNotice) -> UpdateChoice {
        println!("{}", UpdateNotice::TITLE);
        println!("{}", notice.message());
        for (i, choice) in notice.choices().iter().enumerate() {
            println!("  [{}] {}", i + 1, choice.label());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        match lines.next_line().await {
            Ok(Some(answer)) if answer.trim() == "1" => UpdateChoice::UpdateNow,
            Ok(_) => UpdateChoice::RemindTomorrow,
            Err(e) => {
                warn!("Could not read answer: {}", e);
                UpdateChoice::RemindTomorrow
            }
        }
    }
}

/// Hands a URL to whatever the platform uses to open links.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens http(s) links in the default browser.
pub struct BrowserOpener;

impl UrlOpener for BrowserOpener {
    fn open(&self, url: &str) -> Result<()> {
        let url = validate_link(url)?;
        webbrowser::open(url.as_str())?;
        Ok(())
    }
}

/// Only absolute http and https URLs leave the app.
pub fn validate_link(raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}
