//! Non-UI core of the Campus Connect app: the daily version gate, the
//! downloadable model catalog and the home screen's menu logic.

pub mod config;
pub mod error;
pub mod home;
pub mod models;
pub mod screens;
pub mod storage;
pub mod version;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{available_models, ModelDescriptor, SPECIAL_TOKENS};
pub use storage::{KeyValueStore, MemoryStore, PreferencesStore};
pub use version::{CheckOutcome, VersionGate, VersionRecord};
