//! Daily remote version check.
//!
//! The gate reads the last check date from a [`KeyValueStore`], fetches the
//! `app_version/current` record at most once per local calendar day and, when
//! the published version differs from the installed one, offers the update.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

pub mod firestore;
pub mod gate;
pub mod interaction;
pub mod types;

pub use firestore::{parse_document, FirestoreVersionSource, VersionSource};
pub use gate::{GateSettings, VersionGate};
pub use interaction::{
    validate_link, BrowserOpener, Clock, FixedClock, StaticPrompt, SystemClock, TerminalPrompt,
    UpdatePrompt, UrlOpener,
};
pub use types::{CheckOutcome, UpdateChoice, UpdateNotice, VersionRecord};
