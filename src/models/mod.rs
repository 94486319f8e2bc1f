pub mod downloader;
pub mod prompt;
pub mod registry;
pub mod types;

pub use downloader::ModelDownloader;
pub use prompt::{ChatPrompt, Role};
pub use registry::{available_models, find_model, IM_END, IM_START, SPECIAL_TOKENS};
pub use types::{DownloadProgress, ModelDescriptor, SpecialTokens};
