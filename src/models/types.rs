use serde::Serialize;
use std::borrow::Cow;

/// A downloadable model artifact as shown on the model picker.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: Cow<'static, str>,
    /// Human-readable, e.g. "531 MB".
    pub size: Cow<'static, str>,
    pub url: Cow<'static, str>,
}

impl ModelDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        size: impl Into<Cow<'static, str>>,
        url: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            url: url.into(),
        }
    }

    /// Last path segment of the download URL.
    pub fn file_name(&self) -> &str {
        self.url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.name.as_ref())
    }
}

/// Delimiters of the ChatML prompt layout.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialTokens {
    #[serde(rename = "IM_START")]
    pub im_start: &'static str,
    #[serde(rename = "IM_END")]
    pub im_end: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DownloadProgress {
    pub bytes: u64,
    /// Zero when the server sent no content length.
    pub total: u64,
    pub progress: f32,
}

impl DownloadProgress {
    pub fn new(bytes: u64, total: u64) -> Self {
        let progress = if total > 0 {
            (bytes as f32 / total as f32) * 100.0
        } else {
            0.0
        };
        Self {
            bytes,
            total,
            progress,
        }
    }
}
