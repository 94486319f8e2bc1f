use super::types::{ModelDescriptor, SpecialTokens};
use std::borrow::Cow;

pub const IM_START: &str = "<|im_start|>";
pub const IM_END: &str = "<|im_end|>";

/// Special tokens of the Qwen ChatML architecture.
pub const SPECIAL_TOKENS: SpecialTokens = SpecialTokens {
    im_start: IM_START,
    im_end: IM_END,
};

static AVAILABLE_MODELS: [ModelDescriptor; 2] = [
    ModelDescriptor {
        name: Cow::Borrowed("Para dispositivos topo de linha (recomendado)"),
        size: Cow::Borrowed("1.12 GB"),
        url: Cow::Borrowed("https://huggingface.co/Qwen/Qwen2.5-1.5B-Instruct-GGUF/resolve/main/qwen2.5-1.5b-instruct-q4_k_m.gguf"),
    },
    ModelDescriptor {
        name: Cow::Borrowed("Para dispositivos modestos"),
        size: Cow::Borrowed("531 MB"),
        url: Cow::Borrowed("https://huggingface.co/Qwen/Qwen2.5-0.5B-Instruct-GGUF/resolve/main/qwen2.5-0.5b-instruct-q5_k_m.gguf"),
    },
];

/// Models offered for download, recommended first.
pub fn available_models() -> &'static [ModelDescriptor] {
    &AVAILABLE_MODELS
}

pub fn find_model(name: &str) -> Option<&'static ModelDescriptor> {
    AVAILABLE_MODELS.iter().find(|m| m.name == name)
}
