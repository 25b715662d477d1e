//! Model Presets
//!
//! Selectable hosted models. `resolve` accepts a preset alias or passes a raw
//! model identifier through unchanged.

/// A selectable hosted model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelPreset {
    pub alias: &'static str,
    pub label: &'static str,
    pub model_id: &'static str,
}

pub const MODEL_PRESETS: &[ModelPreset] = &[
    ModelPreset {
        alias: "llama2",
        label: "Llama 2 Chat (Recommended)",
        model_id: "meta-llama/Llama-2-7b-chat-hf",
    },
    ModelPreset {
        alias: "flan-t5",
        label: "Flan-T5 Large",
        model_id: "google/flan-t5-large",
    },
    ModelPreset {
        alias: "gpt2",
        label: "GPT-2",
        model_id: "gpt2",
    },
    ModelPreset {
        alias: "mistral",
        label: "Mistral 7B",
        model_id: "mistralai/Mistral-7B-Instruct-v0.1",
    },
];

/// Look up a preset by alias (case-insensitive)
pub fn preset(alias: &str) -> Option<&'static ModelPreset> {
    MODEL_PRESETS
        .iter()
        .find(|p| p.alias.eq_ignore_ascii_case(alias.trim()))
}

/// Model identifier for an alias or raw identifier
pub fn resolve(model: &str) -> &str {
    match preset(model) {
        Some(p) => p.model_id,
        None => model.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::inference::DEFAULT_MODEL;

    #[test]
    fn test_resolve_alias() {
        assert_eq!(resolve("mistral"), "mistralai/Mistral-7B-Instruct-v0.1");
        assert_eq!(resolve("FLAN-T5"), "google/flan-t5-large");
    }

    #[test]
    fn test_raw_identifier_passes_through() {
        assert_eq!(resolve("bigscience/bloom"), "bigscience/bloom");
        assert_eq!(resolve(" gpt2 "), "gpt2");
    }

    #[test]
    fn test_default_model_is_first_preset() {
        assert_eq!(MODEL_PRESETS[0].model_id, DEFAULT_MODEL);
    }
}
