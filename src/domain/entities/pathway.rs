use serde::{Deserialize, Serialize};

/// Citation attached to answers that consulted the knowledge base.
pub const KB_CITATION: &str = "Source: Internal Docs";

/// The only refusal wording a KB-only answer may use.
pub const KB_REFUSAL: &str = "I don't know based on the internal docs.";

/// Minimum top similarity for the augmented pathway.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pathway {
    KbOnly,
    KbAugmented,
    LlmFallback,
}

impl Pathway {
    /// Picks the answer strategy for one request.
    ///
    /// With augmentation off the answer is always KB-only; otherwise the top
    /// similarity decides between augmented and fallback (inclusive threshold).
    pub fn select(enable_llm: bool, top_similarity: f64, threshold: f64) -> Self {
        if !enable_llm {
            Self::KbOnly
        } else if top_similarity >= threshold {
            Self::KbAugmented
        } else {
            Self::LlmFallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KbOnly => "kb-only",
            Self::KbAugmented => "kb-augmented",
            Self::LlmFallback => "llm-fallback",
        }
    }

    pub fn citation(&self) -> Option<&'static str> {
        match self {
            Self::KbOnly | Self::KbAugmented => Some(KB_CITATION),
            Self::LlmFallback => None,
        }
    }
}

impl std::fmt::Display for Pathway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub pathway: Pathway,
    pub citation: Option<String>,
}

impl ChatAnswer {
    pub fn new(answer: impl Into<String>, pathway: Pathway) -> Self {
        Self {
            answer: answer.into(),
            pathway,
            citation: pathway.citation().map(str::to_string),
        }
    }
}
