use bizgen_core::{AnalysisKind, DEFAULT_IDEA_COUNT};
use serde::Deserialize;

/// A "generate ideas" action from the user.
///
/// A missing `context` deserializes as empty so it is rejected by the same
/// validation as a blank one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateIdeasRequest {
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_count")]
    pub count: u8,
}

fn default_count() -> u8 {
    DEFAULT_IDEA_COUNT
}

impl GenerateIdeasRequest {
    pub fn new(context: impl Into<String>, count: u8) -> Self {
        Self {
            context: context.into(),
            count,
        }
    }
}

/// A "generate analysis of kind K for idea i" action from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub idea_index: usize,
    pub kind: AnalysisKind,
}

impl AnalysisRequest {
    pub fn new(idea_index: usize, kind: AnalysisKind) -> Self {
        Self { idea_index, kind }
    }
}
