use thiserror::Error;

use super::types::AnalysisKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Business context must not be empty")]
    EmptyContext,

    #[error("Idea count must be between 1 and 5, got {0}")]
    InvalidIdeaCount(u8),

    #[error("Business idea {0} not found")]
    IdeaNotFound(usize),

    #[error("Business idea {idea_index} needs {} before this analysis", format_kinds(.missing))]
    MissingPrerequisite {
        idea_index: usize,
        missing: Vec<AnalysisKind>,
    },

    #[error("LLM error while generating {stage}: {message}")]
    Llm { stage: String, message: String },
}

fn format_kinds(kinds: &[AnalysisKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
