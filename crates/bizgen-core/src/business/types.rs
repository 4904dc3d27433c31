use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PipelineError;

pub const MIN_IDEA_COUNT: u8 = 1;
pub const MAX_IDEA_COUNT: u8 = 5;
pub const DEFAULT_IDEA_COUNT: u8 = 5;

/// Free-form business description supplied once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserContext(String);

impl UserContext {
    /// Rejects empty and whitespace-only input. The text is kept as typed.
    pub fn new(text: impl Into<String>) -> Result<Self, PipelineError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyContext);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of ideas to generate, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdeaCount(u8);

impl IdeaCount {
    pub fn new(count: u8) -> Result<Self, PipelineError> {
        if !(MIN_IDEA_COUNT..=MAX_IDEA_COUNT).contains(&count) {
            return Err(PipelineError::InvalidIdeaCount(count));
        }
        Ok(Self(count))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for IdeaCount {
    fn default() -> Self {
        Self(DEFAULT_IDEA_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// 1-based ordinal, matching the number used in the prompt.
    pub index: usize,
    pub text: String,
}

impl Idea {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Stp,
    Plan,
    Criticism,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [AnalysisKind::Stp, AnalysisKind::Plan, AnalysisKind::Criticism];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Stp => "stp",
            AnalysisKind::Plan => "plan",
            AnalysisKind::Criticism => "criticism",
        }
    }

    /// Section heading shown above the generated text.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::Stp => "STP analysis",
            AnalysisKind::Plan => "Implementation plan",
            AnalysisKind::Criticism => "Critique",
        }
    }

    /// Kinds whose stored text must exist before this kind can be requested.
    pub fn prerequisites(self) -> &'static [AnalysisKind] {
        match self {
            AnalysisKind::Stp | AnalysisKind::Plan => &[],
            AnalysisKind::Criticism => &[AnalysisKind::Stp, AnalysisKind::Plan],
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stp" => Ok(AnalysisKind::Stp),
            "plan" => Ok(AnalysisKind::Plan),
            "criticism" | "critique" => Ok(AnalysisKind::Criticism),
            other => Err(format!("unknown analysis kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub idea_index: usize,
    pub kind: AnalysisKind,
    pub text: String,
}
