pub mod error;
pub mod types;

pub use error::PipelineError;
pub use types::{Analysis, AnalysisKind, Idea, IdeaCount, UserContext};
