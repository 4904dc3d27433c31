pub mod business;
pub mod logging;
pub mod prompts;
pub mod session;

pub use business::types::{DEFAULT_IDEA_COUNT, MAX_IDEA_COUNT, MIN_IDEA_COUNT};
pub use business::{Analysis, AnalysisKind, Idea, IdeaCount, PipelineError, UserContext};
pub use session::BusinessSession;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
