pub mod config;
pub mod orchestrator;
pub mod request;

pub use config::PipelineConfig;
pub use orchestrator::Pipeline;
pub use request::{AnalysisRequest, GenerateIdeasRequest};
