/// Sampling settings for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Temperature for idea generation. High values favour diverse ideas.
    pub idea_temperature: f32,
    pub analysis_temperature: f32,
    /// Optional cap on completion length, forwarded to the provider.
    pub max_tokens: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            idea_temperature: 1.0,
            analysis_temperature: 1.0,
            max_tokens: None,
        }
    }
}
