use std::sync::Arc;
use std::time::Instant;

use bizgen_core::prompts::{analysis_prompt, idea_prompt};
use bizgen_core::{
    Analysis, BusinessSession, Idea, IdeaCount, PipelineError, UserContext,
};
use bizgen_llm::{CompletionProvider, CompletionRequest};

use crate::config::PipelineConfig;
use crate::request::{AnalysisRequest, GenerateIdeasRequest};

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Sends the prompt chain to the provider, one request at a time.
pub struct Pipeline {
    provider: Arc<dyn CompletionProvider>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    /// Generate `request.count` ideas for the context.
    ///
    /// Input is validated before any provider call. Ideas are requested
    /// sequentially; the first failure aborts the run.
    pub async fn generate_ideas(&self, request: GenerateIdeasRequest) -> Result<BusinessSession> {
        let context = UserContext::new(request.context).map_err(|e| {
            log::warn!("Rejected idea generation: {}", e);
            e
        })?;
        let count = IdeaCount::new(request.count).map_err(|e| {
            log::warn!("Rejected idea generation: {}", e);
            e
        })?;

        log::info!(
            "Generating {} business ideas with {} (context: {} chars)",
            count.get(),
            self.provider.name(),
            context.as_str().chars().count()
        );

        let mut ideas = Vec::with_capacity(count.get() as usize);
        for ordinal in 1..=count.get() as usize {
            let stage = format!("business idea {}", ordinal);
            let prompt = idea_prompt(&context, ordinal);
            let text = self
                .submit(&stage, prompt, self.config.idea_temperature)
                .await?;
            ideas.push(Idea::new(ordinal, text));
        }

        log::info!("Generated {} business ideas", ideas.len());
        Ok(BusinessSession::new(context, ideas))
    }

    /// Generate one analysis for an idea and store it in the session.
    ///
    /// The prompt embeds the stored idea text. Criticism additionally embeds
    /// the stored STP and Plan texts and is refused, without a provider call,
    /// until both exist.
    pub async fn generate_analysis(
        &self,
        session: &mut BusinessSession,
        request: AnalysisRequest,
    ) -> Result<Analysis> {
        let AnalysisRequest { idea_index, kind } = request;

        let missing = session.missing_prerequisites(idea_index, kind);
        let idea = session.idea(idea_index)?;
        if !missing.is_empty() {
            log::warn!(
                "Refusing {} for business idea {}: missing {:?}",
                kind,
                idea_index,
                missing
            );
            return Err(PipelineError::MissingPrerequisite {
                idea_index,
                missing,
            });
        }

        let prompt = analysis_prompt(kind, idea, |prior| {
            session
                .analysis(idea_index, prior)
                .map(|analysis| analysis.text.as_str())
        })
        .ok_or_else(|| PipelineError::MissingPrerequisite {
            idea_index,
            missing: kind.prerequisites().to_vec(),
        })?;

        let stage = format!("{} for business idea {}", kind.label(), idea_index);
        let text = self
            .submit(&stage, prompt, self.config.analysis_temperature)
            .await?;

        let analysis = Analysis {
            idea_index,
            kind,
            text,
        };
        session.record(analysis.clone());
        Ok(analysis)
    }

    async fn submit(&self, stage: &str, prompt: String, temperature: f32) -> Result<String> {
        let request = CompletionRequest::new(prompt, temperature).with_max_tokens(self.config.max_tokens);
        let started = Instant::now();

        log::debug!(
            "Submitting {} ({} prompt chars, temperature {})",
            stage,
            request.prompt.chars().count(),
            temperature
        );

        match self.provider.complete(&request).await {
            Ok(text) => {
                log::debug!(
                    "{} completed in {}ms ({} chars)",
                    stage,
                    started.elapsed().as_millis(),
                    text.chars().count()
                );
                Ok(text)
            }
            Err(e) => {
                log::error!("{} failed after {}ms: {}", stage, started.elapsed().as_millis(), e);
                Err(PipelineError::Llm {
                    stage: stage.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
