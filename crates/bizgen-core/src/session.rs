use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::business::{Analysis, AnalysisKind, Idea, PipelineError, UserContext};

/// One user's context, the ideas generated from it, and the latest analysis
/// of each kind per idea.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessSession {
    context: UserContext,
    ideas: Vec<Idea>,
    #[serde(serialize_with = "serialize_stages")]
    stages: BTreeMap<(usize, AnalysisKind), Analysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessSession {
    pub fn new(context: UserContext, ideas: Vec<Idea>) -> Self {
        let now = Utc::now();
        Self {
            context,
            ideas,
            stages: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn context(&self) -> &UserContext {
        &self.context
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn idea(&self, index: usize) -> Result<&Idea, PipelineError> {
        self.ideas
            .iter()
            .find(|idea| idea.index == index)
            .ok_or(PipelineError::IdeaNotFound(index))
    }

    pub fn analysis(&self, idea_index: usize, kind: AnalysisKind) -> Option<&Analysis> {
        self.stages.get(&(idea_index, kind))
    }

    /// Stored analyses for one idea, in STP, Plan, Criticism order.
    pub fn analyses_for(&self, idea_index: usize) -> Vec<&Analysis> {
        AnalysisKind::ALL
            .iter()
            .filter_map(|kind| self.analysis(idea_index, *kind))
            .collect()
    }

    /// Prerequisite kinds of `kind` that have no stored text yet for the idea.
    pub fn missing_prerequisites(&self, idea_index: usize, kind: AnalysisKind) -> Vec<AnalysisKind> {
        kind.prerequisites()
            .iter()
            .copied()
            .filter(|required| self.analysis(idea_index, *required).is_none())
            .collect()
    }

    /// Stores `analysis`, replacing any earlier result for the same idea and kind.
    pub fn record(&mut self, analysis: Analysis) {
        self.stages
            .insert((analysis.idea_index, analysis.kind), analysis);
        self.updated_at = Utc::now();
    }
}

fn serialize_stages<S>(
    stages: &BTreeMap<(usize, AnalysisKind), Analysis>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(stages.values())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BusinessSession {
        BusinessSession::new(
            UserContext::new("coffee shop").unwrap(),
            vec![Idea::new(1, "Bean There"), Idea::new(2, "Brew Crew")],
        )
    }

    fn analysis(idea_index: usize, kind: AnalysisKind, text: &str) -> Analysis {
        Analysis {
            idea_index,
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn idea_lookup_uses_one_based_index() {
        let session = session();

        assert_eq!(session.idea(1).unwrap().text, "Bean There");
        assert_eq!(session.idea(2).unwrap().text, "Brew Crew");
        assert_eq!(session.idea(0), Err(PipelineError::IdeaNotFound(0)));
        assert_eq!(session.idea(3), Err(PipelineError::IdeaNotFound(3)));
    }

    #[test]
    fn criticism_lists_missing_prerequisites() {
        let mut session = session();
        assert_eq!(
            session.missing_prerequisites(1, AnalysisKind::Criticism),
            vec![AnalysisKind::Stp, AnalysisKind::Plan]
        );

        session.record(analysis(1, AnalysisKind::Plan, "plan"));
        assert_eq!(
            session.missing_prerequisites(1, AnalysisKind::Criticism),
            vec![AnalysisKind::Stp]
        );

        session.record(analysis(1, AnalysisKind::Stp, "stp"));
        assert!(session.missing_prerequisites(1, AnalysisKind::Criticism).is_empty());
    }

    #[test]
    fn prerequisites_are_tracked_per_idea() {
        let mut session = session();
        session.record(analysis(1, AnalysisKind::Stp, "stp"));
        session.record(analysis(1, AnalysisKind::Plan, "plan"));

        assert!(session.missing_prerequisites(1, AnalysisKind::Criticism).is_empty());
        assert_eq!(session.missing_prerequisites(2, AnalysisKind::Criticism).len(), 2);
    }

    #[test]
    fn record_replaces_previous_result() {
        let mut session = session();
        session.record(analysis(2, AnalysisKind::Stp, "first"));
        session.record(analysis(2, AnalysisKind::Stp, "second"));

        assert_eq!(session.analysis(2, AnalysisKind::Stp).unwrap().text, "second");
        assert_eq!(session.analyses_for(2).len(), 1);
    }

    #[test]
    fn analyses_for_returns_pipeline_order() {
        let mut session = session();
        session.record(analysis(1, AnalysisKind::Criticism, "c"));
        session.record(analysis(1, AnalysisKind::Stp, "s"));
        session.record(analysis(1, AnalysisKind::Plan, "p"));

        let kinds: Vec<_> = session.analyses_for(1).iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AnalysisKind::Stp, AnalysisKind::Plan, AnalysisKind::Criticism]
        );
    }
}
