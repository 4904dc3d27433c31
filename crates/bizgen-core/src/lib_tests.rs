use crate::{Analysis, AnalysisKind, BusinessSession, Idea, IdeaCount, PipelineError, UserContext};

#[test]
fn user_context_rejects_blank_input() {
    assert_eq!(UserContext::new(""), Err(PipelineError::EmptyContext));
    assert_eq!(UserContext::new("  \n\t "), Err(PipelineError::EmptyContext));
}

#[test]
fn user_context_keeps_text_as_typed() {
    let context = UserContext::new("  tea house in Kyoto ").unwrap();
    assert_eq!(context.as_str(), "  tea house in Kyoto ");
}

#[test]
fn idea_count_bounds() {
    assert_eq!(IdeaCount::new(0), Err(PipelineError::InvalidIdeaCount(0)));
    assert_eq!(IdeaCount::new(6), Err(PipelineError::InvalidIdeaCount(6)));
    for count in 1..=5 {
        assert_eq!(IdeaCount::new(count).unwrap().get(), count);
    }
    assert_eq!(IdeaCount::default().get(), 5);
}

#[test]
fn analysis_kind_parses_path_segments() {
    assert_eq!("stp".parse::<AnalysisKind>(), Ok(AnalysisKind::Stp));
    assert_eq!("PLAN".parse::<AnalysisKind>(), Ok(AnalysisKind::Plan));
    assert_eq!("criticism".parse::<AnalysisKind>(), Ok(AnalysisKind::Criticism));
    assert_eq!("critique".parse::<AnalysisKind>(), Ok(AnalysisKind::Criticism));
    assert!("swot".parse::<AnalysisKind>().is_err());
}

#[test]
fn analysis_kind_serializes_lowercase() {
    let json = serde_json::to_string(&AnalysisKind::Criticism).unwrap();
    assert_eq!(json, "\"criticism\"");

    let kind: AnalysisKind = serde_json::from_str("\"stp\"").unwrap();
    assert_eq!(kind, AnalysisKind::Stp);
}

#[test]
fn missing_prerequisite_message_names_kinds() {
    let err = PipelineError::MissingPrerequisite {
        idea_index: 1,
        missing: vec![AnalysisKind::Stp, AnalysisKind::Plan],
    };
    assert_eq!(
        err.to_string(),
        "Business idea 1 needs stp, plan before this analysis"
    );
}

#[test]
fn session_serializes_stages_as_list() {
    let mut session = BusinessSession::new(
        UserContext::new("bakery").unwrap(),
        vec![Idea::new(1, "Loaf Story")],
    );
    session.record(Analysis {
        idea_index: 1,
        kind: AnalysisKind::Plan,
        text: "Open a stall".to_string(),
    });

    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["context"], "bakery");
    assert_eq!(value["ideas"][0]["index"], 1);
    assert_eq!(value["stages"][0]["kind"], "plan");
    assert_eq!(value["stages"][0]["text"], "Open a stall");
}
