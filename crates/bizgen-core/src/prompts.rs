//! Prompt templates.
//!
//! Every template is a pure function of its inputs. Ordinals are 1-based so the
//! model sees the same numbering the user does.

use crate::business::{AnalysisKind, Idea, UserContext};

const WORD_LIMIT: &str = "For this business, the answer must be within 100 words.";

pub fn idea_prompt(context: &UserContext, ordinal: usize) -> String {
    format!(
        "You are a business mentor. Given the context of business, your job is to help your mentee \
generate a new business with a unique business name and a strong competitive advantage for that business.\n\
{WORD_LIMIT}\n\
Make sure that the answer is in the same language as the language of the context that the user type in.\n\
\n\
context: {context}\n\
This is business idea {ordinal}:\n",
        context = context.as_str(),
    )
}

pub fn stp_prompt(idea: &Idea) -> String {
    format!(
        "You are an experienced marketing strategist. Your job is to write a Segmentation, Targeting and \
Positioning (STP) analysis for business idea {n}.\n\
{WORD_LIMIT}\n\
Make sure that the answer is in the same language as the language of the Business Idea {n}.\n\
\n\
Business Idea {n}:\n\
{text}\n\
STP analysis from a marketing strategist:\n",
        n = idea.index,
        text = idea.text.trim(),
    )
}

pub fn plan_prompt(idea: &Idea) -> String {
    format!(
        "You are a talented business consultant. Your job is to write a implementation plan for business idea {n}.\n\
{WORD_LIMIT}\n\
Make sure that the answer is in the same language as the language of the Business Idea {n}.\n\
\n\
Business Idea {n}:\n\
{text}\n\
implementation plan from a business consultant:\n",
        n = idea.index,
        text = idea.text.trim(),
    )
}

pub fn criticism_prompt(idea: &Idea, stp: &str, plan: &str) -> String {
    format!(
        "You are a critical investor. Your job is to point out the weaknesses and risks of business idea {n}, \
its STP analysis and its implementation plan, and to suggest how to address them.\n\
{WORD_LIMIT}\n\
Make sure that the answer is in the same language as the language of the Business Idea {n}.\n\
\n\
Business Idea {n}:\n\
{text}\n\
\n\
STP analysis:\n\
{stp}\n\
\n\
Implementation plan:\n\
{plan}\n\
critique from an investor:\n",
        n = idea.index,
        text = idea.text.trim(),
        stp = stp.trim(),
        plan = plan.trim(),
    )
}

/// Builds the prompt for `kind`. `prior` looks up stored text of earlier stages
/// for the same idea; `None` is returned when a prerequisite is missing.
pub fn analysis_prompt<'a, F>(kind: AnalysisKind, idea: &Idea, prior: F) -> Option<String>
where
    F: Fn(AnalysisKind) -> Option<&'a str>,
{
    match kind {
        AnalysisKind::Stp => Some(stp_prompt(idea)),
        AnalysisKind::Plan => Some(plan_prompt(idea)),
        AnalysisKind::Criticism => {
            let stp = prior(AnalysisKind::Stp)?;
            let plan = prior(AnalysisKind::Plan)?;
            Some(criticism_prompt(idea, stp, plan))
        }
    }
}
