//! LLM Providers
//!
//! Implementations of [`crate::CompletionProvider`] for hosted LLM services.

pub(crate) mod common;
pub mod openai;

pub use openai::OpenAIProvider;
