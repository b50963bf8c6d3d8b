//! Answer generator trait and prompt template.

use async_trait::async_trait;

use crate::error::Result;

/// A text generator that turns a prompt into an answer.
///
/// A single call per request, no streaming. Failures should be reported as
/// [`QaError::GenerationUnavailable`](crate::QaError::GenerationUnavailable);
/// they are not retried by the caller.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate text for `prompt`, asking the backend for at most `max_length`
    /// units of output.
    ///
    /// Backends interpret `max_length` in their own unit (tokens for most
    /// hosted models). The caller truncates the returned text to its
    /// character cap regardless.
    async fn generate(&self, prompt: &str, max_length: usize) -> Result<String>;
}

/// Build the generation prompt for a query and its assembled context.
///
/// The prompt keeps the model inside the context, asks it to admit when it
/// does not know, and bounds the answer to `answer_cap` characters.
pub fn build_prompt(query: &str, context: &str, answer_cap: usize) -> String {
    format!(
        "Question: {query}\n\
         Context: {context}\n\n\
         Please provide a detailed and comprehensive answer to the question based only on the context. \
         Include all relevant details and examples mentioned in the context. \
         If the question is not related to the context, state that you only have access to enterprise information. \
         If you do not know the answer, state that you do not know. \
         Keep the answer within {answer_cap} characters."
    )
}
