use async_trait::async_trait;

use crate::domain::RecommendationError;

/// Sends a single prompt to a language model and returns its text answer.
///
/// Implementors own transport and vendor-specific details, and must map every
/// failure onto [`RecommendationError`] (status codes, timeouts, empty
/// candidates) so nothing transport-specific leaks to callers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendationError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
