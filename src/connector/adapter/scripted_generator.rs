use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::TextGenerator;
use crate::domain::RecommendationError;

/// Offline [`TextGenerator`] that plays back canned answers, optionally after
/// a delay.
///
/// Answers are used in order; once exhausted, the last one repeats.
pub struct ScriptedGenerator {
    script: Vec<Result<String, RecommendationError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self::sequence(vec![Ok(response.into())])
    }

    pub fn failing(error: RecommendationError) -> Self {
        Self::sequence(vec![Err(error)])
    }

    /// An empty script behaves like a model that returned no candidates.
    pub fn sequence(script: Vec<Result<String, RecommendationError>>) -> Self {
        Self {
            script,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many prompts this generator has received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, RecommendationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let last = self.script.len().checked_sub(1);
        match last {
            Some(last) => self.script[call.min(last)].clone(),
            None => Err(RecommendationError::EmptyUpstreamResponse),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
