use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::{CatalogRepository, TextGenerator};
use crate::domain::{
    build_recommendation_prompt, parse_response, resolve_ids, validate, CatalogEntry,
    ErrorKind, ParsedResponse, RecommendationError, ValidQuery,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RecommendProductsUseCase {
    catalog: Arc<dyn CatalogRepository>,
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl RecommendProductsUseCase {
    pub fn new(catalog: Arc<dyn CatalogRepository>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            catalog,
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogRepository> {
        &self.catalog
    }

    /// Validate `raw` and run the pipeline. Validation failures never reach
    /// the network.
    pub async fn recommend_raw(&self, raw: &str) -> Result<Vec<CatalogEntry>, RecommendationError> {
        let query = validate(raw)?;
        self.execute(&query).await
    }

    pub async fn execute(&self, query: &ValidQuery) -> Result<Vec<CatalogEntry>, RecommendationError> {
        self.execute_cancellable(query, &CancellationToken::new())
            .await
    }

    /// Run the pipeline, aborting the upstream call if `cancel` fires.
    ///
    /// A result that completes after cancellation is discarded and reported as
    /// [`RecommendationError::Cancelled`].
    pub async fn execute_cancellable(
        &self,
        query: &ValidQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<CatalogEntry>, RecommendationError> {
        info!(
            "Recommending for: {} (model={}, catalog={} entries)",
            query,
            self.generator.model_name(),
            self.catalog.len()
        );

        let start_time = Instant::now();
        let prompt = build_recommendation_prompt(query, self.catalog.entries());
        debug!("Prompt is {} bytes", prompt.len());

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Recommendation cancelled before upstream responded");
                return Err(RecommendationError::Cancelled);
            }
            outcome = tokio::time::timeout(self.timeout, self.generator.generate(&prompt)) => {
                match outcome {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("Upstream did not respond within {:?}", self.timeout);
                        Err(RecommendationError::UpstreamTimeout)
                    }
                }
            }
        };

        if cancel.is_cancelled() {
            debug!("Discarding upstream result that arrived after cancellation");
            return Err(RecommendationError::Cancelled);
        }

        let result = text.and_then(|text| self.interpret(&text));

        match &result {
            Ok(entries) => info!(
                "Recommended {} products in {:.2}s",
                entries.len(),
                start_time.elapsed().as_secs_f64()
            ),
            Err(e) if e.kind() == ErrorKind::Parse => {
                warn!("Could not process upstream response: {e}")
            }
            Err(e) => info!("Recommendation failed: {e}"),
        }

        result
    }

    /// Turn the model's raw text into resolved catalog entries.
    pub fn interpret(&self, text: &str) -> Result<Vec<CatalogEntry>, RecommendationError> {
        debug!("Raw upstream text: {text}");

        let ids = match parse_response(text)? {
            ParsedResponse::NoProductsAvailable => {
                return Err(RecommendationError::no_match(self.catalog.categories()));
            }
            ParsedResponse::ProductIds(ids) => ids,
        };

        let entries = resolve_ids(&ids, self.catalog.entries());
        let dropped = ids.len() - entries.len();
        if dropped > 0 {
            debug!("Dropped {dropped} unknown or repeated ids from upstream answer");
        }

        if entries.is_empty() {
            return Err(RecommendationError::no_match(self.catalog.categories()));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{InMemoryCatalog, ScriptedGenerator};

    fn catalog() -> Arc<dyn CatalogRepository> {
        Arc::new(
            InMemoryCatalog::new(vec![
                CatalogEntry::new("1", "iPhone 15", 799.0, "Smartphones", "A16"),
                CatalogEntry::new("3", "Pixel 8", 699.0, "Smartphones", "Tensor G3"),
                CatalogEntry::new("5", "MacBook Air M3", 1099.0, "Laptops", "Fanless"),
                CatalogEntry::new("7", "ROG Zephyrus", 1499.0, "Gaming", "RTX 4070"),
            ])
            .unwrap(),
        )
    }

    fn use_case(response: &str) -> RecommendProductsUseCase {
        RecommendProductsUseCase::new(catalog(), Arc::new(ScriptedGenerator::new(response)))
    }

    fn ids(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[tokio::test]
    async fn partial_matches_are_kept_in_order() {
        let entries = use_case(r#"["1","5","12"]"#)
            .recommend_raw("phone and laptop")
            .await
            .unwrap();
        assert_eq!(ids(&entries), vec!["1", "5"]);
    }

    #[tokio::test]
    async fn all_unknown_is_no_match() {
        let err = use_case(r#"["99"]"#)
            .recommend_raw("something exotic")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RecommendationError::no_match(vec![
                "Smartphones".to_string(),
                "Laptops".to_string(),
                "Gaming".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn sentinel_is_no_match() {
        let err = use_case("Sorry: NO_PRODUCTS_AVAILABLE")
            .recommend_raw("a pony")
            .await
            .unwrap_err();
        assert!(err.is_no_match());
    }

    #[tokio::test]
    async fn prose_wrapped_answer_is_recovered() {
        let entries = use_case(r#"Sure! Here are some picks: ["3","7"]"#)
            .recommend_raw("anything good")
            .await
            .unwrap();
        assert_eq!(ids(&entries), vec!["3", "7"]);
    }

    #[tokio::test]
    async fn invalid_query_is_rejected_before_generation() {
        let generator = Arc::new(ScriptedGenerator::new(r#"["1"]"#));
        let use_case = RecommendProductsUseCase::new(catalog(), generator.clone());

        let err = use_case.recommend_raw("  x ").await.unwrap_err();
        assert_eq!(err, RecommendationError::Validation(crate::domain::ValidationError::TooShort));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn slow_generator_times_out() {
        let generator = ScriptedGenerator::new(r#"["1"]"#).with_delay(Duration::from_secs(5));
        let use_case = RecommendProductsUseCase::new(catalog(), Arc::new(generator))
            .with_timeout(Duration::from_millis(20));

        let err = use_case.recommend_raw("phone please").await.unwrap_err();
        assert_eq!(err, RecommendationError::UpstreamTimeout);
    }

    #[tokio::test]
    async fn cancellation_aborts_outstanding_call() {
        let generator = ScriptedGenerator::new(r#"["1"]"#).with_delay(Duration::from_secs(5));
        let use_case = RecommendProductsUseCase::new(catalog(), Arc::new(generator));
        let query = validate("phone please").unwrap();
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let err = use_case
            .execute_cancellable(&query, &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn already_cancelled_token_discards_result() {
        let use_case = use_case(r#"["1"]"#);
        let query = validate("phone please").unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = use_case
            .execute_cancellable(&query, &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn generator_errors_pass_through() {
        let generator = ScriptedGenerator::failing(RecommendationError::RateLimited);
        let use_case = RecommendProductsUseCase::new(catalog(), Arc::new(generator));

        let err = use_case.recommend_raw("phone please").await.unwrap_err();
        assert_eq!(err, RecommendationError::RateLimited);
    }

    #[test]
    fn interpret_reports_unparsable_text() {
        let err = use_case("").interpret("no idea, sorry").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
