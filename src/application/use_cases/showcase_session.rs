use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::{BrowseCatalogUseCase, RecommendProductsUseCase};
use crate::domain::{validate, CatalogEntry, ErrorKind, RecommendationError, ShowcaseView};

/// Display state for one shopper: the listing on screen, which view produced
/// it, and the error currently shown.
///
/// A failed search never clears what is already displayed. A cancelled search
/// changes nothing at all. `search` takes `&mut self`, so a session cannot
/// have two searches in flight.
pub struct ShowcaseSession {
    browse: BrowseCatalogUseCase,
    recommender: Arc<RecommendProductsUseCase>,
    entries: Vec<CatalogEntry>,
    view: ShowcaseView,
    error: Option<String>,
    error_kind: Option<ErrorKind>,
}

impl ShowcaseSession {
    pub fn new(browse: BrowseCatalogUseCase, recommender: Arc<RecommendProductsUseCase>) -> Self {
        let entries = browse.featured();
        Self {
            browse,
            recommender,
            entries,
            view: ShowcaseView::Featured,
            error: None,
            error_kind: None,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn view(&self) -> &ShowcaseView {
        &self.view
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn categories(&self) -> Vec<String> {
        self.browse.categories()
    }

    pub fn show_featured(&mut self) {
        self.entries = self.browse.featured();
        self.view = ShowcaseView::Featured;
        self.clear_error();
    }

    /// Switch to a category listing. Unknown categories leave the listing
    /// untouched and show an error instead.
    pub fn select_category(&mut self, category: &str) -> bool {
        match self.browse.resolve_category(category) {
            Some(name) => {
                self.entries = self.browse.by_category(&name);
                self.view = ShowcaseView::Category { name };
                self.clear_error();
                true
            }
            None => {
                self.error = Some(format!(
                    "Unknown category \"{}\". Available categories: {}",
                    category.trim(),
                    self.browse.categories().join(", ")
                ));
                self.error_kind = Some(ErrorKind::Validation);
                false
            }
        }
    }

    /// Run one recommendation round and apply its outcome.
    ///
    /// The previous error stays visible until the round finishes, and a
    /// cancelled round leaves it in place. Returns the number of entries now displayed on success.
    pub async fn search(
        &mut self,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<usize, RecommendationError> {
        let outcome = match validate(raw) {
            Ok(query) => self
                .recommender
                .execute_cancellable(&query, cancel)
                .await
                .map(|entries| (query, entries)),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok((query, entries)) => {
                self.clear_error();
                self.entries = entries;
                self.view = ShowcaseView::Recommendations {
                    query: query.into_inner(),
                };
                Ok(self.entries.len())
            }
            Err(e) if e.is_cancelled() => {
                debug!("Search abandoned; keeping current state");
                Err(e)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.error_kind = Some(e.kind());
                Err(e)
            }
        }
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.error_kind = None;
    }
}
