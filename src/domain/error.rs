use thiserror::Error;

/// Rejections produced by [`super::validate`] before any network call.
///
/// The `Display` text is shown to the shopper verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your preferences")]
    EmptyQuery,

    #[error("Please enter at least 3 characters")]
    TooShort,

    #[error("Please keep your query under 500 characters")]
    TooLong,
}

/// Coarse classification of a [`RecommendationError`], used by callers to pick
/// a presentation without inspecting variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Transport,
    Parse,
    NoMatch,
    Cancelled,
}

/// Every failure the recommendation pipeline can report. Nothing else crosses
/// the pipeline boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Gemini API key is not configured. Set GEMINI_API_KEY in the environment.")]
    MissingCredential,

    #[error("Invalid API key. Please check your GEMINI_API_KEY.")]
    InvalidCredentials,

    #[error("API access denied. Please verify your Gemini API key permissions.")]
    AccessDenied,

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("API request failed with status {0}")]
    UpstreamFailure(u16),

    #[error("The recommendation service did not respond in time. Please try again.")]
    UpstreamTimeout,

    #[error("Failed to connect to recommendation service: {0}")]
    ConnectionFailed(String),

    #[error("upstream response contained no candidate text")]
    EmptyUpstreamResponse,

    #[error("upstream response could not be parsed: {0}")]
    UnparsableResponse(String),

    #[error("no catalog products matched the query")]
    NoMatchingProducts { categories: Vec<String> },

    #[error("request was cancelled")]
    Cancelled,
}

impl RecommendationError {
    pub fn unparsable(raw: impl Into<String>) -> Self {
        Self::UnparsableResponse(raw.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionFailed(msg.into())
    }

    pub fn no_match(categories: Vec<String>) -> Self {
        Self::NoMatchingProducts { categories }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::MissingCredential => ErrorKind::Configuration,
            Self::InvalidCredentials
            | Self::AccessDenied
            | Self::RateLimited
            | Self::UpstreamFailure(_)
            | Self::UpstreamTimeout
            | Self::ConnectionFailed(_) => ErrorKind::Transport,
            Self::EmptyUpstreamResponse | Self::UnparsableResponse(_) => ErrorKind::Parse,
            Self::NoMatchingProducts { .. } => ErrorKind::NoMatch,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatchingProducts { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Text suitable for showing to the shopper.
    ///
    /// Parse failures collapse to a generic message; their details only go to
    /// the log. A no-match names the categories the catalog actually carries.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => format!("Service misconfigured: {self}"),
            Self::EmptyUpstreamResponse | Self::UnparsableResponse(_) => {
                "Sorry, we couldn't process the recommendation response. Please try again."
                    .to_string()
            }
            Self::NoMatchingProducts { categories } if categories.is_empty() => {
                "Sorry, we don't have that product yet. Please try a different search.".to_string()
            }
            Self::NoMatchingProducts { categories } => format!(
                "Sorry, we don't have that product yet. Please try searching for something else from our available categories: {}.",
                join_categories(categories)
            ),
            other => other.to_string(),
        }
    }
}

fn join_categories(categories: &[String]) -> String {
    match categories {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

/// Failures while loading the catalog from its static source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    #[error("Invalid product {id}: {reason}")]
    InvalidEntry { id: String, reason: String },
}

impl CatalogError {
    pub fn invalid_entry(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
