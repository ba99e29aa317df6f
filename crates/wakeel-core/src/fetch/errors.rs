use crate::browser::BrowserError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No access token in page storage. The caller should run the auth
    /// recovery cycle and refetch.
    #[error("No access token available in page context")]
    TokenMissing,

    /// 401 that survived the one-shot token re-read retry.
    #[error("Request unauthorized after retry")]
    Unauthorized,

    #[error("Request failed with HTTP status {status}")]
    Http { status: u16 },

    #[error("In-page request transport failure: {message}")]
    Transport { message: String },

    #[error("Unexpected response shape: {message}")]
    BadPayload { message: String },

    /// A page after the first failed. The whole collection is discarded so
    /// the change detector never diffs against a truncated snapshot.
    #[error("Pagination failed on page {page}: {source}")]
    PartialCollection {
        page: u32,
        #[source]
        source: Box<FetchError>,
    },

    #[error("Browser operation failed: {source}")]
    Browser {
        #[from]
        source: BrowserError,
    },
}

impl crate::errors::WakeelError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::TokenMissing => "FETCH_TOKEN_MISSING",
            FetchError::Unauthorized => "FETCH_UNAUTHORIZED",
            FetchError::Http { .. } => "FETCH_HTTP_ERROR",
            FetchError::Transport { .. } => "FETCH_TRANSPORT_ERROR",
            FetchError::BadPayload { .. } => "FETCH_BAD_PAYLOAD",
            FetchError::PartialCollection { .. } => "FETCH_PARTIAL_COLLECTION",
            FetchError::Browser { .. } => "FETCH_BROWSER_ERROR",
        }
    }

    fn is_operational(&self) -> bool {
        matches!(
            self,
            FetchError::TokenMissing | FetchError::Unauthorized | FetchError::Http { .. }
        )
    }
}

impl FetchError {
    /// Whether the auth-recovery-and-refetch cycle is worth attempting.
    pub fn is_auth_related(&self) -> bool {
        match self {
            FetchError::TokenMissing | FetchError::Unauthorized => true,
            FetchError::PartialCollection { source, .. } => source.is_auth_related(),
            _ => false,
        }
    }
}
