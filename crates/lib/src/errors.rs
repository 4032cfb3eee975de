use thiserror::Error;

/// A generic error type for all content backends.
///
/// Each backend is responsible for mapping its specific errors (HTTP transport,
/// JSON decoding) into these standardized variants. Only primary content fetches
/// surface these to callers; enrichment lookups wrap them in [`crate::Enrichment::Failed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content source returned status {status} for {url}")]
    RemoteFetch { status: u16, url: String },

    #[error("Failed to fetch content from the source: {0}")]
    Fetch(String),

    #[error("Failed to decode content payload: {0}")]
    Decode(String),

    #[error("Invalid content source URL: {0}")]
    InvalidUrl(String),
}

impl ContentError {
    /// The HTTP status carried by a `RemoteFetch` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ContentError::RemoteFetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Decode(err.to_string())
    }
}
