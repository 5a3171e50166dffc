use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Expected a JSON array of records, found {found}")]
    NotASequence { found: &'static str },

    #[error("Cursor record {0} is no longer in the collection")]
    CursorNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
