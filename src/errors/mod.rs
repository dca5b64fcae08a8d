use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeederError {
    // Configuration errors
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Feed list not found: {0}")]
    FeedListNotFound(String),

    #[error("Feed list is malformed: {0}")]
    FeedListParse(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    // Sink errors
    #[error("Notion returned {status}: {body}")]
    Sink { status: u16, body: String },

    #[error("Notion error: {0}")]
    Notion(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<notion::NotionError> for FeederError {
    fn from(err: notion::NotionError) -> Self {
        match err {
            notion::NotionError::Api { status, body } => FeederError::Sink { status, body },
            other => FeederError::Notion(other.to_string()),
        }
    }
}

pub type FeederResult<T> = Result<T, FeederError>;
