use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("one/ directory not found under {0}")]
    OntologyRootNotFound(String),

    #[error("invalid dimension '{0}': must be one of groups, people, things, connections, events, knowledge")]
    InvalidDimension(String),

    #[error("invalid artifact kind: {0}")]
    InvalidArtifactKind(String),

    #[error("malformed hook event: {0}")]
    MalformedEvent(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
