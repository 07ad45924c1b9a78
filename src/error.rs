use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("site rebuild failed: {0}")]
    Rebuild(String),
}

pub type Result<T> = std::result::Result<T, Error>;
