use thiserror::Error;

/// Errors raised by a [`crate::CharacterRepository`].
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("character {0} not found")]
    NotFound(i64),

    #[error("access to character {0} denied")]
    AccessDenied(i64),

    #[error("failed to parse character response: {0}")]
    Parse(String),

    #[error("character request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors surfaced by a [`crate::CharacterService`] to bot handlers.
#[derive(Error, Debug)]
pub enum CharacterError {
    #[error("character {0} not found")]
    NotFound(i64),

    #[error("access to character {0} denied")]
    AccessDenied(i64),

    #[error("character repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for CharacterError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => CharacterError::NotFound(id),
            RepositoryError::AccessDenied(id) => CharacterError::AccessDenied(id),
            other => CharacterError::Repository(other.to_string()),
        }
    }
}
