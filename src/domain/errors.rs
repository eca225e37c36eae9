use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{resource} id not found: {id}")]
    NotFound { resource: &'static str, id: String },
    #[error("{0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidInput(message.into())
    }
}
