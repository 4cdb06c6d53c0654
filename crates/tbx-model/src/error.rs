use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown field name: {0}")]
    UnknownField(String),
    #[error("field name '{0}' is missing its type")]
    MissingFieldType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
