use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// A rename made two columns share a header label.
    #[error("column label '{label}' is produced by more than one field")]
    DuplicateColumn { label: String },
}

pub type Result<T> = std::result::Result<T, ProjectError>;
