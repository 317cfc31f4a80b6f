#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("catalog has no cases; at least one case is required to start a round")]
    EmptyCatalog,
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown case: {0}")]
    UnknownCase(String),
    #[error("failed to read catalog file: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse catalog YAML: {0}")]
    CatalogParse(serde_yaml::Error),
    #[error("failed to serialize catalog YAML: {0}")]
    CatalogSerialization(serde_yaml::Error),
}

impl QuizError {
    /// Whether this error prevents the game from starting at all.
    ///
    /// Configuration errors are reported to the operator and never retried.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, QuizError::UnknownCase(_))
    }
}

pub type QuizResult<T> = std::result::Result<T, QuizError>;
