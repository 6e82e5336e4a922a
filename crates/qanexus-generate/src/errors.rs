use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The locale key has no registered formats for the requested category.
    #[error("unknown locale '{locale}' for category '{category}'")]
    UnknownLocale { category: String, locale: String },
    /// The category is not registered in the catalog or generator registry.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    /// A format template is malformed, or an assembled value failed its
    /// constraint set. Never retried.
    #[error("constraint violation: {0}")]
    Constraint(String),
    /// A model field could not be generated; the whole build is aborted.
    #[error("field '{field}' failed to generate: {source}")]
    ModelField {
        field: String,
        #[source]
        source: Box<GenerationError>,
    },
    /// A cross-field rule stayed unsatisfied within the retry budget.
    #[error("rule '{rule}' on field '{field}' unsatisfied after {attempts} attempts")]
    ModelConsistency {
        rule: String,
        field: String,
        attempts: u32,
    },
}

/// Convenience alias for results returned by the generation engine.
pub type Result<T> = std::result::Result<T, GenerationError>;
