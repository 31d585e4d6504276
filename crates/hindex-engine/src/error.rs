use thiserror::Error;

/// Errors raised by the scoring engine.
///
/// Categorization and clustering never fail on malformed records — they skip
/// or coerce. The index model does fail on configuration problems, because a
/// wrong tunable silently corrupts every downstream number.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required tunable is missing or outside its valid range.
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// A scored event row is malformed. This indicates a bug in the cluster
    /// summarizer, not bad input data, so the run aborts.
    #[error("malformed scored event: {0}")]
    DataShape(String),

    /// A categorizer rule pattern failed to compile.
    #[error("categorizer rule '{pattern}' failed to compile: {source}")]
    Rule {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
