//! Scoring engine for the Humanity Index.
//!
//! Reduces a batch of news headlines to a bounded daily index: headlines are
//! clustered into events, each cluster is categorized and scored against the
//! source-reliability table, and the index model aggregates the scored rows
//! into one integer per day in `[-100, 100]`.
//!
//! Every stage is a pure, single-threaded function over immutable inputs;
//! the whole pipeline is deterministic for a given input and configuration.

pub mod categorize;
pub mod cluster;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod summarize;

pub use categorize::{Categorization, Categorizer};
pub use cluster::cluster;
pub use error::EngineError;
pub use model::compute;
pub use pipeline::{score_headlines, ScoringOutcome};
pub use summarize::summarize;
