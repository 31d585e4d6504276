//! Headline source for the Humanity Index: the GDELT Doc 2.0 API.
//!
//! Wraps `reqwest` with typed response deserialization, seendate
//! normalization into [`hindex_core::HeadlineRecord`], and retry with
//! exponential back-off for transient failures. Also provides the
//! documented sample-headline fallback used when the live API yields
//! nothing.

pub mod client;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod types;

mod retry;

pub use client::GdeltClient;
pub use error::GdeltError;
pub use fallback::sample_headlines;
