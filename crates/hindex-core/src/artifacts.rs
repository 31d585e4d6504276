//! File names of the JSON artifacts the pipeline writes and the server
//! serves. Shared so the writer and the reader cannot drift apart.

/// Date-ordered `[{date, HI}]` series.
pub const INDEX_SERIES_FILE: &str = "index_series.json";

/// The last point of the series.
pub const LATEST_FILE: &str = "latest.json";

/// Transparency list of scored events behind the current series.
pub const EVENTS_FILE: &str = "events.json";
