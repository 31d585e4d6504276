use serde::Deserialize;

/// Top-level GDELT `ArtList` response envelope.
#[derive(Debug, Deserialize)]
pub struct GdeltResponse {
    #[serde(default)]
    pub articles: Vec<GdeltArticle>,
}

/// One article entry as GDELT returns it. Every field is optional on the
/// wire; normalization decides what is usable.
#[derive(Debug, Deserialize)]
pub struct GdeltArticle {
    pub url: Option<String>,
    pub title: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "seendate")]
    pub seen_date: Option<String>,
}
