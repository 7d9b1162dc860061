use serde::{Deserialize, Serialize};
use validator::Validate;

/// Form body of `POST /search`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub query: String,
}

impl SearchForm {
    pub fn normalized(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(
        rename = "displayLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_link: Option<String>,
}

/// The JSON body exchanged with `/search`. Both fields are optional on the
/// wire; [`SearchResponse`] is the classified form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SearchResult>>,
}

impl SearchResponseBody {
    pub fn results(results: Vec<SearchResult>) -> Self {
        Self {
            error: None,
            results: Some(results),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResponse {
    Error(String),
    Results(Vec<SearchResult>),
}

impl From<SearchResponseBody> for SearchResponse {
    fn from(body: SearchResponseBody) -> Self {
        match body.error {
            Some(message) if !message.is_empty() => SearchResponse::Error(message),
            _ => SearchResponse::Results(body.results.unwrap_or_default()),
        }
    }
}
