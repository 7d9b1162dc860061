use std::fmt;

use crate::error::FailureKind;
use crate::models::{SearchResponse, SearchResult};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a legal question";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Please try a different query.";

/// Trimmed, non-empty query text. Only [`Query::parse`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one accepted submission. Later submissions get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    ShowingResults(Vec<SearchResult>),
    ShowingError(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The input was empty after trimming.
    Rejected,
    /// A query was accepted and its request issued.
    Submitted,
    /// The in-flight request finished.
    Resolved(Result<SearchResponse, FailureKind>),
}

/// The single transition function for the query UI.
///
/// `Resolved` only has an effect while `Loading`, so a request ends the
/// loading state at most once.
pub fn reduce(state: &UiState, event: UiEvent) -> UiState {
    match event {
        UiEvent::Rejected => UiState::ShowingError(EMPTY_QUERY_MESSAGE.to_string()),
        UiEvent::Submitted => UiState::Loading,
        UiEvent::Resolved(outcome) => {
            if !state.is_loading() {
                return state.clone();
            }
            match outcome {
                Err(kind) => UiState::ShowingError(format!("Error: {}", kind)),
                Ok(SearchResponse::Error(message)) => UiState::ShowingError(message),
                Ok(SearchResponse::Results(results)) if !results.is_empty() => {
                    UiState::ShowingResults(results)
                }
                Ok(SearchResponse::Results(_)) => {
                    UiState::ShowingError(NO_RESULTS_MESSAGE.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn result(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            snippet: "text".to_string(),
            link: None,
            display_link: None,
        }
    }

    #[rstest]
    #[case("", None)]
    #[case("   \t\n", None)]
    #[case("  robbery ", Some("robbery"))]
    #[case("child custody", Some("child custody"))]
    fn query_is_trimmed_and_never_empty(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(Query::parse(raw).as_ref().map(Query::as_str), expected);
    }

    #[test]
    fn rejection_shows_the_validation_message() {
        let next = reduce(&UiState::ShowingResults(vec![result("a")]), UiEvent::Rejected);
        assert_eq!(next, UiState::ShowingError(EMPTY_QUERY_MESSAGE.to_string()));
    }

    #[test]
    fn submission_replaces_prior_results_and_errors() {
        assert_eq!(
            reduce(&UiState::ShowingResults(vec![result("a")]), UiEvent::Submitted),
            UiState::Loading
        );
        assert_eq!(
            reduce(&UiState::ShowingError("old".to_string()), UiEvent::Submitted),
            UiState::Loading
        );
    }

    #[rstest]
    #[case(
        Err(FailureKind::HttpStatus(500)),
        UiState::ShowingError("Error: Network response was not ok".to_string())
    )]
    #[case(
        Err(FailureKind::Transport("connection refused".to_string())),
        UiState::ShowingError("Error: connection refused".to_string())
    )]
    #[case(
        Ok(SearchResponse::Error("Query is required".to_string())),
        UiState::ShowingError("Query is required".to_string())
    )]
    #[case(
        Ok(SearchResponse::Results(vec![])),
        UiState::ShowingError(NO_RESULTS_MESSAGE.to_string())
    )]
    fn resolution_outcomes(
        #[case] outcome: Result<SearchResponse, FailureKind>,
        #[case] expected: UiState,
    ) {
        assert_eq!(reduce(&UiState::Loading, UiEvent::Resolved(outcome)), expected);
    }

    #[test]
    fn results_keep_their_order() {
        let results = vec![result("first"), result("second"), result("third")];
        let next = reduce(
            &UiState::Loading,
            UiEvent::Resolved(Ok(SearchResponse::Results(results.clone()))),
        );
        assert_eq!(next, UiState::ShowingResults(results));
    }

    #[test]
    fn resolution_outside_loading_is_ignored() {
        let shown = UiState::ShowingError(EMPTY_QUERY_MESSAGE.to_string());
        let next = reduce(
            &shown,
            UiEvent::Resolved(Ok(SearchResponse::Results(vec![result("late")]))),
        );
        assert_eq!(next, shown);
    }
}
