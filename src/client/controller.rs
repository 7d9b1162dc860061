use tracing::{debug, error};

use super::render::{render, View};
use super::state::{reduce, Query, RequestToken, UiEvent, UiState};
use super::transport::SearchTransport;
use crate::error::FailureKind;
use crate::models::SearchResponse;

/// An accepted submission whose request has not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub token: RequestToken,
    pub query: Query,
}

/// Drives the query form: validates input, issues the search and folds the
/// outcome back into [`UiState`].
///
/// Only the most recent submission may resolve the state. Responses for
/// earlier tokens are dropped when they arrive.
pub struct QueryController<T> {
    transport: T,
    state: UiState,
    issued: u64,
    latest: Option<RequestToken>,
}

impl<T: SearchTransport> QueryController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: UiState::Idle,
            issued: 0,
            latest: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handles a form submission. Returns `None` when the input was blank,
    /// in which case no request may be issued.
    pub fn begin(&mut self, raw: &str) -> Option<PendingSearch> {
        let Some(query) = Query::parse(raw) else {
            self.latest = None;
            self.apply(UiEvent::Rejected);
            return None;
        };

        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);
        self.apply(UiEvent::Submitted);
        debug!(token = token.0, "search submitted");
        Some(PendingSearch { token, query })
    }

    /// Applies the outcome of the request identified by `token`. Returns
    /// `false` if the request was superseded and the outcome discarded.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<SearchResponse, FailureKind>,
    ) -> bool {
        if self.latest != Some(token) {
            debug!(token = token.0, "discarding superseded search response");
            return false;
        }
        if let Err(kind) = &outcome {
            error!("Error: {}", kind);
        }
        self.latest = None;
        self.apply(UiEvent::Resolved(outcome));
        true
    }

    /// Runs a whole submit/fetch/resolve cycle.
    pub async fn submit(&mut self, raw: &str) -> &UiState {
        if let Some(pending) = self.begin(raw) {
            let outcome = self.transport.search(&pending.query).await;
            self.resolve(pending.token, outcome);
        }
        &self.state
    }

    fn apply(&mut self, event: UiEvent) {
        self.state = reduce(&self.state, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::{EMPTY_QUERY_MESSAGE, NO_RESULTS_MESSAGE};
    use crate::client::transport::MockSearchTransport;
    use crate::models::SearchResult;
    use rstest::rstest;

    fn result(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            snippet: format!("{} snippet", title),
            link: Some("#".to_string()),
            display_link: Some("example.com".to_string()),
        }
    }

    fn answering(
        outcome: Result<SearchResponse, FailureKind>,
    ) -> QueryController<MockSearchTransport> {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_search()
            .times(1)
            .returning(move |_| outcome.clone());
        QueryController::new(transport)
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    #[case("\n\t")]
    #[actix_rt::test]
    async fn blank_input_never_reaches_the_network(#[case] raw: &str) {
        let mut transport = MockSearchTransport::new();
        transport.expect_search().times(0);
        let mut controller = QueryController::new(transport);

        let state = controller.submit(raw).await;
        assert_eq!(state, &UiState::ShowingError(EMPTY_QUERY_MESSAGE.to_string()));
    }

    #[actix_rt::test]
    async fn query_is_sent_trimmed() {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_search()
            .withf(|query: &Query| query.as_str() == "report robbery")
            .times(1)
            .returning(|_| Ok(SearchResponse::Results(vec![result("Robbery")])));
        let mut controller = QueryController::new(transport);

        controller.submit("  report robbery \n").await;
        assert!(matches!(controller.state(), UiState::ShowingResults(_)));
    }

    #[test]
    fn submission_clears_previous_output_before_loading() {
        let mut controller = QueryController::new(MockSearchTransport::new());
        controller.state = UiState::ShowingResults(vec![result("a")]);

        let pending = controller.begin("divorce").unwrap();
        let view = controller.view();
        assert!(view.loading_visible);
        assert!(!view.error_visible);
        assert!(!view.results_visible);
        assert!(view.cards.is_empty());

        assert!(controller.resolve(pending.token, Ok(SearchResponse::Results(vec![]))));
    }

    #[actix_rt::test]
    async fn results_render_in_received_order() {
        let results = vec![result("one"), result("two"), result("three")];
        let mut controller = answering(Ok(SearchResponse::Results(results)));

        controller.submit("inheritance").await;
        let view = controller.view();
        assert!(view.results_visible);
        assert!(!view.loading_visible);
        let titles: Vec<_> = view.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[actix_rt::test]
    async fn server_error_is_shown_verbatim() {
        let mut controller = answering(Ok(SearchResponse::Error("Query is required".to_string())));

        controller.submit("x").await;
        let view = controller.view();
        assert_eq!(view.error_message.as_deref(), Some("Query is required"));
        assert!(view.cards.is_empty());
        assert!(!view.loading_visible);
    }

    #[actix_rt::test]
    async fn empty_results_read_as_no_results() {
        let mut controller = answering(Ok(SearchResponse::Results(vec![])));

        controller.submit("x").await;
        assert_eq!(
            controller.state(),
            &UiState::ShowingError(NO_RESULTS_MESSAGE.to_string())
        );
        assert!(controller.view().cards.is_empty());
    }

    #[rstest]
    #[case(FailureKind::HttpStatus(404), "Error: Network response was not ok")]
    #[case(FailureKind::Transport("connection refused".to_string()), "Error: connection refused")]
    #[case(FailureKind::Parse("expected value at line 1".to_string()), "Error: expected value at line 1")]
    #[actix_rt::test]
    async fn failures_end_loading_with_an_error(#[case] kind: FailureKind, #[case] message: &str) {
        let mut controller = answering(Err(kind));

        controller.submit("robbery").await;
        let view = controller.view();
        assert!(!view.loading_visible);
        assert_eq!(view.error_message.as_deref(), Some(message));
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut controller = QueryController::new(MockSearchTransport::new());

        let first = controller.begin("robbery").unwrap();
        let second = controller.begin("divorce").unwrap();
        assert!(second.token > first.token);

        assert!(controller.resolve(second.token, Ok(SearchResponse::Results(vec![result("divorce")]))));
        assert!(!controller.resolve(first.token, Ok(SearchResponse::Results(vec![result("robbery")]))));

        assert_eq!(
            controller.state(),
            &UiState::ShowingResults(vec![result("divorce")])
        );
    }

    #[test]
    fn loading_ends_only_once_per_request() {
        let mut controller = QueryController::new(MockSearchTransport::new());
        let pending = controller.begin("robbery").unwrap();

        assert!(controller.resolve(pending.token, Err(FailureKind::HttpStatus(500))));
        assert!(!controller.resolve(pending.token, Ok(SearchResponse::Results(vec![result("late")]))));
        assert!(matches!(controller.state(), UiState::ShowingError(_)));
    }

    #[test]
    fn blank_resubmission_invalidates_the_pending_request() {
        let mut controller = QueryController::new(MockSearchTransport::new());
        let pending = controller.begin("robbery").unwrap();
        assert!(controller.begin("   ").is_none());

        assert!(!controller.resolve(pending.token, Ok(SearchResponse::Results(vec![result("late")]))));
        assert_eq!(
            controller.state(),
            &UiState::ShowingError(EMPTY_QUERY_MESSAGE.to_string())
        );
    }
}
