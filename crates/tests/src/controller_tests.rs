use client::{SearchCompletion, SearchController, SearchMessage, SearchState};
use pretty_assertions::assert_eq;
use shared_types::GENERIC_ERROR_MESSAGE;
use tokio::sync::mpsc;

use crate::common::{spawn_backend, unreachable_base_url};

fn result_ids(controller: &SearchController) -> Vec<String> {
    controller
        .session()
        .results()
        .iter()
        .map(|r| r.id().to_string())
        .collect()
}

#[tokio::test]
async fn search_displays_normalized_results() {
    let backend = spawn_backend().await;
    let client = backend.client();
    let mut controller = SearchController::new();

    controller.set_query("rice");
    assert!(controller.run(&client).await);

    assert_eq!(controller.state(), SearchState::Displaying);
    assert_eq!(controller.message(), None);
    // The doc without an id is dropped and the article core is skipped.
    assert_eq!(result_ids(&controller), vec!["rice-1", "rice-2"]);

    let results = controller.session().results();
    assert_eq!(results[0].title(), "<em>rice</em> in the Mekong delta");
    assert_eq!(results[0].description(), Some("A thesis about rice."));
    assert_eq!(results[0].uri(), "http://repository.vnu.edu.vn/handle/rice-1");
    assert_eq!(results[1].title(), "Second rice thesis");
    assert_eq!(results[1].description(), None);
}

#[tokio::test]
async fn empty_result_set_reaches_empty_state() {
    let backend = spawn_backend().await;
    let mut controller = SearchController::new();

    controller.set_query("empty");
    controller.run(&backend.client()).await;

    assert_eq!(controller.state(), SearchState::Empty);
    assert!(controller.session().no_results());
    assert_eq!(controller.message(), Some(SearchMessage::NoResults));
}

#[tokio::test]
async fn backend_error_reaches_errored_state() {
    let backend = spawn_backend().await;
    let mut controller = SearchController::new();

    controller.set_query("error");
    controller.run(&backend.client()).await;

    assert_eq!(controller.state(), SearchState::Errored);
    assert!(controller.session().errored());
    assert_eq!(
        controller.message(),
        Some(SearchMessage::Error(
            "BackendError: INVALID_SEARCH_TERM: Must supply a search term with the parameter \"q\"."
                .into()
        ))
    );
}

#[tokio::test]
async fn transport_failure_reaches_errored_state() {
    let client = client::SearchClient::new(unreachable_base_url().await);
    let mut controller = SearchController::new();

    controller.set_query("rice");
    controller.run(&client).await;

    assert_eq!(controller.state(), SearchState::Errored);
    assert_eq!(
        controller.message(),
        Some(SearchMessage::Error(GENERIC_ERROR_MESSAGE.into()))
    );
}

#[tokio::test]
async fn blank_query_sends_no_request() {
    let backend = spawn_backend().await;
    let mut controller = SearchController::new();

    controller.set_query("   ");
    assert!(!controller.run(&backend.client()).await);

    assert_eq!(controller.state(), SearchState::Idle);
    assert_eq!(controller.session().query_id(), 0);
    assert!(backend.requests.lock().unwrap().is_empty());
}

/// Dispatch every ticket concurrently and apply completions in the order
/// they arrive. Returns whether each arrival was applied.
async fn race(
    controller: &mut SearchController,
    client: &client::SearchClient,
    queries: &[&str],
) -> Vec<(u64, bool)> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SearchCompletion>();
    for query in queries {
        let ticket = controller.submit_text(*query).expect("query is not blank");
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(ticket.dispatch(&client).await);
        });
    }
    drop(tx);

    let mut arrivals = Vec::new();
    while let Some(completion) = rx.recv().await {
        let query_id = completion.query_id;
        arrivals.push((query_id, controller.apply(completion)));
    }
    arrivals
}

#[tokio::test]
async fn slow_first_response_never_overwrites_fast_second() {
    let backend = spawn_backend().await;
    let mut controller = SearchController::new();

    let arrivals = race(&mut controller, &backend.client(), &["slow-rice", "fast"]).await;

    assert_eq!(arrivals, vec![(2, true), (1, false)]);
    assert_eq!(controller.session().query_id(), 2);
    assert_eq!(controller.session().query_text(), "fast");
    assert_eq!(result_ids(&controller), vec!["fast-1", "fast-2"]);
    assert_eq!(controller.state(), SearchState::Displaying);
}

#[tokio::test]
async fn stale_fast_response_is_dropped_until_latest_arrives() {
    let backend = spawn_backend().await;
    let mut controller = SearchController::new();

    let arrivals = race(&mut controller, &backend.client(), &["fast", "slow-rice"]).await;

    assert_eq!(arrivals, vec![(1, false), (2, true)]);
    assert_eq!(result_ids(&controller), vec!["slow-rice-1", "slow-rice-2"]);
}
