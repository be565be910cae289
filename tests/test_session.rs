// Session and pagination tests
// Author: Gabriel Demetrios Lafis

use std::time::{Duration, Instant};

use serde_json::json;

use rust_data_explorer::{
    client::QueryResponse,
    query::{FilterOperator, PaginationWindow, SearchState, SortDirection},
    schema::{Field, Model, ModelCatalog},
    session::{ExplorerSession, ResponseDisposition, SearchDebouncer, SessionError},
};

fn catalog() -> ModelCatalog {
    ModelCatalog::new(vec![
        Model::new(
            "orders",
            "orders",
            "id",
            vec![
                Field::new("id", "serial"),
                Field::new("status", "varchar"),
                Field::new("total", "integer"),
            ],
        ),
        Model::new(
            "users",
            "users",
            "id",
            vec![Field::new("id", "serial"), Field::new("name", "varchar")],
        ),
    ])
}

fn page_response(rows: usize, total: Option<u64>) -> QueryResponse {
    let data = (0..rows)
        .map(|i| json!({"id": i}).as_object().cloned().unwrap())
        .collect();
    QueryResponse {
        data: Some(data),
        total,
        ..QueryResponse::default()
    }
}

#[test]
fn test_out_of_range_pages_are_no_ops() {
    let mut window = PaginationWindow::new(10);
    window.on_result(10, Some(35));
    assert_eq!(window.total_pages(), 4);

    window.go_to_page(0);
    assert_eq!(window.page(), 1);

    window.go_to_page(5);
    assert_eq!(window.page(), 1);

    window.go_to_page(4);
    assert_eq!(window.page(), 4);
}

#[test]
fn test_page_size_change_always_returns_to_page_one() {
    let mut window = PaginationWindow::new(10);
    window.on_result(10, Some(100));
    window.go_to_page(7);

    window.set_page_size(50);
    assert_eq!(window.page_size(), 50);
    assert_eq!(window.page(), 1);
}

#[test]
fn test_page_sizes_outside_the_option_set_are_ignored() {
    let mut window = PaginationWindow::new(10);
    window.on_result(10, Some(100));
    window.go_to_page(3);

    window.set_page_size(33);
    assert_eq!(window.page_size(), 10);
    assert_eq!(window.page(), 3);
}

#[test]
fn test_full_page_estimates_one_more_row() {
    let mut window = PaginationWindow::new(10);

    // A full first page with no reported total implies at least one more
    window.on_result(10, None);
    assert_eq!(window.total_count(), 11);
    assert_eq!(window.total_pages(), 2);

    // A short page pins the total exactly
    window.go_to_page(2);
    window.on_result(4, None);
    assert_eq!(window.total_count(), 14);
    assert_eq!(window.total_pages(), 2);
}

#[test]
fn test_explicit_total_replaces_the_estimate() {
    let mut window = PaginationWindow::new(10);
    window.on_result(10, None);
    assert_eq!(window.total_count(), 11);

    window.on_result(10, Some(214));
    assert_eq!(window.total_count(), 214);
    assert_eq!(window.total_pages(), 22);
}

#[test]
fn test_shrunken_total_clamps_the_page() {
    let mut window = PaginationWindow::new(10);
    window.on_result(10, Some(100));
    window.go_to_page(10);

    window.on_result(0, Some(15));
    assert_eq!(window.page(), 2);
}

#[test]
fn test_model_switch_discards_query_state() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();
    session
        .add_filter("total", FilterOperator::Gt, "100")
        .unwrap();
    session.toggle_sort("status").unwrap();
    session.set_global_search("acme").unwrap();

    session.select_model("users").unwrap();
    let state = session.state().unwrap();
    assert!(state.filters.is_empty());
    assert_eq!(state.search, SearchState::Inactive);
    assert_eq!(state.sort, None);
    assert_eq!(state.window.page(), 1);
}

#[test]
fn test_unknown_model_is_rejected() {
    let mut session = ExplorerSession::new(catalog(), 10);
    assert_eq!(
        session.select_model("missing"),
        Err(SessionError::UnknownModel("missing".to_string()))
    );
}

#[test]
fn test_incomplete_filters_never_enter_the_list() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();

    assert_eq!(
        session.add_filter("", FilterOperator::Equals, "open"),
        Err(SessionError::IncompleteFilter)
    );
    assert_eq!(
        session.add_filter("status", FilterOperator::Equals, "  "),
        Err(SessionError::IncompleteFilter)
    );
    assert!(session.state().unwrap().filters.is_empty());
}

#[test]
fn test_sort_click_cycle() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();

    session.toggle_sort("total").unwrap();
    let sort = session.state().unwrap().sort.clone().unwrap();
    assert_eq!((sort.field.as_str(), sort.direction), ("total", SortDirection::Asc));

    session.toggle_sort("total").unwrap();
    let sort = session.state().unwrap().sort.clone().unwrap();
    assert_eq!((sort.field.as_str(), sort.direction), ("total", SortDirection::Desc));

    session.toggle_sort("total").unwrap();
    assert_eq!(session.state().unwrap().sort, None);

    // A different column restarts the cycle ascending
    session.toggle_sort("total").unwrap();
    session.toggle_sort("total").unwrap();
    session.toggle_sort("status").unwrap();
    let sort = session.state().unwrap().sort.clone().unwrap();
    assert_eq!((sort.field.as_str(), sort.direction), ("status", SortDirection::Asc));
}

#[test]
fn test_search_modes_are_mutually_exclusive() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();

    session.set_global_search("acme").unwrap();
    assert!(matches!(
        session.state().unwrap().search,
        SearchState::Global { .. }
    ));

    // Entering column mode clears the global term
    session.set_column_search("status", "open").unwrap();
    assert_eq!(
        session.state().unwrap().search,
        SearchState::Column {
            term: "open".to_string(),
            field: "status".to_string(),
        }
    );

    session.set_global_search("").unwrap();
    assert_eq!(session.state().unwrap().search, SearchState::Inactive);
}

#[test]
fn test_dependency_changes_reset_the_page() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();

    let (seq, _) = session.next_request().unwrap();
    session.apply_response(seq, &page_response(10, Some(90)));
    session.set_page(5).unwrap();
    assert_eq!(session.state().unwrap().window.page(), 5);

    session
        .add_filter("status", FilterOperator::Equals, "open")
        .unwrap();
    assert_eq!(session.state().unwrap().window.page(), 1);
}

#[test]
fn test_stale_responses_are_discarded() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();

    let (first, _) = session.next_request().unwrap();
    let (second, _) = session.next_request().unwrap();
    assert!(second > first);

    // The slow early response arrives after the newer request was issued
    assert_eq!(
        session.apply_response(first, &page_response(10, Some(50))),
        ResponseDisposition::Stale
    );
    assert!(session.rows().is_empty());

    assert_eq!(
        session.apply_response(second, &page_response(3, Some(3))),
        ResponseDisposition::Applied
    );
    assert_eq!(session.rows().len(), 3);
}

#[test]
fn test_query_errors_keep_state_and_rows() {
    let mut session = ExplorerSession::new(catalog(), 10);
    session.select_model("orders").unwrap();
    session
        .add_filter("total", FilterOperator::Gt, "100")
        .unwrap();

    let (seq, _) = session.next_request().unwrap();
    session.apply_response(seq, &page_response(3, Some(3)));
    assert_eq!(session.rows().len(), 3);

    let failure = QueryResponse {
        error: Some("relation does not exist".to_string()),
        ..QueryResponse::default()
    };
    let (seq, _) = session.next_request().unwrap();
    session.apply_response(seq, &failure);

    // The message is surfaced inline; the cached rows and the filter
    // survive so the user can adjust and retry
    assert_eq!(session.error(), Some("relation does not exist"));
    assert_eq!(session.rows().len(), 3);
    assert_eq!(session.state().unwrap().filters.len(), 1);
}

#[test]
fn test_debounce_releases_only_settled_terms() {
    let mut debouncer = SearchDebouncer::new(Duration::from_millis(500));
    let start = Instant::now();

    debouncer.input("a", start);
    assert_eq!(debouncer.settle(start + Duration::from_millis(100)), None);

    // A newer keystroke restarts the delay
    debouncer.input("ac", start + Duration::from_millis(200));
    assert_eq!(debouncer.settle(start + Duration::from_millis(600)), None);

    assert_eq!(
        debouncer.settle(start + Duration::from_millis(800)),
        Some("ac".to_string())
    );
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.settle(start + Duration::from_millis(2000)), None);
}
