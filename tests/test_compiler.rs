// Query compiler tests
// Author: Gabriel Demetrios Lafis

use serde_json::json;

use rust_data_explorer::{
    client::QueryResponse,
    query::{
        build_search, compile, FilterClause, FilterList, FilterOperator, GroupSpec,
        PaginationWindow, SearchState, SortSpec,
    },
    schema::{Field, Model, ModelCatalog, Value},
    session::ExplorerSession,
};

fn orders_model() -> Model {
    Model::new(
        "orders",
        "orders",
        "id",
        vec![
            Field::new("id", "serial"),
            Field::new("user_id", "integer"),
            Field::new("status", "varchar"),
            Field::new("notes", "text"),
            Field::new("total", "integer"),
            Field::new("created_at", "timestamp"),
        ],
    )
}

#[test]
fn test_filter_list_canonicalization() {
    let mut filters = FilterList::new();

    // Zero leaves compile to no filter at all
    assert_eq!(filters.compile(), None);

    // One leaf compiles to the bare leaf, no wrapping group
    filters.add("status", FilterOperator::Equals, Value::from("open"));
    let compiled = filters.compile().unwrap();
    assert_eq!(
        compiled,
        FilterClause::leaf("status", FilterOperator::Equals, Value::from("open"))
    );

    // Two or more leaves compile to an AND in insertion order
    filters.add("total", FilterOperator::Gt, Value::from(100i64));
    let compiled = filters.compile().unwrap();
    match compiled {
        FilterClause::And { and } => {
            assert_eq!(and.len(), 2);
            assert_eq!(
                and[0],
                FilterClause::leaf("status", FilterOperator::Equals, Value::from("open"))
            );
            assert_eq!(
                and[1],
                FilterClause::leaf("total", FilterOperator::Gt, Value::from(100i64))
            );
        }
        other => panic!("expected an AND group, got {:?}", other),
    }
}

#[test]
fn test_filter_removal_by_id() {
    let mut filters = FilterList::new();

    let first = filters.add("status", FilterOperator::Equals, Value::from("open"));
    let second = filters.add("total", FilterOperator::Gt, Value::from(10i64));

    assert!(filters.remove(first));
    assert!(!filters.remove(first));
    assert_eq!(filters.len(), 1);
    assert_eq!(filters.iter().next().unwrap().id, second);
}

#[test]
fn test_search_and_filters_share_one_flat_and() {
    let mut filters = FilterList::new();
    filters.add("status", FilterOperator::Equals, Value::from("open"));
    filters.add("total", FilterOperator::Gt, Value::from(100i64));

    let search = build_search(
        &SearchState::Global {
            term: "acme".to_string(),
        },
        &["status".to_string(), "notes".to_string()],
    );

    // The search clause joins the same leaf list: And{S, L1, L2}, not a
    // nested And{S, And{L1, L2}}
    let compiled = filters.compile_with(search).unwrap();
    match compiled {
        FilterClause::And { and } => {
            assert_eq!(and.len(), 3);
            assert!(matches!(and[0], FilterClause::Or { .. }));
            assert!(matches!(and[1], FilterClause::Leaf(_)));
            assert!(matches!(and[2], FilterClause::Leaf(_)));
        }
        other => panic!("expected an AND group, got {:?}", other),
    }
}

#[test]
fn test_search_alone_stays_unwrapped() {
    let filters = FilterList::new();

    let search = build_search(
        &SearchState::Global {
            term: "acme".to_string(),
        },
        &["status".to_string(), "notes".to_string()],
    );

    let compiled = filters.compile_with(search).unwrap();
    match compiled {
        FilterClause::Or { or } => assert_eq!(or.len(), 2),
        other => panic!("expected the bare OR search clause, got {:?}", other),
    }
}

#[test]
fn test_global_search_requires_term_and_candidates() {
    let state = SearchState::Global {
        term: "   ".to_string(),
    };
    assert_eq!(build_search(&state, &["notes".to_string()]), None);

    let state = SearchState::Global {
        term: "acme".to_string(),
    };
    assert_eq!(build_search(&state, &[]), None);
}

#[test]
fn test_column_search_ignores_candidates() {
    let state = SearchState::Column {
        term: "acme".to_string(),
        field: "status".to_string(),
    };

    let clause = build_search(&state, &["notes".to_string(), "other".to_string()]).unwrap();
    assert_eq!(
        clause,
        FilterClause::leaf("status", FilterOperator::Contains, Value::from("acme"))
    );
}

#[test]
fn test_offset_computation() {
    let mut window = PaginationWindow::new(25);
    window.on_result(25, Some(100));
    window.go_to_page(3);

    assert_eq!(window.offset(), 50);
    assert_eq!(window.limit(), 25);
}

#[test]
fn test_empty_projection_is_omitted() {
    let model = orders_model();
    let filters = FilterList::new();
    let window = PaginationWindow::new(10);

    let fields: Vec<String> = Vec::new();
    let descriptor = compile(
        &model,
        Some(&fields),
        &filters,
        &SearchState::Inactive,
        None,
        None,
        &window,
    );

    // "All fields" is represented by omission, never an empty list
    let encoded = serde_json::to_value(&descriptor).unwrap();
    assert!(encoded.get("fields").is_none());
    assert!(encoded.get("filters").is_none());
    assert!(encoded.get("sort").is_none());
}

#[test]
fn test_end_to_end_descriptor() {
    let catalog = ModelCatalog::new(vec![orders_model()]);
    let mut session = ExplorerSession::new(catalog, 10);
    session.select_model("orders").unwrap();

    session
        .add_filter("total", FilterOperator::Gt, "100")
        .unwrap();
    session
        .set_sort(Some(SortSpec::desc("created_at")))
        .unwrap();

    // The first page's result establishes the window, then navigate
    let (seq, descriptor) = session.next_request().unwrap();
    assert_eq!(descriptor.pagination.offset, 0);
    let response = QueryResponse {
        data: Some(Vec::new()),
        total: Some(30),
        ..QueryResponse::default()
    };
    session.apply_response(seq, &response);
    session.set_page(2).unwrap();

    let (_, descriptor) = session.next_request().unwrap();
    let encoded = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(
        encoded,
        json!({
            "model": "orders",
            "filters": {"field": "total", "op": ">", "value": 100},
            "sort": [{"field": "created_at", "direction": "desc"}],
            "pagination": {"limit": 10, "offset": 10},
        })
    );
}

#[test]
fn test_grouping_descriptor() {
    let model = orders_model();
    let mut filters = FilterList::new();
    filters.add("status", FilterOperator::Equals, Value::from("open"));
    let window = PaginationWindow::new(25);

    let descriptor = compile(
        &model,
        None,
        &filters,
        &SearchState::Inactive,
        None,
        Some(&GroupSpec::new("user_id")),
        &window,
    );

    let encoded = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(encoded["group_by"], json!(["user_id"]));
    assert_eq!(
        encoded["aggregates"],
        json!([
            {"fn": "count", "field": "", "alias": "count"},
            {"fn": "count", "field": "id", "alias": "total_rows"},
        ])
    );
    // Grouping composes with the active filter instead of replacing it
    assert_eq!(
        encoded["filters"],
        json!({"field": "status", "op": "=", "value": "open"})
    );
}

#[test]
fn test_operator_wire_symbols() {
    let cases = [
        (FilterOperator::Equals, "="),
        (FilterOperator::Contains, "contains"),
        (FilterOperator::StartsWith, "starts_with"),
        (FilterOperator::EndsWith, "ends_with"),
        (FilterOperator::Gt, ">"),
        (FilterOperator::Lt, "<"),
        (FilterOperator::Gte, ">="),
        (FilterOperator::Lte, "<="),
    ];

    for (op, symbol) in cases {
        assert_eq!(op.wire_symbol(), symbol);
        assert_eq!(serde_json::to_value(op).unwrap(), json!(symbol));
        assert_eq!(op.ui_name().parse::<FilterOperator>().unwrap(), op);
    }

    assert!("between".parse::<FilterOperator>().is_err());
}
