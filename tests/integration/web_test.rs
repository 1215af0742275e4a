//! HTTP API tests against a real in-memory database.

use std::sync::Arc;

use actix_web::{test, web, App};
use db_loupe::batch::BatchRunner;
use db_loupe::store::{SqlStore, SqliteStore};
use db_loupe::web::{self as api, AppState, QueryRequest, QueryResponse, TableDataResponse, TablesResponse};
use pretty_assertions::assert_eq;

async fn seeded_state() -> web::Data<AppState> {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    store
        .exec("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")
        .await
        .unwrap();
    store
        .exec("INSERT INTO users (id, name) VALUES (1, 'Alice'), (2, NULL)")
        .await
        .unwrap();

    let runner = Arc::new(BatchRunner::new(store.clone()));
    web::Data::new(AppState {
        store,
        runner,
        db_path: "memory".to_string(),
        max_rows: 1000,
    })
}

#[actix_web::test]
async fn test_tables_endpoint_lists_tables() {
    let app = test::init_service(
        App::new().app_data(seeded_state().await).configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/tables").to_request();
    let body: TablesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.database, "memory");
    assert_eq!(body.tables, vec!["users"]);
}

#[actix_web::test]
async fn test_table_endpoint_renders_rows() {
    let app = test::init_service(
        App::new().app_data(seeded_state().await).configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/table/users").to_request();
    let body: TableDataResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.columns, vec!["id", "name"]);
    assert_eq!(
        body.rows,
        vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "NULL".to_string()],
        ]
    );
}

#[actix_web::test]
async fn test_unknown_table_is_404() {
    let app = test::init_service(
        App::new().app_data(seeded_state().await).configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/table/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_query_endpoint_runs_a_batch() {
    let app = test::init_service(
        App::new().app_data(seeded_state().await).configure(api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/query")
        .set_json(QueryRequest {
            query: "INSERT INTO users (id, name) VALUES (3, 'Carol'); \
                    SELECT name FROM users WHERE id = 3"
                .to_string(),
        })
        .to_request();
    let body: QueryResponse = test::call_and_read_body_json(&app, req).await;

    assert!(body.error.is_none());
    assert_eq!(body.columns, vec!["name"]);
    assert_eq!(body.rows, vec![vec!["Carol".to_string()]]);
    assert!(!body.took.is_empty());
}

#[actix_web::test]
async fn test_query_endpoint_reports_errors_as_data() {
    let app = test::init_service(
        App::new().app_data(seeded_state().await).configure(api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/query")
        .set_json(QueryRequest {
            query: "SELECT * FROM missing".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: QueryResponse = test::read_body_json(resp).await;
    assert_eq!(body.columns, vec!["Error"]);
    assert!(body.error.unwrap().contains("no such table"));
}
