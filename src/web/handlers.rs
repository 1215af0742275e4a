//! HTTP handlers for the JSON API.
//!
//! Thin glue over the batch runner and the store. The batch endpoint always
//! answers 200: execution errors are part of the report, not of the HTTP
//! exchange.

use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::error;

use crate::web::models::{
    ErrorResponse, QueryRequest, QueryResponse, TableDataResponse, TablesResponse,
};
use crate::web::AppState;

#[get("/tables")]
pub async fn list_tables(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_tables().await {
        Ok(tables) => HttpResponse::Ok().json(TablesResponse {
            database: state.db_path.clone(),
            tables,
        }),
        Err(e) => {
            error!("Failed to list tables: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

#[get("/table/{name}")]
pub async fn table_data(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();

    match state.store.table_exists(&name).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: format!("Table '{name}' not found"),
            });
        }
        Err(e) => {
            error!("Failed to check table {name}: {e}");
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            });
        }
    }

    // The name came from sqlite_master, but quote it anyway.
    let sql = format!(
        "SELECT * FROM \"{}\" LIMIT {}",
        name.replace('"', "\"\""),
        state.max_rows
    );

    match state.store.query(&sql).await {
        Ok(output) => HttpResponse::Ok().json(TableDataResponse {
            table: name,
            columns: output.columns,
            rows: output
                .rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_display_string()).collect())
                .collect(),
            query: sql,
        }),
        Err(e) => {
            error!("Failed to fetch table {name}: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

#[post("/query")]
pub async fn run_query(
    state: web::Data<AppState>,
    body: web::Json<QueryRequest>,
) -> impl Responder {
    let report = state.runner.run_batch(&body.query).await;
    HttpResponse::Ok().json(QueryResponse::from(report))
}
