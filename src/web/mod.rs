//! HTTP layer for Loupe.
//!
//! JSON routes over the batch runner and store. Routing, serialization, and
//! status codes live here; all query semantics live in `batch` and `store`.

mod handlers;
mod models;

pub use models::{ErrorResponse, QueryRequest, QueryResponse, TableDataResponse, TablesResponse};

use crate::batch::BatchRunner;
use crate::store::SqlStore;
use actix_web::web;
use std::sync::Arc;

/// Shared application state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn SqlStore>,
    pub runner: Arc<BatchRunner>,
    /// Display path of the database being served.
    pub db_path: String,
    /// Row cap for table browsing.
    pub max_rows: u32,
}

/// Registers all HTTP routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::list_tables)
        .service(handlers::table_data)
        .service(handlers::run_query);
}
