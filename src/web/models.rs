//! Request and response bodies for the JSON API.

use crate::batch::BatchReport;
use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Raw, possibly multi-statement SQL text.
    pub query: String,
}

/// The batch report as returned to HTTP callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Human-readable elapsed time for the whole batch.
    pub took: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<BatchReport> for QueryResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            columns: report.columns,
            rows: report.rows,
            took: format!("{:?}", report.elapsed),
            error: report.error,
        }
    }
}

/// Response for `GET /tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesResponse {
    /// Path of the database being served.
    pub database: String,
    pub tables: Vec<String>,
}

/// Response for `GET /table/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDataResponse {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// The query that produced this view.
    pub query: String,
}

/// Error body for failed glue requests (not batch errors, which are data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
