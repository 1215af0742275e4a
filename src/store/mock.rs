//! Scripted store for testing.
//!
//! Records every statement it is handed so tests can assert on ordering
//! (e.g. that the foreign-key toggle brackets a batch), and can be told to
//! fail statements containing a given fragment.

use super::{QueryOutput, SqlStore, Value};
use crate::error::{LoupeError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// A store that logs statements and returns canned results.
#[derive(Default)]
pub struct MockStore {
    log: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl MockStore {
    /// Creates a mock store that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock store that fails any statement containing `fragment`.
    pub fn failing_on(fragment: impl Into<String>) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            fail_on: Some(fragment.into()),
        }
    }

    /// Returns the statements seen so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.log.lock().expect("mock log poisoned").clone()
    }

    fn record(&self, sql: &str) -> Result<()> {
        self.log.lock().expect("mock log poisoned").push(sql.to_string());
        if let Some(fragment) = &self.fail_on {
            if sql.contains(fragment.as_str()) {
                return Err(LoupeError::query(format!("mock failure on: {sql}")));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SqlStore for MockStore {
    async fn exec(&self, sql: &str) -> Result<u64> {
        self.record(sql)?;
        Ok(1)
    }

    async fn query(&self, sql: &str) -> Result<QueryOutput> {
        self.record(sql)?;
        Ok(QueryOutput::with_data(
            vec!["result".to_string()],
            vec![vec![Value::Text(format!("mock result for: {sql}"))]],
        ))
    }

    async fn set_foreign_keys(&self, enabled: bool) -> Result<()> {
        let pragma = if enabled {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };
        self.record(pragma)?;
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        Ok(vec!["users".to_string()])
    }

    async fn table_exists(&self, name: &str) -> Result<bool> {
        Ok(name == "users")
    }

    async fn close(&self) {}
}
