//! Scripted in-memory executor
//!
//! A test double for the executor/cursor interface: rows and failures are
//! scripted up front, and the cursor exposes an observable closed flag so
//! callers can assert the scoped-resource discipline.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pg_dialect::PgValue;

use crate::cursor::{RowCursor, StatementExecutor};
use crate::errors::FetchError;

#[derive(Debug, Default)]
pub struct MemoryExecutor {
    columns: Vec<String>,
    rows: Vec<Result<Vec<PgValue>, String>>,
    execute_error: Option<String>,
    closed: Arc<AtomicBool>,
}

impl MemoryExecutor {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Script one result row.
    pub fn push_row(&mut self, values: Vec<PgValue>) {
        self.rows.push(Ok(values));
    }

    /// Script a row-level failure; the cursor advances past it.
    pub fn push_row_error(&mut self, reason: impl Into<String>) {
        self.rows.push(Err(reason.into()));
    }

    /// Script a statement execution failure; no cursor is produced.
    pub fn fail_execution(&mut self, reason: impl Into<String>) {
        self.execute_error = Some(reason.into());
    }

    /// Whether the cursor handed out by `execute` has been closed.
    pub fn cursor_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatementExecutor for MemoryExecutor {
    type Cursor = MemoryCursor;

    async fn execute(&self, _sql: &str, _params: &[PgValue]) -> Result<Self::Cursor, FetchError> {
        if let Some(reason) = &self.execute_error {
            return Err(FetchError::Execution(reason.clone()));
        }
        Ok(MemoryCursor {
            columns: self.columns.clone(),
            rows: self.rows.iter().cloned().collect(),
            closed: Arc::clone(&self.closed),
        })
    }
}

#[derive(Debug)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: VecDeque<Result<Vec<PgValue>, String>>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl RowCursor for MemoryCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    async fn next_row(&mut self) -> Result<Option<Vec<PgValue>>, FetchError> {
        match self.rows.pop_front() {
            Some(Ok(values)) => Ok(Some(values)),
            Some(Err(reason)) => Err(FetchError::RowScan(reason)),
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<(), FetchError> {
        self.rows.clear();
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
