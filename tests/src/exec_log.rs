use crate::DriverOp;

use roundup_core::{
    driver::{operation::Transaction, Operation},
    stmt,
};
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    /// All logged operations, oldest first
    pub fn operations(&self) -> Vec<Operation> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.clone())
            .collect()
    }

    /// Statements of every `QuerySql` operation, oldest first
    pub fn queries(&self) -> Vec<stmt::Query> {
        self.operations()
            .into_iter()
            .filter_map(|op| op.as_query_sql().map(|op| op.stmt.clone()))
            .collect()
    }

    /// Transaction operations, oldest first
    pub fn transactions(&self) -> Vec<Transaction> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Transaction(transaction) => Some(transaction),
                _ => None,
            })
            .collect()
    }

    /// Number of operations that returned an error
    pub fn failures(&self) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.response.is_none())
            .count()
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }
}
