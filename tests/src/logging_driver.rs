use crate::ExecLog;

use roundup_core::{
    driver::{Capability, Connection, Driver, Operation, Response},
    schema::Schema,
    Result,
};
use std::sync::{Arc, Mutex};

/// A driver wrapper recording every operation sent to the wrapped driver.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn exec_log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}

impl Driver for LoggingDriver {
    fn capability(&self) -> &Capability {
        self.inner.capability()
    }

    fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect()?,
            ops_log: self.ops_log.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,

    /// `None` when the operation failed
    pub response: Option<Response>,
}

#[derive(Debug)]
struct LoggingConnection {
    inner: Box<dyn Connection>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl Connection for LoggingConnection {
    fn exec(&mut self, schema: &Schema, operation: Operation) -> Result<Response> {
        let operation_clone = operation.clone();
        let result = self.inner.exec(schema, operation);

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                operation: operation_clone,
                response: result.as_ref().ok().cloned(),
            });

        result
    }
}
