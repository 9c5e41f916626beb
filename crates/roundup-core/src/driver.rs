mod capability;
pub use capability::Capability;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{schema::Schema, Result};

use std::fmt::Debug;

/// A database the engine can read from.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which informs statement planning.
    fn capability(&self) -> &Capability;

    /// Acquires a connection. Each statement the engine issues runs on a
    /// freshly acquired connection that is released when the statement is
    /// done.
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single, blocking database connection.
pub trait Connection: Debug + Send {
    /// Execute a database operation
    fn exec(&mut self, schema: &Schema, op: Operation) -> Result<Response>;
}
