#[macro_use]
mod macros;

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

mod instance;
pub use instance::Instance;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses Roundup's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
