pub mod cursor;
pub use cursor::CachedResult;

pub mod db;
pub use db::Db;

mod query;
pub use query::{
    resolve_row_type, ExpandRequest, OneRoundQuery, SqlTableMapping, PATH_SEPARATOR,
};

pub use roundup_core::{driver, schema, stmt, Error, Instance, Result, Schema};
pub use roundup_core::{bail, err};

#[cfg(feature = "sqlite")]
pub use roundup_driver_sqlite::Sqlite;
