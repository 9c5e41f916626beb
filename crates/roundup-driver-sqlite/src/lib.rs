mod value;
pub(crate) use value::Value;

use roundup_core::{
    driver::{
        operation::{Operation, QuerySql, Transaction},
        Capability, Driver, Response,
    },
    err,
    schema::Schema,
    stmt, Error, Result,
};
use roundup_sql as sql;
use rusqlite::Connection as RusqliteConnection;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};
use url::Url;

#[derive(Debug)]
pub struct Sqlite {
    target: Target,
    capability: Capability,
}

#[derive(Debug)]
enum Target {
    File(PathBuf),

    /// An in-memory database only lives as long as its connection, so every
    /// `connect()` hands out the same one.
    InMemory(Arc<Mutex<RusqliteConnection>>),
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL.
    ///
    /// Accepts `sqlite::memory:` and `sqlite:<path>`. The optional
    /// `max_expressions=<n>` query parameter caps the number of ids placed
    /// in one `IN (...)` list; `0` removes the cap.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        let mut driver = if url.path() == ":memory:" {
            Self::in_memory()?
        } else {
            Self::open(url.path())
        };

        for (key, value) in url.query_pairs() {
            match &*key {
                "max_expressions" => {
                    let max = value.parse::<usize>().map_err(|_| {
                        Error::invalid_connection_url(format!(
                            "`max_expressions` must be a non-negative integer; url={url_str}"
                        ))
                    })?;
                    driver = driver.max_expressions(max);
                }
                _ => {
                    return Err(Error::invalid_connection_url(format!(
                        "unknown parameter `{key}`; url={url_str}"
                    )))
                }
            }
        }

        Ok(driver)
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;

        Ok(Self {
            target: Target::InMemory(Arc::new(Mutex::new(connection))),
            capability: Capability::SQLITE,
        })
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            target: Target::File(path.as_ref().to_path_buf()),
            capability: Capability::SQLITE,
        }
    }

    /// Caps the number of ids placed in a single `IN (...)` list. Zero
    /// removes the cap.
    pub fn max_expressions(mut self, max: usize) -> Self {
        self.capability = self.capability.with_max_expressions(max);
        self
    }

    /// Runs one or more raw SQL statements, used to create tables and load
    /// fixtures.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let connection = self.open_connection()?;
        let connection = lock(&connection)?;
        connection.execute_batch(sql).map_err(Error::driver)
    }

    fn open_connection(&self) -> Result<Arc<Mutex<RusqliteConnection>>> {
        match &self.target {
            Target::File(path) => {
                let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
                Ok(Arc::new(Mutex::new(connection)))
            }
            Target::InMemory(connection) => Ok(connection.clone()),
        }
    }
}

impl Driver for Sqlite {
    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn connect(&self) -> Result<Box<dyn roundup_core::Connection>> {
        Ok(Box::new(Connection {
            connection: self.open_connection()?,
        }))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: Arc<Mutex<RusqliteConnection>>,
}

impl roundup_core::Connection for Connection {
    fn exec(&mut self, schema: &Schema, op: Operation) -> Result<Response> {
        let connection = lock(&self.connection)?;

        match op {
            Operation::QuerySql(op) => query(&connection, schema, op),
            Operation::Transaction(op) => {
                let sql = match op {
                    Transaction::Start => "BEGIN",
                    Transaction::Commit => "COMMIT",
                    Transaction::Rollback => "ROLLBACK",
                };

                connection.execute(sql, []).map_err(Error::driver)?;
                Ok(Response::count(0))
            }
        }
    }
}

fn query(connection: &RusqliteConnection, schema: &Schema, op: QuerySql) -> Result<Response> {
    let mut params: Vec<stmt::Value> = vec![];
    let sql_str = sql::Serializer::sqlite(schema).serialize(&op.stmt, &mut params);
    log::debug!("sqlite: {sql_str}");

    let width = op.stmt.width();
    let mut stmt = connection.prepare_cached(&sql_str).map_err(Error::driver)?;

    let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter()))
        .map_err(Error::driver)?;

    let mut ret = vec![];

    while let Some(row) = rows.next().map_err(Error::driver)? {
        let mut items = Vec::with_capacity(width);

        for index in 0..width {
            items.push(Value::from_sql(row, index)?.into_inner());
        }

        ret.push(stmt::ValueRecord::from_vec(items));
    }

    log::trace!("sqlite: {} rows", ret.len());
    Ok(Response::values(ret))
}

fn lock(connection: &Mutex<RusqliteConnection>) -> Result<MutexGuard<'_, RusqliteConnection>> {
    connection
        .lock()
        .map_err(|_| err!("sqlite connection is poisoned"))
}
