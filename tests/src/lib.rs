mod exec_log;
pub use exec_log::ExecLog;

pub mod fixture;
pub use fixture::Fixture;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver};

use roundup::{Db, Instance};
use roundup_driver_sqlite::Sqlite;

/// Initialise the test logger. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A seeded database wrapped in a logging driver.
pub struct Test {
    pub db: Db,
    pub log: ExecLog,
    pub fixture: Fixture,
}

impl Test {
    /// Seeded in-memory database without an expression limit
    pub fn new() -> Self {
        Self::build("sqlite::memory:", "")
    }

    /// Seeded database at `url`
    pub fn with_url(url: &str) -> Self {
        Self::build(url, "")
    }

    /// Seeded in-memory database with additional rows
    pub fn with_sql(sql: &str) -> Self {
        Self::build("sqlite::memory:", sql)
    }

    fn build(url: &str, sql: &str) -> Self {
        init_logging();

        let (fixture, schema) = Fixture::build();

        let driver = Sqlite::new(url).unwrap();
        driver.execute_batch(fixture::SCHEMA_SQL).unwrap();
        driver.execute_batch(fixture::SEED_SQL).unwrap();
        driver.execute_batch(sql).unwrap();

        let driver = LoggingDriver::new(Box::new(driver));
        let log = driver.exec_log();

        Self {
            db: Db::new(schema, driver),
            log,
            fixture,
        }
    }

    pub fn documents(&self, ids: impl IntoIterator<Item = i64>) -> Vec<Instance> {
        ids.into_iter()
            .map(|id| Instance::new(self.fixture.document, id))
            .collect()
    }
}

impl Default for Test {
    fn default() -> Self {
        Self::new()
    }
}
