use crate::OneRoundQuery;

use roundup_core::{
    driver::{Capability, Driver},
    schema::TypeId,
    Instance, Result, Schema,
};

use std::sync::Arc;

/// A database handle: the schema and the driver queries run against.
///
/// Cloning is cheap; clones share the schema and the driver.
#[derive(Debug, Clone)]
pub struct Db {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Arc<dyn Driver>,
}

impl Db {
    pub fn new(schema: Schema, driver: impl Driver) -> Self {
        Self {
            schema: Arc::new(schema),
            driver: Arc::new(driver),
        }
    }

    /// Connects to the database at `url` with the driver matching its
    /// scheme.
    #[cfg(feature = "sqlite")]
    pub fn connect(schema: Schema, url: &str) -> Result<Self> {
        let driver = roundup_driver_sqlite::Sqlite::new(url)?;
        Ok(Self::new(schema, driver))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn capability(&self) -> &Capability {
        self.driver.capability()
    }

    /// Creates a query loading `expressions` for every instance.
    pub fn one_round(
        &self,
        instances: impl IntoIterator<Item = Instance>,
        expressions: impl IntoIterator<Item = impl Into<String>>,
    ) -> OneRoundQuery {
        OneRoundQuery::new(
            self.clone(),
            instances.into_iter().collect(),
            expressions.into_iter().map(Into::into).collect(),
        )
    }

    /// Creates a query loading the rows of the attribute set `set` owned by
    /// `owners`. Fails when `set` is not an attribute set type.
    pub fn expand(
        &self,
        owners: impl IntoIterator<Item = Instance>,
        set: TypeId,
        expressions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<OneRoundQuery> {
        OneRoundQuery::expand(
            self.clone(),
            owners.into_iter().collect(),
            set,
            expressions.into_iter().map(Into::into).collect(),
        )
    }
}
