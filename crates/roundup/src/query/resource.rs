use roundup_core::{
    bail,
    driver::{
        operation::{QuerySql, Transaction},
        Connection, Driver, Rows,
    },
    schema::Schema,
    stmt::{Query, ValueRecord},
    Result,
};

/// A connection scoped to one statement.
///
/// The transaction started on acquire is committed by [`commit`]. Dropping
/// the resource without committing rolls back; a failing rollback is logged
/// so it does not hide the error that caused it.
///
/// [`commit`]: ConnectionResource::commit
#[derive(Debug)]
pub(crate) struct ConnectionResource<'a> {
    schema: &'a Schema,
    connection: Box<dyn Connection>,
    done: bool,
}

impl<'a> ConnectionResource<'a> {
    pub(crate) fn acquire(driver: &dyn Driver, schema: &'a Schema) -> Result<Self> {
        let mut connection = driver.connect()?;
        connection.exec(schema, Transaction::Start.into())?;

        Ok(Self {
            schema,
            connection,
            done: false,
        })
    }

    pub(crate) fn query(&mut self, stmt: Query) -> Result<Vec<ValueRecord>> {
        let response = self.connection.exec(self.schema, QuerySql { stmt }.into())?;

        match response.rows {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(count) => bail!("expected rows from query, driver returned count {count}"),
        }
    }

    pub(crate) fn commit(mut self) -> Result<()> {
        self.connection.exec(self.schema, Transaction::Commit.into())?;
        self.done = true;
        Ok(())
    }
}

impl Drop for ConnectionResource<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }

        if let Err(err) = self.connection.exec(self.schema, Transaction::Rollback.into()) {
            log::warn!("failed to roll back connection; error={err}");
        }
    }
}
