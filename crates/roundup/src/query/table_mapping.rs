use super::ConnectionResource;
use crate::CachedResult;

use roundup_core::{
    driver::{Capability, Driver},
    schema::{Attribute, AttributeId, Schema, TableId, TypeId},
    stmt::{Expr, Query, Select, Value},
    Instance, Result,
};

use indexmap::{IndexMap, IndexSet};

/// Plans and runs the read of one physical table.
///
/// Attributes registered by every type touching the table share one column
/// layout, so the table is read with a single statement (split into
/// `UNION`ed chunks when the id list is long). Column 0 always holds the
/// id column and column 1 the discriminator, if the table has one.
///
/// Column indices are local until [`evaluate`](Self::evaluate) shifts them
/// into the query's global column space.
#[derive(Debug)]
pub struct SqlTableMapping {
    table: TableId,

    /// Attribute set read through its foreign key column
    expand: Option<TypeId>,

    /// Projected columns, in result order
    columns: Vec<String>,

    /// Column name to local index
    column_indices: IndexMap<String, usize>,

    /// Requested attributes and the indices of their columns
    attributes: IndexMap<AttributeId, Vec<usize>>,

    instances: IndexSet<Instance>,

    /// Local index of the column rows are keyed by
    key_index: usize,

    /// Offset added to every local index once evaluated
    start: usize,

    expand_has_result: bool,
}

impl SqlTableMapping {
    pub(crate) fn new(schema: &Schema, table: TableId, expand: Option<TypeId>) -> Self {
        let sql_table = schema.table(table);

        let mut mapping = Self {
            table,
            expand,
            columns: vec![],
            column_indices: IndexMap::new(),
            attributes: IndexMap::new(),
            instances: IndexSet::new(),
            key_index: 0,
            start: 0,
            expand_has_result: false,
        };

        mapping.add_column(&sql_table.id_column);

        if let Some(discriminator) = &sql_table.discriminator {
            mapping.add_column(discriminator);
        }

        if let Some(foreign_key) = expand.and_then(|set| schema.ty(set).foreign_key()) {
            mapping.key_index = mapping.add_column(foreign_key.column());
        }

        mapping
    }

    /// Registers an attribute read from this table. Registering the same
    /// attribute twice has no effect.
    pub(crate) fn add_attribute(&mut self, attribute: &Attribute) {
        debug_assert_eq!(attribute.table, self.table);

        if self.attributes.contains_key(&attribute.id) {
            return;
        }

        let indices = attribute
            .columns
            .iter()
            .map(|column| self.add_column(column))
            .collect();

        self.attributes.insert(attribute.id, indices);
    }

    /// Returns the local index of `column`, appending it to the projection
    /// the first time it is seen.
    fn add_column(&mut self, column: &str) -> usize {
        if let Some(index) = self.column_indices.get(column) {
            return *index;
        }

        let index = self.columns.len();
        self.columns.push(column.to_string());
        self.column_indices.insert(column.to_string(), index);
        index
    }

    pub(crate) fn add_instances(&mut self, instances: impl IntoIterator<Item = Instance>) {
        self.instances.extend(instances);
    }

    /// Builds the statement reading every registered column for every
    /// registered instance.
    pub(crate) fn build_statement(&self, schema: &Schema, capability: &Capability) -> Query {
        let sql_table = schema.table(self.table);

        let filter_column = match self.expand {
            Some(_) => &self.columns[self.key_index],
            None => &sql_table.id_column,
        };

        let ids: IndexSet<i64> = self.instances.iter().map(|instance| instance.id).collect();
        let ids: Vec<i64> = ids.into_iter().collect();

        let chunks: Vec<&[i64]> = match capability.max_expressions {
            Some(max) if max > 0 && !ids.is_empty() => ids.chunks(max).collect(),
            _ => vec![&ids[..]],
        };

        let selects = chunks.into_iter().map(|chunk| {
            let mut select = Select::new(
                self.table,
                self.columns.clone(),
                Expr::in_list(Expr::column(filter_column), chunk.iter().copied()),
            )
            .distinct();

            if let (Some(set), Some(discriminator)) = (self.expand, &sql_table.discriminator) {
                select.add_filter(Expr::eq(Expr::column(discriminator), set.0 as i64));
            }

            select
        });

        Query::union(selects)
    }

    /// Shifts the column layout to `start`, runs the statement and loads the
    /// result into `cursor`. Returns the first global index following this
    /// table's columns.
    pub(crate) fn evaluate(
        &mut self,
        start: usize,
        schema: &Schema,
        driver: &dyn Driver,
        cursor: &mut CachedResult,
    ) -> Result<usize> {
        self.start = start;

        for indices in self.attributes.values_mut() {
            for index in indices {
                *index += start;
            }
        }

        let stmt = self.build_statement(schema, driver.capability());
        let table_name = &schema.table(self.table).name;

        log::debug!(
            "loading table; table={table_name} columns={} instances={} chunks={}",
            self.columns.len(),
            self.instances.len(),
            stmt.body.selects().count(),
        );

        let rows = self
            .run(schema, driver, stmt)
            .map_err(|err| err.context(format!("failed to load table {table_name}")))?;

        self.expand_has_result = self.expand.is_some() && !rows.is_empty();

        let sub_key_index = self.expand.map(|_| 0);
        cursor.populate(rows, start, self.key_index, sub_key_index)?;

        Ok(start + self.columns.len())
    }

    fn run(
        &self,
        schema: &Schema,
        driver: &dyn Driver,
        stmt: Query,
    ) -> Result<Vec<roundup_core::stmt::ValueRecord>> {
        let mut resource = ConnectionResource::acquire(driver, schema)?;
        let rows = resource.query(stmt)?;
        resource.commit()?;
        Ok(rows)
    }

    /// Reads an attribute of the cursor's current row through its value
    /// converter.
    pub(crate) fn read(&self, cursor: &CachedResult, attribute: &Attribute) -> Result<Value> {
        if self.expand.is_some() && !self.expand_has_result {
            return Ok(Value::Null);
        }

        let Some(index) = self.column_index(attribute.id) else {
            return Ok(Value::Null);
        };

        let value = cursor.get(index).cloned().unwrap_or_default();
        attribute.ty.read(value)
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn is_expand(&self) -> bool {
        self.expand.is_some()
    }

    /// Whether the attribute set read returned any row. Always `false` for
    /// ordinary reads.
    pub fn expand_has_result(&self) -> bool {
        self.expand_has_result
    }

    /// Projected column names, in result order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Global indices of the columns this table occupies
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.columns.len()
    }

    /// Global index of the attribute's value. Composite attributes are read
    /// from their first column only.
    pub fn column_index(&self, attribute: AttributeId) -> Option<usize> {
        self.attributes.get(&attribute)?.first().copied()
    }

    /// Global index of the id column
    pub fn id_index(&self) -> usize {
        self.start
    }

    pub fn key_index(&self) -> usize {
        self.start + self.key_index
    }

    pub(crate) fn discriminator_index(&self, schema: &Schema) -> Option<usize> {
        schema
            .table(self.table)
            .has_discriminator()
            .then_some(self.start + 1)
    }
}
