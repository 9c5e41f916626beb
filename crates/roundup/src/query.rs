mod expand;
pub use expand::ExpandRequest;

mod resource;
use resource::ConnectionResource;

mod row_type;
pub use row_type::resolve_row_type;

mod table_mapping;
pub use table_mapping::SqlTableMapping;

mod type_mapping;
use type_mapping::TypeMapping;

use crate::{CachedResult, Db};

use roundup_core::{
    bail,
    schema::{Attribute, TableId, TypeId},
    stmt::Value,
    Instance, Result,
};

use indexmap::IndexMap;

/// Separates an attribute set from one of its attributes in an expression,
/// as in `Positions/Quantity`.
pub const PATH_SEPARATOR: char = '/';

/// Loads a set of expressions for a batch of instances in one round.
///
/// Instances may be of any mix of types. Each table touched by the
/// requested attributes is read with a single statement, and the results of
/// all statements are merged into one cursor with one row per instance.
///
/// An expand query reads the rows of an attribute set for a batch of owner
/// instances instead. Its cursor holds one row per owner, with the child
/// rows available through [`get_multi_line_value`].
///
/// Cursor rows are keyed by id alone. When one batch holds instances of
/// unrelated types that share an id, they merge into a single row whose
/// type is decided by the first discriminator read for that id.
///
/// ```no_run
/// # fn demo(db: roundup::Db, document: roundup::schema::TypeId) -> roundup::Result<()> {
/// use roundup::Instance;
///
/// let mut query = db.one_round(
///     [Instance::new(document, 1), Instance::new(document, 2)],
///     ["Name", "Positions/Quantity"],
/// );
/// query.execute()?;
///
/// while query.next() {
///     println!("{} {}", query.get_instance()?, query.get_value("Name")?);
/// }
///
/// let mut positions = query.expand_query("Positions")?;
/// positions.execute()?;
/// # Ok(())
/// # }
/// ```
///
/// [`get_multi_line_value`]: OneRoundQuery::get_multi_line_value
#[derive(Debug)]
pub struct OneRoundQuery {
    db: Db,

    instances: Vec<Instance>,

    expressions: Vec<String>,

    /// Attribute set read by an expand query
    expand: Option<TypeId>,

    type_mappings: IndexMap<TypeId, TypeMapping>,

    table_mappings: IndexMap<TableId, SqlTableMapping>,

    expand_requests: IndexMap<String, ExpandRequest>,

    /// Global indices of the discriminator columns read
    discriminators: Vec<usize>,

    /// Input type of each id, used for rows without a discriminator
    instance_types: IndexMap<i64, TypeId>,

    cursor: CachedResult,
}

impl OneRoundQuery {
    pub(crate) fn new(db: Db, instances: Vec<Instance>, expressions: Vec<String>) -> Self {
        Self::with_expand(db, instances, expressions, None)
    }

    pub(crate) fn expand(
        db: Db,
        owners: Vec<Instance>,
        set: TypeId,
        expressions: Vec<String>,
    ) -> Result<Self> {
        let set_ty = db.schema().ty(set);

        if !set_ty.is_attribute_set() {
            bail!("type `{}` is not an attribute set", set_ty.name);
        }

        Ok(Self::with_expand(db, owners, expressions, Some(set)))
    }

    fn with_expand(
        db: Db,
        instances: Vec<Instance>,
        expressions: Vec<String>,
        expand: Option<TypeId>,
    ) -> Self {
        let mut instance_types = IndexMap::new();
        for instance in &instances {
            instance_types.entry(instance.id).or_insert(instance.ty);
        }

        Self {
            db,
            instances,
            expressions,
            expand,
            type_mappings: IndexMap::new(),
            table_mappings: IndexMap::new(),
            expand_requests: IndexMap::new(),
            discriminators: vec![],
            instance_types,
            cursor: CachedResult::new(),
        }
    }

    /// Plans and runs every statement of the query, loading the results
    /// into the cursor.
    ///
    /// On error the cursor is left empty.
    pub fn execute(&mut self) -> Result<()> {
        let schema = self.db.schema.clone();

        self.type_mappings.clear();
        self.table_mappings.clear();
        self.expand_requests.clear();
        self.discriminators.clear();
        self.cursor = CachedResult::new();

        match self.expand {
            Some(set) => {
                let mut mapping = TypeMapping::new(set, true);
                for instance in &self.instances {
                    mapping.add_instance(*instance);
                }
                self.type_mappings.insert(set, mapping);
            }
            None => {
                for instance in &self.instances {
                    self.type_mappings
                        .entry(instance.ty)
                        .or_insert_with(|| TypeMapping::new(instance.ty, false))
                        .add_instance(*instance);
                }
            }
        }

        for mapping in self.type_mappings.values_mut() {
            mapping.evaluate_selects(
                &schema,
                &self.expressions,
                &mut self.table_mappings,
                &mut self.expand_requests,
            );
        }

        let mut start = 0;

        for mapping in self.table_mappings.values_mut() {
            match mapping.evaluate(start, &schema, &*self.db.driver, &mut self.cursor) {
                Ok(next) => start = next,
                Err(err) => {
                    self.cursor = CachedResult::new();
                    return Err(err);
                }
            }
        }

        self.discriminators = self
            .table_mappings
            .values()
            .filter_map(|mapping| mapping.discriminator_index(&schema))
            .collect();

        log::debug!(
            "executed query; instances={} tables={} columns={start} rows={}",
            self.instances.len(),
            self.table_mappings.len(),
            self.cursor.len(),
        );

        Ok(())
    }

    pub fn next(&mut self) -> bool {
        self.cursor.next()
    }

    pub fn before_first(&mut self) {
        self.cursor.before_first();
    }

    pub fn goto_key(&mut self, key: i64) -> bool {
        self.cursor.goto_key(key)
    }

    /// Returns the concrete type of the current row, read from the
    /// discriminator column when the row has one. An expand query always
    /// yields its attribute set type.
    pub fn get_type(&self) -> Result<TypeId> {
        let Some(key) = self.cursor.key() else {
            bail!("cursor is not positioned on a row");
        };

        if let Some(set) = self.expand {
            return Ok(set);
        }

        let fallback = match self.instance_types.get(&key) {
            Some(ty) => *ty,
            None => match self.instances.first() {
                Some(instance) => instance.ty,
                None => bail!("query has no instances"),
            },
        };

        resolve_row_type(&self.cursor, &self.discriminators, self.db.schema(), fallback)
    }

    /// The instance of the current row. In an expand query this is the owner
    /// of the attribute set rows.
    pub fn get_instance(&self) -> Result<Instance> {
        let Some(id) = self.cursor.key() else {
            bail!("cursor is not positioned on a row");
        };

        let ty = match self.expand {
            Some(set) => self.owner_type(set, id),
            None => self.get_type()?,
        };

        Ok(Instance::new(ty, id))
    }

    /// The instances covered by the query. An expand query returns the
    /// owners found in the loaded rows rather than the owners it was given.
    pub fn get_instances(&self) -> Vec<Instance> {
        match self.expand {
            Some(set) => self
                .cursor
                .keys()
                .map(|id| Instance::new(self.owner_type(set, id), id))
                .collect(),
            None => self.instances.clone(),
        }
    }

    /// The attribute `expression` resolves to for the current row, if any.
    pub fn get_attribute(&self, expression: &str) -> Option<&Attribute> {
        let ty = self.get_type().ok()?;
        self.db.schema().find_attribute(ty, expression)
    }

    /// Reads `expression` for the current row.
    ///
    /// Expressions naming an attribute set (or a path into one) yield the
    /// row's id so the caller can match the rows of a follow-up expand
    /// query. Returns `None` when the expression is unknown to the row's
    /// type and every one of its ancestors, or when the cursor is not on a
    /// row.
    pub fn try_value(&self, expression: &str) -> Result<Option<Value>> {
        if !self.cursor.is_positioned() {
            return Ok(None);
        }

        let schema = self.db.schema();
        let ty = self.get_type()?;

        let Some(mapping) = schema
            .ancestors(ty)
            .find_map(|ty| self.type_mappings.get(&ty.id))
        else {
            return Ok(None);
        };

        mapping.get_value(schema, &self.cursor, &self.table_mappings, expression)
    }

    /// Reads `expression` for the current row, yielding `Null` for
    /// expressions that do not resolve.
    pub fn get_value(&self, expression: &str) -> Result<Value> {
        Ok(self.try_value(expression)?.unwrap_or_default())
    }

    /// Reads every requested attribute from all attribute set rows of the
    /// current owner, one value per row in load order, keyed by expression.
    ///
    /// The map is empty when the owner has no rows.
    pub fn get_multi_line_value(&self) -> Result<IndexMap<String, Vec<Value>>> {
        let Some(set) = self.expand else {
            bail!("multi-line values are only available on attribute set expand queries");
        };

        let mut ret = IndexMap::new();

        let Some(mapping) = self.type_mappings.get(&set) else {
            return Ok(ret);
        };

        let schema = self.db.schema();
        let table = schema.ty(set).table;

        let Some(table_mapping) = self.table_mappings.get(&table) else {
            return Ok(ret);
        };

        if !table_mapping.expand_has_result() || self.cursor.lines().next().is_none() {
            return Ok(ret);
        }

        for (expression, attribute) in mapping.attributes() {
            let attribute = schema.attribute(attribute);
            let Some(index) = table_mapping.column_index(attribute.id) else {
                continue;
            };

            let values = self
                .cursor
                .lines()
                .map(|line| attribute.ty.read(line.get(index).cloned().unwrap_or_default()))
                .collect::<Result<Vec<_>>>()?;

            ret.insert(expression.to_string(), values);
        }

        Ok(ret)
    }

    /// Attribute sets named by the requested expressions, by name.
    pub fn expand_requests(&self) -> impl Iterator<Item = &ExpandRequest> + '_ {
        self.expand_requests.values()
    }

    /// Builds the expand query loading the attribute set `name` for every
    /// instance of this query that owns one.
    pub fn expand_query(&self, name: &str) -> Result<OneRoundQuery> {
        let Some(request) = self.expand_requests.get(name) else {
            bail!("no attribute set `{name}` was requested");
        };

        let schema = self.db.schema();
        let owners = self
            .get_instances()
            .into_iter()
            .filter(|instance| {
                schema
                    .find_attribute_set(instance.ty, name)
                    .is_some_and(|set| set.id == request.set())
            })
            .collect();

        OneRoundQuery::expand(
            self.db.clone(),
            owners,
            request.set(),
            request.expressions(schema),
        )
    }

    /// The table planners of the query, in evaluation order.
    pub fn table_mappings(&self) -> impl Iterator<Item = &SqlTableMapping> + '_ {
        self.table_mappings.values()
    }

    pub fn cursor(&self) -> &CachedResult {
        &self.cursor
    }

    fn owner_type(&self, set: TypeId, id: i64) -> TypeId {
        match self.instance_types.get(&id) {
            Some(ty) => *ty,
            None => self
                .db
                .schema()
                .ty(set)
                .as_attribute_set()
                .map(|set| set.owner)
                .unwrap_or(set),
        }
    }
}
