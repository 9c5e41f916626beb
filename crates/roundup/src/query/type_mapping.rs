use super::{ExpandRequest, SqlTableMapping, PATH_SEPARATOR};
use crate::CachedResult;

use roundup_core::{
    schema::{AttributeId, Schema, TableId, TypeId},
    stmt::Value,
    Instance, Result,
};

use indexmap::{IndexMap, IndexSet};

/// Resolves the requested expressions against one type and registers the
/// resulting attributes with the table planners.
#[derive(Debug)]
pub(crate) struct TypeMapping {
    ty: TypeId,

    /// Set when reading the rows of an attribute set for a batch of owners
    expand: bool,

    instances: Vec<Instance>,

    /// Expressions resolving to a scalar attribute
    attributes: IndexMap<String, AttributeId>,

    /// Expressions naming a child attribute set
    multi_expressions: IndexSet<String>,

    /// Tables supplying the attribute values
    tables: IndexSet<TableId>,
}

impl TypeMapping {
    pub(crate) fn new(ty: TypeId, expand: bool) -> Self {
        Self {
            ty,
            expand,
            instances: vec![],
            attributes: IndexMap::new(),
            multi_expressions: IndexSet::new(),
            tables: IndexSet::new(),
        }
    }

    pub(crate) fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub(crate) fn attributes(&self) -> impl Iterator<Item = (&str, AttributeId)> + '_ {
        self.attributes
            .iter()
            .map(|(expression, attribute)| (expression.as_str(), *attribute))
    }

    pub(crate) fn evaluate_selects(
        &mut self,
        schema: &Schema,
        expressions: &[String],
        table_mappings: &mut IndexMap<TableId, SqlTableMapping>,
        expand_requests: &mut IndexMap<String, ExpandRequest>,
    ) {
        for expression in expressions {
            if expression == "ID" {
                continue;
            }

            if let Some(attribute) = schema.find_attribute(self.ty, expression) {
                self.attributes.insert(expression.clone(), attribute.id);
                continue;
            }

            let (name, sub_attribute) = match expression.split_once(PATH_SEPARATOR) {
                Some((name, sub_attribute)) => (name, Some(sub_attribute)),
                None => (expression.as_str(), None),
            };

            match schema.find_attribute_set(self.ty, name) {
                Some(set) => {
                    self.multi_expressions.insert(expression.clone());
                    expand_requests
                        .entry(name.to_string())
                        .or_insert_with(|| ExpandRequest::new(name, set.id))
                        .add_attribute(sub_attribute);
                }
                None => {
                    log::debug!(
                        "expression does not resolve; type={} expression={expression}",
                        schema.ty(self.ty).name
                    );
                }
            }
        }

        // Keep the owner id addressable when only attribute sets were named
        if self.attributes.is_empty() {
            let main_table = schema.ty(self.ty).table;
            self.register(schema, main_table, table_mappings);
        }

        let attributes: Vec<AttributeId> = self.attributes.values().copied().collect();

        for attribute in attributes {
            let attribute = schema.attribute(attribute);
            let mapping = self.register(schema, attribute.table, table_mappings);
            mapping.add_attribute(attribute);
        }
    }

    fn register<'a>(
        &mut self,
        schema: &Schema,
        table: TableId,
        table_mappings: &'a mut IndexMap<TableId, SqlTableMapping>,
    ) -> &'a mut SqlTableMapping {
        let expand = self.expand.then_some(self.ty);
        let mapping = table_mappings
            .entry(table)
            .or_insert_with(|| SqlTableMapping::new(schema, table, expand));

        if self.tables.insert(table) {
            mapping.add_instances(self.instances.iter().copied());
        }

        mapping
    }

    /// Reads `expression` for the cursor's current row. Returns `None` when
    /// the expression names nothing known to this type.
    pub(crate) fn get_value(
        &self,
        schema: &Schema,
        cursor: &CachedResult,
        table_mappings: &IndexMap<TableId, SqlTableMapping>,
        expression: &str,
    ) -> Result<Option<Value>> {
        if let Some(attribute) = self.attributes.get(expression) {
            let attribute = schema.attribute(*attribute);

            return match table_mappings.get(&attribute.table) {
                Some(mapping) => mapping.read(cursor, attribute).map(Some),
                None => Ok(Some(Value::Null)),
            };
        }

        if expression == "ID"
            || self.multi_expressions.contains(expression)
            || expression.contains(PATH_SEPARATOR)
            || schema.find_attribute_set(self.ty, expression).is_some()
        {
            return Ok(Some(cursor.key().map(Value::I64).unwrap_or_default()));
        }

        Ok(None)
    }
}
