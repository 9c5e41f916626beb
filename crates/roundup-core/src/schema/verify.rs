use super::{Schema, Type, TypeKind};
use crate::{Error, Result};

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for (index, table) in self.schema.tables.iter().enumerate() {
            if table.id.0 != index {
                return Err(Error::invalid_schema(format!(
                    "table `{}` is registered at position {index} but has {:?}",
                    table.name, table.id
                )));
            }
        }

        for (index, ty) in self.schema.types.iter().enumerate() {
            if ty.id.0 != index {
                return Err(Error::invalid_schema(format!(
                    "type `{}` is registered at position {index} but has {:?}",
                    ty.name, ty.id
                )));
            }

            self.verify_table_exists(ty, ty.table.0)?;
            self.verify_parent_chain(ty)?;
            self.verify_attributes(ty)?;

            if let TypeKind::AttributeSet(_) = ty.kind {
                self.verify_attribute_set(ty)?;
            }
        }

        Ok(())
    }

    fn verify_table_exists(&self, ty: &Type, table: usize) -> Result<()> {
        if table >= self.schema.tables.len() {
            return Err(Error::invalid_schema(format!(
                "type `{}` references unknown table {table}",
                ty.name
            )));
        }
        Ok(())
    }

    fn verify_parent_chain(&self, ty: &Type) -> Result<()> {
        let mut next = ty.parent;
        let mut depth = 0;

        while let Some(parent) = next {
            let Some(parent_ty) = self.schema.types.get(parent.0) else {
                return Err(Error::invalid_schema(format!(
                    "type `{}` has unknown parent {parent:?}",
                    ty.name
                )));
            };

            depth += 1;
            if depth > self.schema.types.len() {
                return Err(Error::invalid_schema(format!(
                    "type `{}` has a cyclic parent chain",
                    ty.name
                )));
            }

            next = parent_ty.parent;
        }

        Ok(())
    }

    fn verify_attributes(&self, ty: &Type) -> Result<()> {
        for (index, (name, attribute)) in ty.attributes.iter().enumerate() {
            if attribute.id.ty != ty.id || attribute.id.index != index || *name != attribute.name {
                return Err(Error::invalid_schema(format!(
                    "attribute `{}.{name}` has a mismatched id {:?}",
                    ty.name, attribute.id
                )));
            }

            if attribute.columns.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "attribute `{}.{name}` has no columns",
                    ty.name
                )));
            }

            self.verify_table_exists(ty, attribute.table.0)?;
        }

        for (name, set) in &ty.attribute_sets {
            let owned = self
                .schema
                .types
                .get(set.0)
                .and_then(Type::as_attribute_set)
                .is_some_and(|set| set.owner == ty.id);

            if !owned {
                return Err(Error::invalid_schema(format!(
                    "attribute set `{}.{name}` does not name a set owned by `{}`",
                    ty.name, ty.name
                )));
            }
        }

        Ok(())
    }

    fn verify_attribute_set(&self, ty: &Type) -> Result<()> {
        let Some(set) = ty.as_attribute_set() else {
            return Ok(());
        };

        if self.schema.types.get(set.owner.0).is_none() {
            return Err(Error::invalid_schema(format!(
                "attribute set `{}` has unknown owner {:?}",
                ty.name, set.owner
            )));
        }

        let Some(foreign_key) = ty.foreign_key() else {
            return Err(Error::invalid_schema(format!(
                "attribute set `{}` has no foreign key attribute",
                ty.name
            )));
        };

        if !foreign_key.is_link() {
            return Err(Error::invalid_schema(format!(
                "foreign key `{}.{}` is not a link attribute",
                ty.name, foreign_key.name
            )));
        }

        // Expanding a set reads exactly one table: the one holding the
        // owner link.
        for attribute in ty.attributes.values() {
            if attribute.table != ty.table {
                return Err(Error::invalid_schema(format!(
                    "attribute `{}.{}` of an attribute set must live in the set's main table",
                    ty.name, attribute.name
                )));
            }
        }

        if ty.parent.is_some() {
            return Err(Error::invalid_schema(format!(
                "attribute set `{}` cannot have a parent type",
                ty.name
            )));
        }

        Ok(())
    }
}
