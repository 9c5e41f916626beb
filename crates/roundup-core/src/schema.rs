mod attribute;
pub use attribute::{Attribute, AttributeId, AttributeType};

mod builder;
pub use builder::{Builder, TypeBuilder};

mod table;
pub use table::{SqlTable, TableId};

mod ty;
pub use ty::{AttributeSet, Type, TypeId, TypeKind};

mod verify;

use crate::{Error, Result};

/// Registry of every type, attribute and physical table known to the
/// engine.
///
/// The schema is built once with [`Schema::builder`] and is immutable
/// afterwards. Identifiers are positions in the `types` and `tables`
/// vectors; the value stored in a discriminator column is the numeric
/// [`TypeId`] of the row's concrete type.
///
/// A deserialized schema goes through the same verification as
/// [`Builder::build`].
#[derive(Debug, Default, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSchema")
)]
pub struct Schema {
    pub types: Vec<Type>,
    pub tables: Vec<SqlTable>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSchema {
    types: Vec<Type>,
    tables: Vec<SqlTable>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSchema> for Schema {
    type Error = Error;

    fn try_from(raw: RawSchema) -> Result<Schema> {
        let schema = Schema {
            types: raw.types,
            tables: raw.tables,
        };
        schema.verify()?;
        Ok(schema)
    }
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get a type by ID
    #[track_caller]
    pub fn ty(&self, id: impl Into<TypeId>) -> &Type {
        self.types.get(id.into().0).expect("invalid type ID")
    }

    /// Get a table by ID
    #[track_caller]
    pub fn table(&self, id: impl Into<TableId>) -> &SqlTable {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    /// Get an attribute by ID
    #[track_caller]
    pub fn attribute(&self, id: AttributeId) -> &Attribute {
        self.ty(id.ty)
            .attributes
            .get_index(id.index)
            .map(|(_, attribute)| attribute)
            .expect("invalid attribute ID")
    }

    /// Find a type by its name
    pub fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|ty| ty.name == name)
    }

    /// Resolves the value read from a discriminator column to the type it
    /// names.
    pub fn resolve_type(&self, discriminator: i64) -> Result<&Type> {
        usize::try_from(discriminator)
            .ok()
            .and_then(|index| self.types.get(index))
            .ok_or_else(|| Error::unknown_type(discriminator))
    }

    /// Iterates the type followed by each of its ancestors, nearest first.
    pub fn ancestors(&self, id: TypeId) -> impl Iterator<Item = &Type> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let ty = self.ty(next?);
            next = ty.parent;
            Some(ty)
        })
    }

    /// Resolves an attribute by name on the type, falling back to the
    /// attributes inherited from its ancestors.
    pub fn find_attribute(&self, ty: TypeId, name: &str) -> Option<&Attribute> {
        self.ancestors(ty).find_map(|ty| ty.attribute(name))
    }

    /// Resolves a child attribute set by name on the type or its ancestors.
    pub fn find_attribute_set(&self, ty: TypeId, name: &str) -> Option<&Type> {
        self.ancestors(ty)
            .find_map(|ty| ty.attribute_set(name))
            .map(|id| self.ty(id))
    }
}
