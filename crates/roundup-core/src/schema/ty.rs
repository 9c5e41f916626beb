use super::{Attribute, TableId};

use indexmap::IndexMap;

/// An entity kind: its attributes, parent type and storage table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Type {
    /// Uniquely identifies the type within the schema. Also the value
    /// written to discriminator columns.
    pub id: TypeId,

    pub name: String,

    /// Single-inheritance parent
    pub parent: Option<TypeId>,

    /// The table holding the type's id column
    pub table: TableId,

    /// Attributes declared by this type, excluding inherited ones
    pub attributes: IndexMap<String, Attribute>,

    /// Child attribute sets owned by this type, by name
    pub attribute_sets: IndexMap<String, TypeId>,

    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// Ordinary type, one row per instance
    Entity,

    /// Normalized child rows, many per owner instance
    AttributeSet(AttributeSet),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSet {
    /// The type owning the rows of this set
    pub owner: TypeId,

    /// Name of the link attribute pointing back at the owner row
    pub foreign_key: String,
}

#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeId(pub usize);

impl_id_display!(TypeId);

impl Type {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_set(&self, name: &str) -> Option<TypeId> {
        self.attribute_sets.get(name).copied()
    }

    pub fn is_attribute_set(&self) -> bool {
        matches!(self.kind, TypeKind::AttributeSet(_))
    }

    pub fn as_attribute_set(&self) -> Option<&AttributeSet> {
        match &self.kind {
            TypeKind::AttributeSet(set) => Some(set),
            TypeKind::Entity => None,
        }
    }

    /// Returns the link attribute of an attribute set type that points at
    /// the owner row.
    pub fn foreign_key(&self) -> Option<&Attribute> {
        self.as_attribute_set()
            .and_then(|set| self.attribute(&set.foreign_key))
    }
}

impl From<&Type> for TypeId {
    fn from(value: &Type) -> Self {
        value.id
    }
}
