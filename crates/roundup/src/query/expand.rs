use roundup_core::schema::{Schema, TypeId};

use indexmap::IndexSet;

/// A follow-up read of an attribute set, recorded while planning a query
/// that named the set.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandRequest {
    name: String,
    set: TypeId,

    /// Attributes named through `Set/Attribute` paths
    attributes: IndexSet<String>,
}

impl ExpandRequest {
    pub(crate) fn new(name: &str, set: TypeId) -> Self {
        Self {
            name: name.to_string(),
            set,
            attributes: IndexSet::new(),
        }
    }

    pub(crate) fn add_attribute(&mut self, attribute: Option<&str>) {
        if let Some(attribute) = attribute {
            self.attributes.insert(attribute.to_string());
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute set type
    pub fn set(&self) -> TypeId {
        self.set
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.iter().map(String::as_str)
    }

    /// Expressions the expand query reads. Without explicitly named
    /// attributes, every attribute of the set except the foreign key.
    pub fn expressions(&self, schema: &Schema) -> Vec<String> {
        if !self.attributes.is_empty() {
            return self.attributes.iter().cloned().collect();
        }

        let set = schema.ty(self.set);
        let foreign_key = set.as_attribute_set().map(|set| set.foreign_key.as_str());

        set.attributes
            .keys()
            .filter(|name| Some(name.as_str()) != foreign_key)
            .cloned()
            .collect()
    }
}
