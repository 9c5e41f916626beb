use super::{
    Attribute, AttributeId, AttributeSet, AttributeType, Schema, SqlTable, TableId, Type, TypeId,
    TypeKind,
};
use crate::Result;

use indexmap::IndexMap;

/// Assembles a [`Schema`].
///
/// Tables are declared first, then types referencing them. Identifiers are
/// handed out in declaration order. Nothing is checked until
/// [`Builder::build`], which verifies the whole registry at once.
///
/// ```
/// use roundup_core::schema::{AttributeType, Schema};
///
/// let mut builder = Schema::builder();
/// let t_doc = builder.table_with_discriminator("T_DOC", "ID", "TYPEID");
///
/// let document = builder
///     .ty("Document", t_doc)
///     .attribute("Name", "NAME", AttributeType::String)
///     .id();
///
/// let schema = builder.build().unwrap();
/// assert_eq!(schema.ty(document).name, "Document");
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    tables: Vec<SqlTable>,
    types: Vec<Type>,
}

/// Declares the attributes of one type. Returned by [`Builder::ty`] and
/// [`Builder::attribute_set`].
#[derive(Debug)]
pub struct TypeBuilder<'a> {
    builder: &'a mut Builder,
    id: TypeId,
}

impl Builder {
    /// Declares a table owned by a single type.
    pub fn table(&mut self, name: &str, id_column: &str) -> TableId {
        self.push_table(name, id_column, None)
    }

    /// Declares a table shared by several types, told apart by the
    /// discriminator column.
    pub fn table_with_discriminator(
        &mut self,
        name: &str,
        id_column: &str,
        discriminator: &str,
    ) -> TableId {
        self.push_table(name, id_column, Some(discriminator))
    }

    /// Declares an entity type whose id lives in `table`.
    pub fn ty(&mut self, name: &str, table: TableId) -> TypeBuilder<'_> {
        self.push_type(name, table, TypeKind::Entity)
    }

    /// Declares an attribute set named `name` on `owner`. The rows of the
    /// set live in `table` and point back at their owner through the link
    /// attribute declared with [`TypeBuilder::foreign_key`].
    pub fn attribute_set(&mut self, owner: TypeId, name: &str, table: TableId) -> TypeBuilder<'_> {
        let kind = TypeKind::AttributeSet(AttributeSet {
            owner,
            foreign_key: String::new(),
        });

        let id = TypeId(self.types.len());
        if let Some(owner) = self.types.get_mut(owner.0) {
            owner.attribute_sets.insert(name.to_string(), id);
        }

        self.push_type(name, table, kind)
    }

    /// Verifies the registry and returns the finished schema.
    pub fn build(self) -> Result<Schema> {
        let schema = Schema {
            types: self.types,
            tables: self.tables,
        };

        schema.verify()?;
        Ok(schema)
    }

    fn push_table(&mut self, name: &str, id_column: &str, discriminator: Option<&str>) -> TableId {
        let id = TableId(self.tables.len());
        self.tables.push(SqlTable {
            id,
            name: name.to_string(),
            id_column: id_column.to_string(),
            discriminator: discriminator.map(str::to_string),
        });
        id
    }

    fn push_type(&mut self, name: &str, table: TableId, kind: TypeKind) -> TypeBuilder<'_> {
        let id = TypeId(self.types.len());
        self.types.push(Type {
            id,
            name: name.to_string(),
            parent: None,
            table,
            attributes: IndexMap::new(),
            attribute_sets: IndexMap::new(),
            kind,
        });

        TypeBuilder { builder: self, id }
    }
}

impl TypeBuilder<'_> {
    /// The identifier of the type being declared
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn parent(mut self, parent: TypeId) -> Self {
        self.ty_mut().parent = Some(parent);
        self
    }

    /// Adds an attribute stored in the type's main table.
    pub fn attribute(mut self, name: &str, column: &str, ty: AttributeType) -> Self {
        let table = self.ty_mut().table;
        self.attribute_in(table, name, &[column], ty)
    }

    /// Adds an attribute stored in `table`, possibly spread over several
    /// columns.
    pub fn attribute_in(
        mut self,
        table: TableId,
        name: &str,
        columns: &[&str],
        ty: AttributeType,
    ) -> Self {
        let owner = self.id;
        let target = self.ty_mut();
        let id = AttributeId {
            ty: owner,
            index: target.attributes.len(),
        };

        target.attributes.insert(
            name.to_string(),
            Attribute {
                id,
                name: name.to_string(),
                table,
                columns: columns.iter().map(|column| column.to_string()).collect(),
                ty,
            },
        );
        self
    }

    /// Declares the link attribute of an attribute set pointing at the
    /// owner row.
    pub fn foreign_key(mut self, name: &str, column: &str) -> Self {
        let target = self.ty_mut();
        let TypeKind::AttributeSet(set) = &mut target.kind else {
            panic!("`{}` is not an attribute set", target.name);
        };

        set.foreign_key = name.to_string();
        let owner = set.owner;
        self.attribute(name, column, AttributeType::Link(owner))
    }

    fn ty_mut(&mut self) -> &mut Type {
        &mut self.builder.types[self.id.0]
    }
}
