use std::fmt;

/// A physical table read by the engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqlTable {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table in the database
    pub name: String,

    /// Column holding the row id
    pub id_column: String,

    /// Column naming the concrete type of each row. Only set for tables
    /// shared by several types.
    pub discriminator: Option<String>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableId(pub usize);

impl SqlTable {
    pub fn has_discriminator(&self) -> bool {
        self.discriminator.is_some()
    }
}

impl From<&SqlTable> for TableId {
    fn from(value: &SqlTable) -> Self {
        value.id
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
