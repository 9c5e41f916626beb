#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// When true, the database uses a SQL-based query language.
    pub sql: bool,

    /// Largest number of ids placed in a single `IN (...)` list. Longer id
    /// lists are split into several selects combined with `UNION`. `None`
    /// means there is no limit.
    pub max_expressions: Option<usize>,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        sql: true,
        max_expressions: None,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self::SQLITE;

    /// MySQL capabilities
    pub const MYSQL: Self = Self::SQLITE;

    /// Returns the same capability with a different expression limit. A
    /// limit of zero removes the limit.
    pub fn with_max_expressions(mut self, max: usize) -> Self {
        self.max_expressions = (max > 0).then_some(max);
        self
    }
}
