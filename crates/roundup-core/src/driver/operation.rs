use crate::stmt;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a SQL query
    QuerySql(QuerySql),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The SQL query to execute
    pub stmt: stmt::Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Start a transaction
    Start,

    /// Commit a transaction
    Commit,

    /// Rollback a transaction
    Rollback,
}

impl Operation {
    pub fn as_query_sql(&self) -> Option<&QuerySql> {
        match self {
            Self::QuerySql(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_transaction(&self, transaction: Transaction) -> bool {
        matches!(self, Self::Transaction(op) if *op == transaction)
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}
