use super::Expr;
use crate::schema::TableId;

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Drop duplicate rows
    pub distinct: bool,

    /// Physical column names to project, in result order
    pub returning: Vec<String>,

    /// The table rows are read from
    pub source: TableId,

    /// Query filter
    pub filter: Expr,
}

impl Select {
    pub fn new(source: TableId, returning: Vec<String>, filter: impl Into<Expr>) -> Self {
        Self {
            distinct: false,
            returning,
            source,
            filter: filter.into(),
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn add_filter(&mut self, filter: impl Into<Expr>) {
        let filter = filter.into();
        self.filter = Expr::and(std::mem::replace(&mut self.filter, Expr::Value(true.into())), filter);
    }
}
