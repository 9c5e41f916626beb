use super::Value;

use std::fmt;

/// Scalar expression used in a statement's filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// References a column of the statement's source table
    Column(ExprColumn),

    /// In list
    InList(ExprInList),

    /// A list of expressions, used as the right-hand side of `IN`
    List(Vec<Expr>),

    /// Evaluates to a constant value reference
    Value(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    /// Physical column name
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Box<Expr>,
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ExprColumn { name: name.into() })
    }

    pub fn eq(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op: BinaryOp::Eq,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn in_list(lhs: impl Into<Self>, items: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        ExprInList {
            expr: Box::new(lhs.into()),
            list: Box::new(Self::List(items.into_iter().map(Into::into).collect())),
        }
        .into()
    }

    /// Combines two expressions with `AND`, flattening nested conjunctions.
    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        let mut operands = vec![];

        for expr in [lhs.into(), rhs.into()] {
            match expr {
                Self::And(and) => operands.extend(and.operands),
                expr => operands.push(expr),
            }
        }

        Self::And(ExprAnd { operands })
    }

    pub fn as_in_list(&self) -> Option<&ExprInList> {
        match self {
            Self::InList(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }
}

impl ExprInList {
    /// Number of items on the right-hand side of the `IN`.
    pub fn len(&self) -> usize {
        self.list.as_list().map(<[Expr]>::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => f.write_str("="),
            Self::Ne => f.write_str("<>"),
        }
    }
}

impl From<ExprAnd> for Expr {
    fn from(value: ExprAnd) -> Self {
        Self::And(value)
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(Value::I64(value))
    }
}
