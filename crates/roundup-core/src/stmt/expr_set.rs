use super::Select;

/// The body of a query: a single select or a set operation over several.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprSet {
    Select(Box<Select>),
    SetOp(ExprSetOp),
}

/// A set operation combining multiple queries.
///
/// ```text
/// SELECT ... UNION SELECT ...
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExprSetOp {
    /// The set operation to apply.
    pub op: SetOp,

    /// The queries to combine.
    pub operands: Vec<ExprSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    /// Combine and remove duplicate rows
    Union,
}

impl ExprSet {
    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_set_op(&self) -> Option<&ExprSetOp> {
        match self {
            Self::SetOp(expr) => Some(expr),
            _ => None,
        }
    }

    /// Returns `true` when the set combines several selects with `UNION`.
    pub fn is_union(&self) -> bool {
        matches!(self, Self::SetOp(op) if op.is_union())
    }

    /// Iterates every select in the set, depth first.
    pub fn selects(&self) -> Box<dyn Iterator<Item = &Select> + '_> {
        match self {
            Self::Select(select) => Box::new(std::iter::once(&**select)),
            Self::SetOp(set_op) => Box::new(set_op.operands.iter().flat_map(ExprSet::selects)),
        }
    }
}

impl ExprSetOp {
    pub fn is_union(&self) -> bool {
        matches!(self.op, SetOp::Union)
    }
}

impl From<Select> for ExprSet {
    fn from(value: Select) -> Self {
        Self::Select(Box::new(value))
    }
}

impl From<ExprSetOp> for ExprSet {
    fn from(value: ExprSetOp) -> Self {
        Self::SetOp(value)
    }
}
