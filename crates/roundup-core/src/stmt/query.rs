use super::{ExprSet, ExprSetOp, Select, SetOp};

/// A read statement sent to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub body: ExprSet,
}

impl Query {
    pub fn new(body: impl Into<ExprSet>) -> Self {
        Self { body: body.into() }
    }

    /// Builds a query from several selects over the same columns. More than
    /// one select is combined with `UNION`, which also drops duplicate rows
    /// between the chunks.
    ///
    /// # Panics
    ///
    /// Panics if `selects` is empty.
    pub fn union(selects: impl IntoIterator<Item = Select>) -> Self {
        let mut operands: Vec<ExprSet> = selects.into_iter().map(ExprSet::from).collect();

        match operands.len() {
            0 => panic!("a union needs at least one select"),
            1 => Self::new(operands.remove(0)),
            _ => Self::new(ExprSetOp {
                op: SetOp::Union,
                operands,
            }),
        }
    }

    /// Number of columns each row of the result carries.
    pub fn width(&self) -> usize {
        self.body
            .selects()
            .next()
            .map(|select| select.returning.len())
            .unwrap_or(0)
    }
}
