use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use roundup_core::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) => {
                fmt!(f, Delimited(&expr.operands, " AND "));
            }
            BinaryOp(expr) => {
                assert!(!expr.lhs.is_value_null());
                assert!(!expr.rhs.is_value_null());

                let (lhs, rhs) = (&*expr.lhs, &*expr.rhs);
                let op = expr.op.to_string();
                fmt!(f, lhs " " op.as_str() " " rhs);
            }
            Column(expr) => {
                fmt!(f, Ident(&expr.name));
            }
            InList(expr) if expr.is_empty() => {
                // `IN ()` is rejected by most databases; `IN (NULL)` matches
                // nothing.
                let lhs = &*expr.expr;
                fmt!(f, lhs " IN (NULL)");
            }
            InList(expr) => {
                let (lhs, list) = (&*expr.expr, &*expr.list);
                fmt!(f, lhs " IN (" list ")");
            }
            List(items) => {
                fmt!(f, Comma(items));
            }
            Value(value) => {
                fmt!(f, value);
            }
        }
    }
}
