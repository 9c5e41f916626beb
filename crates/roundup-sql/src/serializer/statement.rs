use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use roundup_core::stmt;

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.body);
    }
}

impl ToSql for &stmt::ExprSet {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::ExprSet::Select(select) => fmt!(f, &**select),
            stmt::ExprSet::SetOp(set_op) => fmt!(f, set_op),
        }
    }
}

impl ToSql for &stmt::ExprSetOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let op = match self.op {
            stmt::SetOp::Union => " UNION ",
        };

        fmt!(f, Delimited(&self.operands, op));
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        let columns = Comma(self.returning.iter().map(Ident));
        let table_name = f.serializer.table_name(self.source);
        let filter = &self.filter;

        fmt!(f, "SELECT " distinct columns " FROM " table_name " WHERE " filter);
    }
}
