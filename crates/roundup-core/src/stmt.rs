mod expr;
pub use expr::{BinaryOp, Expr, ExprAnd, ExprBinaryOp, ExprColumn, ExprInList};

mod expr_set;
pub use expr_set::{ExprSet, ExprSetOp, SetOp};

mod query;
pub use query::Query;

mod select;
pub use select::Select;

mod value;
pub use value::Value;

mod value_record;
pub use value_record::ValueRecord;
