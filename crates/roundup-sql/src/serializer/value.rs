use super::{Formatter, Params, ToSql};

use roundup_core::stmt;

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::Value::*;

        match self {
            I64(value) => fmt!(f, *value),
            Instance(instance) => fmt!(f, instance.id),
            Bool(value) if f.serializer.is_postgresql() => {
                fmt!(f, if *value { "TRUE" } else { "FALSE" })
            }
            Bool(value) => fmt!(f, if *value { "1" } else { "0" }),
            Null => fmt!(f, "NULL"),
            value => {
                let placeholder = f.params.push(value);
                fmt!(f, placeholder);
            }
        }
    }
}
