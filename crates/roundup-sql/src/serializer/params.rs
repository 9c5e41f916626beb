use super::{Flavor, Formatter, ToSql};

use roundup_core::stmt;

/// Collects the values bound to a statement's placeholders.
pub trait Params {
    fn push(&mut self, param: &stmt::Value) -> Placeholder;
}

/// One-based position of a bound parameter
pub struct Placeholder(pub usize);

impl Params for Vec<stmt::Value> {
    fn push(&mut self, value: &stmt::Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        let _ = match f.serializer.flavor {
            Flavor::Mysql => write!(&mut f.dst, "?"),
            Flavor::Postgresql => write!(&mut f.dst, "${}", self.0),
            Flavor::Sqlite => write!(&mut f.dst, "?{}", self.0),
        };
    }
}
