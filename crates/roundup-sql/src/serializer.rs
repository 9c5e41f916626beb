#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;
mod value;

use roundup_core::{
    schema::{Schema, SqlTable, TableId},
    stmt::Query,
};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    schema: &'a Schema,

    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    /// Serializes the query, pushing any bound value into `params`.
    ///
    /// Integers are written inline. They are ids produced by the engine, never
    /// caller-provided text, and inlining keeps long id lists clear of the
    /// database's bound-parameter limit.
    pub fn serialize(&self, stmt: &Query, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    fn table(&self, id: impl Into<TableId>) -> &'a SqlTable {
        self.schema.table(id.into())
    }

    fn table_name(&self, id: impl Into<TableId>) -> Ident<&'a str> {
        Ident(self.table(id).name.as_str())
    }
}
