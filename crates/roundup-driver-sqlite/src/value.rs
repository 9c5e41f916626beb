use roundup_core::{
    err,
    stmt::{self, Value as CoreValue},
    Error, Result,
};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a core value. No type
    /// information is applied here; attribute converters do that later.
    pub fn from_sql(row: &Row, index: usize) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver)?;

        let core_value = match value {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => stmt::Value::I64(value),
            SqlValue::Real(value) => stmt::Value::F64(value),
            SqlValue::Text(value) => stmt::Value::String(value),
            SqlValue::Blob(_) => return Err(err!("column {index} holds a blob")),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::Instance(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(v.id))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
