use super::{TableId, TypeId};
use crate::{stmt::Value, Error, Instance, Result};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Uniquely identifies the attribute in the schema.
    pub id: AttributeId,

    pub name: String,

    /// The table storing the attribute's columns
    pub table: TableId,

    /// Physical columns backing the attribute.
    ///
    /// Composite attributes list several columns. Reads only ever look at
    /// the first one.
    pub columns: Vec<String>,

    /// How raw column values are converted
    pub ty: AttributeType,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeId {
    /// The declaring type
    pub ty: TypeId,
    pub index: usize,
}

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeType {
    Bool,
    I64,
    F64,
    String,

    /// Foreign key holding the raw id of an instance of the given type
    Link(TypeId),
}

impl Attribute {
    /// The column values are read from
    pub fn column(&self) -> &str {
        &self.columns[0]
    }

    pub fn is_link(&self) -> bool {
        matches!(self.ty, AttributeType::Link(_))
    }
}

impl AttributeType {
    /// Converts a raw value as returned by the driver into a value of this
    /// type. `Null` is passed through unchanged.
    pub fn read(&self, value: Value) -> Result<Value> {
        use AttributeType::*;

        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
            (Bool, Value::I64(v)) => Ok(Value::Bool(v != 0)),
            (I64, Value::I64(v)) => Ok(Value::I64(v)),
            (F64, Value::F64(v)) => Ok(Value::F64(v)),
            (F64, Value::I64(v)) => Ok(Value::F64(v as f64)),
            (String, Value::String(v)) => Ok(Value::String(v)),
            (Link(target), Value::I64(id)) => Ok(Value::Instance(Instance::new(*target, id))),
            (Link(_), value @ Value::Instance(_)) => Ok(value),
            (ty, value) => Err(Error::type_conversion(value, ty.name())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Link(_) => "link",
        }
    }
}

impl fmt::Debug for AttributeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AttributeId({}/{})", self.ty.0, self.index)
    }
}
