use crate::schema::TypeId;

use std::fmt;

/// Reference to one stored entity: its concrete type and numeric id.
///
/// Instances are plain values. Two instances are equal when both the type
/// and the id match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    pub ty: TypeId,
    pub id: i64,
}

impl Instance {
    pub const fn new(ty: TypeId, id: i64) -> Self {
        Self { ty, id }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Instance({}.{})", self.ty.0, self.id)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}.{}", self.ty.0, self.id)
    }
}
