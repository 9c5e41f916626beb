use crate::CachedResult;

use roundup_core::{
    schema::{Schema, TypeId},
    Result,
};

/// Resolves the concrete type of the cursor's current row.
///
/// Every index in `discriminators` is the global column of a discriminator
/// read by the query. The first one holding a value decides the type. Rows
/// that were not loaded from any table with a discriminator fall back to
/// `fallback`.
pub fn resolve_row_type(
    cursor: &CachedResult,
    discriminators: &[usize],
    schema: &Schema,
    fallback: TypeId,
) -> Result<TypeId> {
    for index in discriminators {
        if let Some(discriminator) = cursor.get_i64(*index) {
            return Ok(schema.resolve_type(discriminator)?.id);
        }
    }

    Ok(fallback)
}
