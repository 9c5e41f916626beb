use super::Error;

/// Error when a discriminator value does not name a registered type.
#[derive(Debug)]
pub(super) struct UnknownTypeError {
    discriminator: i64,
}

impl std::error::Error for UnknownTypeError {}

impl core::fmt::Display for UnknownTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "no type registered for discriminator {}",
            self.discriminator
        )
    }
}

impl Error {
    /// Creates an unknown type error.
    pub fn unknown_type(discriminator: i64) -> Error {
        Error::from(super::ErrorKind::UnknownType(UnknownTypeError {
            discriminator,
        }))
    }

    /// Returns `true` if this error is an unknown type error.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownType(_))
    }
}
