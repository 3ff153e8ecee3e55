use core::fmt;
use std::error::Error as StdError;

use crate::Discriminant;

/// Returned when the requested alternative is not the active one, including when the
/// [`Variant`](crate::Variant) is valueless.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bad variant access: requested alternative {requested}, but the variant is {found}")]
pub struct BadAccess {
    requested: usize,
    found: Discriminant,
}

impl BadAccess {
    #[inline]
    pub(crate) const fn new(requested: usize, found: Discriminant) -> Self {
        BadAccess { requested, found }
    }

    /// The index of the alternative that was asked for.
    #[inline]
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// What the variant actually held at the time of the access.
    #[inline]
    pub const fn found(&self) -> Discriminant {
        self.found
    }
}

/// Returned by [`Variant::try_assign_across`](crate::Variant::try_assign_across) when the
/// source holds a type that is not an alternative of the destination. The destination is left
/// untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bad variant assignment: `{type_name}` is not an alternative of the destination")]
pub struct BadAssignment {
    type_name: &'static str,
}

impl BadAssignment {
    #[inline]
    pub(crate) const fn new(type_name: &'static str) -> Self {
        BadAssignment { type_name }
    }

    /// Name of the rejected source type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// An error raised by one of an alternative's own lifetime primitives, e.g. a failed
/// [`CopyAlternative::try_copy`](crate::CopyAlternative::try_copy).
///
/// The wrapped error is carried as-is: it displays the same, reports the same source, and can
/// be recovered with [`LifetimeError::downcast`].
pub struct LifetimeError(Box<dyn StdError + Send + Sync + 'static>);

impl LifetimeError {
    /// Wraps the error raised by an alternative.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::LifetimeError;
    ///
    /// let err = LifetimeError::new("resource exhausted");
    /// assert_eq!(err.to_string(), "resource exhausted");
    /// ```
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        LifetimeError(error.into())
    }

    /// Returns a reference to the wrapped error if it is of type `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Recovers the wrapped error if it is of type `E`, otherwise hands `self` back.
    pub fn downcast<E: StdError + 'static>(self) -> Result<E, Self> {
        match self.0.downcast::<E>() {
            Ok(error) => Ok(*error),
            Err(error) => Err(LifetimeError(error)),
        }
    }

    /// Unwraps into the boxed error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for LifetimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for LifetimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for LifetimeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Every error a [`Variant`](crate::Variant) operation can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    BadAccess(#[from] BadAccess),
    #[error(transparent)]
    BadAssignment(#[from] BadAssignment),
    #[error(transparent)]
    Lifetime(#[from] LifetimeError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{
        BadAccess,
        Error,
        LifetimeError,
    };
    use crate::Discriminant;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn test_lifetime_error_is_transparent() {
        let err = LifetimeError::new(DiskFull);
        assert_eq!(err.to_string(), "disk full");
        assert!(err.source().is_none());
        assert_eq!(err.downcast_ref::<DiskFull>(), Some(&DiskFull));
        assert_eq!(err.downcast::<DiskFull>().ok(), Some(DiskFull));
    }

    #[test]
    fn test_downcast_mismatch_returns_self() {
        let err = LifetimeError::new("not a disk error");
        let err = err.downcast::<DiskFull>().unwrap_err();
        assert_eq!(err.to_string(), "not a disk error");
    }

    #[test]
    fn test_bad_access_message() {
        let err = BadAccess::new(2, Discriminant::Active(0));
        assert_eq!(
            err.to_string(),
            "bad variant access: requested alternative 2, but the variant is holding alternative 0"
        );

        let err = BadAccess::new(1, Discriminant::Valueless);
        assert_eq!(
            err.to_string(),
            "bad variant access: requested alternative 1, but the variant is valueless"
        );
    }

    #[test]
    fn test_umbrella_error_forwards_display() {
        let err: Error = LifetimeError::new(DiskFull).into();
        assert_eq!(err.to_string(), "disk full");
        assert!(matches!(err, Error::Lifetime(_)));
    }
}
