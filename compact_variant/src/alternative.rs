//! The lifetime capabilities a type needs to be stored in a [`Variant`](crate::Variant).
//!
//! Rust moves are plain memory copies and can never fail, but a [`Variant`](crate::Variant)
//! still routes every hand-off of a value between containers through these hooks, so a type can
//! model a relocation or copy that is able to fail. Whether a hook _may_ fail is declared
//! up front with an associated constant; the assignment engine uses those constants to pick,
//! per alternative and at compile time, how a change of the active alternative is carried out.

use crate::LifetimeError;

/// A type that can be held by a [`Variant`](crate::Variant).
///
/// Every method has an infallible default, so a move-only type opts in with an empty impl:
///
/// ```
/// use compact_variant::{Alternative, Variant};
///
/// struct Handle(u32);
/// impl Alternative for Handle {}
///
/// let v: Variant<(Handle, bool)> = Variant::new(Handle(3));
/// assert_eq!(v.get::<0>().unwrap().0, 3);
/// ```
pub trait Alternative: Sized + 'static {
    /// Whether [`Alternative::try_relocate`] can return an error.
    const MOVE_MAY_FAIL: bool = false;

    /// Called when the value is handed from one container to another.
    ///
    /// On error the value is consumed; the source of a move gives up its value either way.
    #[inline]
    fn try_relocate(self) -> Result<Self, LifetimeError> {
        Ok(self)
    }

    /// Called when the destination already holds this alternative and `source` is moved in.
    ///
    /// On error `self` is left in whatever state the implementation left it in; the container
    /// keeps `self` as its active value.
    #[inline]
    fn try_move_assign(&mut self, source: Self) -> Result<(), LifetimeError> {
        *self = source;
        Ok(())
    }
}

/// An [`Alternative`] that can be copied, possibly fallibly.
///
/// A [`Variant`](crate::Variant) supports copy assignment and [`Clone`] only if every one of its
/// alternatives implements this trait.
pub trait CopyAlternative: Alternative {
    /// Whether [`CopyAlternative::try_copy`] can return an error.
    const COPY_MAY_FAIL: bool = false;

    /// Creates an independent copy of `self`.
    fn try_copy(&self) -> Result<Self, LifetimeError>;

    /// Copies `source` into `self`, which already holds this alternative.
    #[inline]
    fn try_copy_assign(&mut self, source: &Self) -> Result<(), LifetimeError> {
        *self = source.try_copy()?;
        Ok(())
    }
}

crate::alternative!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    Box<str>,
    &'static str,
);

impl<T: Clone + 'static> Alternative for Vec<T> {}

impl<T: Clone + 'static> CopyAlternative for Vec<T> {
    #[inline]
    fn try_copy(&self) -> Result<Self, LifetimeError> {
        Ok(self.clone())
    }

    #[inline]
    fn try_copy_assign(&mut self, source: &Self) -> Result<(), LifetimeError> {
        // reuses our allocation
        self.clone_from(source);
        Ok(())
    }
}

impl<T: Clone + 'static> Alternative for Box<T> {}

impl<T: Clone + 'static> CopyAlternative for Box<T> {
    #[inline]
    fn try_copy(&self) -> Result<Self, LifetimeError> {
        Ok(self.clone())
    }
}

impl<T: Clone + 'static> Alternative for Option<T> {}

impl<T: Clone + 'static> CopyAlternative for Option<T> {
    #[inline]
    fn try_copy(&self) -> Result<Self, LifetimeError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Alternative,
        CopyAlternative,
    };

    #[test]
    fn test_defaults_are_infallible() {
        fn flags<T: CopyAlternative>() -> (bool, bool) {
            (T::MOVE_MAY_FAIL, T::COPY_MAY_FAIL)
        }

        assert_eq!(flags::<u8>(), (false, false));
        assert_eq!(flags::<String>(), (false, false));
        assert_eq!(flags::<Vec<String>>(), (false, false));
        assert_eq!(flags::<Option<Box<u32>>>(), (false, false));
    }

    #[test]
    fn test_vec_copy_assign_reuses_buffer() {
        let mut dest: Vec<u32> = Vec::with_capacity(16);
        dest.push(9);
        let ptr = dest.as_ptr();

        dest.try_copy_assign(&vec![1, 2, 3]).unwrap();
        assert_eq!(dest, [1, 2, 3]);
        assert_eq!(dest.as_ptr(), ptr);
    }

    #[test]
    fn test_default_move_assign_replaces() {
        let mut dest = String::from("old");
        dest.try_move_assign(String::from("new")).unwrap();
        assert_eq!(dest, "new");

        let moved = String::from("relocated").try_relocate().unwrap();
        assert_eq!(moved, "relocated");
    }
}
