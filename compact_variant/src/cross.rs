//! Assignment between variants over different sets of alternatives.

use core::any::TypeId;

use crate::{
    AlternativeSet,
    BadAssignment,
    CopySet,
    Error,
    Variant,
};

impl<L: CopySet> Variant<L> {
    /// Copies the value of `source`, a variant over another set `M`, into `self`.
    ///
    /// The concrete type `source` holds becomes the first alternative of that type in `L`, and the
    /// copy then follows the same rules as [`Variant::try_assign`]. When `M` is `L` itself the
    /// source's own index is kept, so a type listed twice lands where it came from. A valueless
    /// `source` makes `self` valueless.
    ///
    /// # Errors
    /// * [`Error::BadAssignment`] when `L` has no alternative of the type `source` holds; `self`
    ///   is left as it was.
    /// * [`Error::Lifetime`] when the copy itself fails.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::{Error, Variant};
    ///
    /// let mut v: Variant<(i32, bool)> = Variant::new(true);
    ///
    /// v.try_assign_across(&Variant::<(f64, i32)>::new(7_i32)).unwrap();
    /// assert_eq!(v.get::<0>(), Ok(&7));
    ///
    /// let err = v.try_assign_across(&Variant::<(f64,)>::new(7.9_f64)).unwrap_err();
    /// assert!(matches!(err, Error::BadAssignment(_)));
    /// assert_eq!(v.get::<0>(), Ok(&7));
    /// ```
    pub fn try_assign_across<M: AlternativeSet>(&mut self, source: &Variant<M>) -> Result<(), Error> {
        let src_index = match source.repr.active() {
            Some(index) => index,
            None => {
                self.repr.reset();
                return Ok(());
            }
        };

        let entry = &M::TABLE[src_index];
        let position = if TypeId::of::<L>() == TypeId::of::<M>() {
            Some(src_index)
        } else {
            L::position_of((entry.type_id)())
        };
        let index = match position {
            Some(index) => index,
            None => {
                let type_name = (entry.type_name)();
                debug_event!(type_name, "rejected assignment of a foreign alternative");
                return Err(BadAssignment::new(type_name).into());
            }
        };

        // SAFETY: the alternative at `index` in `L` has the same concrete type as the live value in
        // `source`, which we can't alias while holding `&mut self`
        unsafe { self.assign_copy(index, source.repr.slot()) }.map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::Fragile;
    use crate::{
        Error,
        Variant,
    };

    #[test]
    fn test_assign_across_picks_first_match() {
        let mut v: Variant<(u8, String, u8)> = Variant::new(String::from("x"));
        v.try_assign_across(&Variant::<(u8,)>::new(9_u8)).unwrap();

        assert_eq!(v.index(), 0);
        assert_eq!(v.get::<0>(), Ok(&9));
    }

    #[test]
    fn test_assign_across_same_set_keeps_index() {
        let mut v: Variant<(u8, u8)> = Variant::with_index::<0>(1);
        let source: Variant<(u8, u8)> = Variant::with_index::<1>(2);

        v.try_assign_across(&source).unwrap();
        assert_eq!(v.index(), 1);
        assert_eq!(v.get::<1>(), Ok(&2));
        assert_eq!(v, source);
    }

    #[test]
    fn test_assign_across_valueless() {
        let mut source: Variant<(String,)> = Variant::new(String::from("x"));
        drop(source.take());

        let mut v: Variant<(u32, String)> = Variant::new(1_u32);
        v.try_assign_across(&source).unwrap();
        assert!(v.is_valueless());
    }

    #[test]
    fn test_assign_across_rejected() {
        let mut v: Variant<(u32, String)> = Variant::new(String::from("stay"));
        let err = v.try_assign_across(&Variant::<(bool,)>::new(true)).unwrap_err();

        match err {
            Error::BadAssignment(err) => assert_eq!(err.type_name(), "bool"),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(v.get::<1>().unwrap(), "stay");
    }

    #[test]
    fn test_assign_across_lifetime_error() {
        let mut v: Variant<(u32, Fragile)> = Variant::new(3_u32);
        let err = v
            .try_assign_across(&Variant::<(Fragile, bool)>::new(Fragile::poisoned(0)))
            .unwrap_err();

        assert!(matches!(err, Error::Lifetime(_)));
        // Fragile copies are staged, so we're untouched
        assert_eq!(v.get::<0>(), Ok(&3));
    }
}
