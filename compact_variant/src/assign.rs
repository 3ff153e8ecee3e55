//! The assignment engine: every operation that replaces the value of an existing [`Variant`] with
//! the value of another one.
//!
//! All paths share one case analysis on the active index of each side:
//!
//! * the source is valueless: the destination becomes valueless.
//! * both hold the same alternative: that alternative's own assignment runs in place, and the
//!   active index never changes, even if the assignment fails.
//! * the alternatives differ: the destination's value is destroyed and the new one constructed
//!   in its place, either [directly](Strategy::Direct) or [staged](Strategy::Staged) through a
//!   temporary, as picked per alternative by [`Strategy::for_copy`].

use crate::repr::Repr;
use crate::{
    AlternativeSet,
    CopyAlternative,
    CopySet,
    LifetimeError,
    Member,
    Select,
    Strategy,
    Variant,
};

impl<L: AlternativeSet> Variant<L> {
    /// Moves the value of `source` into `self`.
    ///
    /// * If both hold the same alternative, its [`Alternative::try_move_assign`] runs and `self`
    ///   keeps that alternative active whatever the outcome.
    /// * Otherwise the current value of `self` is destroyed and the source value relocated in with
    ///   [`Alternative::try_relocate`]. If that fails, `self` is left valueless.
    ///
    /// `source` is consumed either way.
    ///
    /// [`Alternative::try_move_assign`]: crate::Alternative::try_move_assign
    /// [`Alternative::try_relocate`]: crate::Alternative::try_relocate
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let mut v: Variant<(u8, String)> = Variant::new(3_u8);
    /// v.try_move_assign(Variant::new(String::from("nyc"))).unwrap();
    /// assert_eq!(v.get::<1>().unwrap(), "nyc");
    /// ```
    pub fn try_move_assign(&mut self, mut source: Self) -> Result<(), LifetimeError> {
        // from here on `source` only holds bytes; we own the value it used to hold
        let index = match source.repr.disown() {
            Some(index) => index,
            None => {
                self.repr.reset();
                return Ok(());
            }
        };
        let src = source.repr.slot_mut();

        if self.repr.active() == Some(index) {
            // SAFETY: both sides hold alternative `index`, and `source` gave up its value
            return unsafe { self.repr.move_assign_from(index, src) };
        }

        trace_event!(
            from = %self.repr.discriminant(),
            to = index,
            "moving in a different alternative"
        );
        self.repr.reset();
        // SAFETY: we're valueless after the reset, and `source` gave up its value
        let result = unsafe { self.repr.relocate_from(index, src) };
        if result.is_err() {
            debug_event!(index, "relocation failed, variant is now valueless");
        }
        result
    }

    /// Assigns `value` as the alternative of type `T`.
    ///
    /// Follows the same rules as [`Variant::try_move_assign`] with a source holding `value`.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let mut v: Variant<(u8, String)> = Variant::new(3_u8);
    /// v.try_set(String::from("sf")).unwrap();
    /// assert_eq!(v.index(), 1);
    /// ```
    #[inline]
    pub fn try_set<T, M>(&mut self, value: T) -> Result<(), LifetimeError>
    where
        L: Member<T, M>,
    {
        self.try_move_assign(Variant::new(value))
    }

    /// Moves `slots[src]` into `slots[dst]`, leaving `slots[src]` valueless. Does nothing when
    /// `src == dst`.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn move_within(slots: &mut [Self], src: usize, dst: usize) -> Result<(), LifetimeError> {
        check_bounds(slots.len(), src, dst);
        if src == dst {
            return Ok(());
        }
        let source = slots[src].take();
        slots[dst].try_move_assign(source)
    }
}

impl<L: CopySet> Variant<L> {
    /// Creates an independent copy of `self` with [`CopyAlternative::try_copy`].
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let v: Variant<(u8, String)> = Variant::new(String::from("sea"));
    /// let copy = v.try_clone().unwrap();
    /// assert_eq!(copy, v);
    /// ```
    pub fn try_clone(&self) -> Result<Self, LifetimeError> {
        match self.repr.active() {
            None => Ok(Variant::valueless()),
            // SAFETY: the alternative at `index` is live
            Some(index) => unsafe { Repr::copy_of(index, self.repr.slot()) }.map(|repr| Variant { repr }),
        }
    }

    /// Copies the value of `source` into `self`.
    ///
    /// * If `source` is valueless, `self` becomes valueless.
    /// * If both hold the same alternative, its [`CopyAlternative::try_copy_assign`] runs in place;
    ///   the active index never changes, even if the copy fails.
    /// * Otherwise the alternative's [`Strategy`] decides. A [`Direct`](Strategy::Direct) copy that
    ///   fails leaves `self` valueless, a [`Staged`](Strategy::Staged) copy that fails leaves
    ///   `self` untouched.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let mut v: Variant<(u8, String)> = Variant::new(3_u8);
    /// let source: Variant<(u8, String)> = Variant::new(String::from("houston"));
    ///
    /// v.try_assign(&source).unwrap();
    /// assert_eq!(v, source);
    /// ```
    pub fn try_assign(&mut self, source: &Self) -> Result<(), LifetimeError> {
        match source.repr.active() {
            None => {
                self.repr.reset();
                Ok(())
            }
            // SAFETY: the alternative at `index` is live in `source`, which we can't alias
            Some(index) => unsafe { self.assign_copy(index, source.repr.slot()) },
        }
    }

    /// Copies `value` in as the alternative of type `T`, following the same rules as
    /// [`Variant::try_assign`].
    #[inline]
    pub fn try_set_from<T, M>(&mut self, value: &T) -> Result<(), LifetimeError>
    where
        L: Member<T, M>,
        T: CopyAlternative,
    {
        let src = (value as *const T).cast::<u8>();
        // SAFETY: `Member` guarantees `T` is the alternative at `INDEX`, and `value` can't alias
        // our storage while we hold `&mut self`
        unsafe { self.assign_copy(<L as Member<T, M>>::INDEX, src) }
    }

    /// Copies `slots[src]` into `slots[dst]`. Does nothing when `src == dst`.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn assign_within(slots: &mut [Self], src: usize, dst: usize) -> Result<(), LifetimeError> {
        check_bounds(slots.len(), src, dst);
        if src == dst {
            return Ok(());
        }

        let (source, dest) = if src < dst {
            let (head, tail) = slots.split_at_mut(dst);
            (&head[src], &mut tail[0])
        } else {
            let (head, tail) = slots.split_at_mut(src);
            (&tail[0], &mut head[dst])
        };
        dest.try_assign(source)
    }

    /// The [`Strategy`] used when copying in the alternative at index `I` over a different one.
    #[inline]
    pub fn copy_strategy<const I: usize>() -> Strategy
    where
        L: Select<I>,
    {
        L::COPY_TABLE[I].strategy
    }

    /// Copies the alternative `index` found at `src` into `self`.
    ///
    /// # Safety
    /// `src` must point at a live alternative `index` of `L` that doesn't live inside `self`.
    pub(crate) unsafe fn assign_copy(&mut self, index: usize, src: *const u8) -> Result<(), LifetimeError> {
        if self.repr.active() == Some(index) {
            // SAFETY: both sides hold alternative `index`, upheld by our caller
            return unsafe { self.repr.copy_assign_from(index, src) };
        }

        let strategy = L::COPY_TABLE[index].strategy;
        trace_event!(
            from = %self.repr.discriminant(),
            to = index,
            ?strategy,
            "copying in a different alternative"
        );

        match strategy {
            Strategy::Direct => {
                self.repr.reset();
                // SAFETY: we're valueless after the reset, `src` is upheld by our caller
                let result = unsafe { self.repr.copy_from(index, src) };
                if result.is_err() {
                    debug_event!(index, "copy failed, variant is now valueless");
                }
                result
            }
            Strategy::Staged => {
                // a failure here leaves `self` untouched
                //
                // SAFETY: upheld by our caller
                let staged = unsafe { Repr::copy_of(index, src)? };
                self.try_move_assign(Variant { repr: staged })
            }
        }
    }
}

impl<L: CopySet> Clone for Variant<L> {
    /// # Panics
    /// If copying the active alternative fails. Use [`Variant::try_clone`] to handle the error.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("failed to clone alternative {}: {err}", self.index()),
        }
    }

    /// # Panics
    /// If copying the active alternative fails. Use [`Variant::try_assign`] to handle the error.
    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_assign(source) {
            panic!("failed to clone alternative {}: {err}", source.index());
        }
    }
}

#[inline]
fn check_bounds(len: usize, src: usize, dst: usize) {
    assert!(
        src < len && dst < len,
        "index out of bounds: the len is {len} but the indices are {src} and {dst}"
    );
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::tests::{
        Fragile,
        Volatile,
    };
    use crate::{
        Strategy,
        Variant,
    };

    type Set = (u32, String, Fragile, Volatile);

    #[test]
    fn test_copy_strategies() {
        assert_eq!(Variant::<Set>::copy_strategy::<0>(), Strategy::Direct);
        assert_eq!(Variant::<Set>::copy_strategy::<1>(), Strategy::Direct);
        assert_eq!(Variant::<Set>::copy_strategy::<2>(), Strategy::Staged);
        assert_eq!(Variant::<Set>::copy_strategy::<3>(), Strategy::Direct);
    }

    #[test]
    fn test_same_alternative_copy_assign() {
        let mut v: Variant<Set> = Variant::new(String::from("old"));
        v.try_assign(&Variant::new(String::from("new"))).unwrap();
        assert_eq!(v.get::<1>().unwrap(), "new");
    }

    #[test]
    fn test_same_alternative_failure_keeps_index() {
        let mut v: Variant<Set> = Variant::new(Fragile::new(1));
        let err = v.try_assign(&Variant::new(Fragile::poisoned(2))).unwrap_err();

        assert!(err.to_string().contains("fragile"));
        assert_eq!(v.index(), 2);
        assert_eq!(v.get::<2>().unwrap(), &Fragile::new(1));
    }

    #[test]
    fn test_staged_failure_leaves_untouched() {
        let mut v: Variant<Set> = Variant::new(String::from("keep me"));
        assert!(v.try_assign(&Variant::new(Fragile::poisoned(3))).is_err());

        assert_eq!(v.index(), 1);
        assert_eq!(v.get::<1>().unwrap(), "keep me");
    }

    #[test]
    fn test_direct_failure_leaves_valueless() {
        let mut v: Variant<Set> = Variant::new(String::from("gone"));
        assert!(v.try_assign(&Variant::new(Volatile::poisoned(3))).is_err());
        assert!(v.is_valueless());
    }

    #[test]
    fn test_move_assign_relocation_failure_leaves_valueless() {
        let mut v: Variant<Set> = Variant::new(7_u32);
        assert!(v.try_move_assign(Variant::new(Volatile::poisoned(1))).is_err());
        assert!(v.is_valueless());
    }

    #[test]
    fn test_move_assign_same_alternative_failure_keeps_index() {
        let mut v: Variant<Set> = Variant::new(Volatile::new(1));
        assert!(v.try_move_assign(Variant::new(Volatile::poisoned(2))).is_err());
        assert_eq!(v.index(), 3);
        assert_eq!(v.get::<3>().unwrap(), &Volatile::new(1));
    }

    #[test]
    fn test_valueless_source_makes_valueless() {
        let mut v: Variant<Set> = Variant::new(7_u32);
        let mut empty: Variant<Set> = Variant::new(1_u32);
        drop(empty.take());

        v.try_assign(&empty).unwrap();
        assert!(v.is_valueless());

        // assigning valueless onto valueless is a no-op
        v.try_move_assign(empty).unwrap();
        assert!(v.is_valueless());
    }

    #[test]
    fn test_assign_into_valueless() {
        let mut v: Variant<Set> = Variant::new(7_u32);
        drop(v.take());

        v.try_assign(&Variant::new(Fragile::new(5))).unwrap();
        assert_eq!(v.get::<2>().unwrap(), &Fragile::new(5));
    }

    #[test]
    fn test_set_from_stages_copy() {
        let mut v: Variant<Set> = Variant::new(11_u32);
        assert!(v.try_set_from(&Fragile::poisoned(1)).is_err());
        assert_eq!(v.get::<0>(), Ok(&11));

        v.try_set_from(&Fragile::new(1)).unwrap();
        assert_eq!(v.get::<2>().unwrap(), &Fragile::new(1));
    }

    #[test_case(0, 0; "self assignment")]
    #[test_case(0, 2; "forward")]
    #[test_case(2, 0; "backward")]
    fn test_assign_within(src: usize, dst: usize) {
        let mut slots: Vec<Variant<Set>> = vec![
            Variant::new(String::from("a")),
            Variant::new(1_u32),
            Variant::new(Fragile::new(2)),
        ];
        let expected = slots[src].clone();

        Variant::assign_within(&mut slots, src, dst).unwrap();
        assert_eq!(slots[dst], expected);
        assert_eq!(slots[src], expected);
    }

    #[test]
    fn test_move_within() {
        let mut slots: Vec<Variant<Set>> = vec![Variant::new(String::from("a")), Variant::new(1_u32)];

        Variant::move_within(&mut slots, 0, 0).unwrap();
        assert_eq!(slots[0].get::<1>().unwrap(), "a");

        Variant::move_within(&mut slots, 0, 1).unwrap();
        assert!(slots[0].is_valueless());
        assert_eq!(slots[1].get::<1>().unwrap(), "a");
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_assign_within_out_of_bounds() {
        let mut slots: Vec<Variant<Set>> = vec![Variant::new(1_u32)];
        let _ = Variant::assign_within(&mut slots, 0, 1);
    }

    #[test]
    #[should_panic(expected = "failed to clone alternative 2")]
    fn test_clone_panics_on_failure() {
        let v: Variant<Set> = Variant::new(Fragile::poisoned(0));
        let _ = v.clone();
    }
}
