#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

use core::any::{
    Any,
    TypeId,
};
use core::mem;

#[macro_use]
mod macros;

mod alternative;
mod assign;
mod asserts;
mod cmp;
mod cross;
mod error;
mod features;
mod repr;
mod set;


pub use alternative::{
    Alternative,
    CopyAlternative,
};
pub use error::{
    BadAccess,
    BadAssignment,
    Error,
    LifetimeError,
};
pub use repr::table::Strategy;
pub use repr::{
    Discriminant,
    MAX_ALTERNATIVES,
    NPOS,
};
pub use set::{
    AlternativeSet,
    CopySet,
    DebugSet,
    EqSet,
    HashableSet,
    Index,
    Member,
    OrdSet,
    PartialEqSet,
    PartialOrdSet,
    Select,
};

use repr::Repr;

/// The alternative stored at index `I` of the set `L`.
pub type Alt<L, const I: usize> = <L as Select<I>>::Output;

/// A [`Variant`] holds exactly one value out of a fixed set of alternative types `L`, written as
/// a tuple: `Variant<(u32, String, bool)>`.
///
/// The value is stored inline, in space sized for the largest alternative, next to a one byte
/// tag naming the active alternative. Changing the active alternative runs through the
/// [`Alternative`] and [`CopyAlternative`] hooks of the types involved, and when one of those
/// hooks fails the variant ends up in a well defined state:
///
/// * assigning onto the _same_ alternative never changes which alternative is active,
/// * copying in a _different_ alternative whose copy can fail, but whose move can't, is
///   [`Staged`](Strategy::Staged) through a temporary and leaves the variant untouched on error,
/// * every other failed change of alternative leaves the variant **valueless**, see
///   [`Variant::is_valueless`].
///
/// ```
/// use compact_variant::Variant;
///
/// let mut v: Variant<(u32, String)> = Variant::new(42_u32);
/// assert_eq!(v.index(), 0);
/// assert_eq!(v.get::<0>(), Ok(&42));
/// assert!(v.get::<1>().is_err());
///
/// v.emplace::<1>(String::from("hello"));
/// assert!(v.holds::<String, _>());
/// assert_eq!(v.get_as::<String, _>().map(String::as_str), Ok("hello"));
/// ```
pub struct Variant<L: AlternativeSet> {
    repr: Repr<L>,
}

impl<L: AlternativeSet> Variant<L> {
    /// Creates a [`Variant`] holding `value`, with the alternative picked by its type.
    ///
    /// If the type appears more than once in the set, use [`Variant::with_index`] instead.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let v: Variant<(u8, f64, &'static str)> = Variant::new("nyc");
    /// assert_eq!(v.index(), 2);
    /// ```
    #[inline]
    pub fn new<T, M>(value: T) -> Self
    where
        L: Member<T, M>,
    {
        // SAFETY: `Member` guarantees `T` is the alternative at `INDEX`
        let repr = unsafe { Repr::from_value(<L as Member<T, M>>::INDEX, value) };
        Variant { repr }
    }

    /// Creates a [`Variant`] holding `value` as the alternative at index `I`.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// // both alternatives are `u32`, so the index has to be spelled out
    /// let v: Variant<(u32, u32)> = Variant::with_index::<1>(7);
    /// assert_eq!(v.index(), 1);
    /// assert!(v.get::<0>().is_err());
    /// ```
    #[inline]
    pub fn with_index<const I: usize>(value: Alt<L, I>) -> Self
    where
        L: Select<I>,
    {
        // SAFETY: `Select` guarantees `Alt<L, I>` is the alternative at `I`
        let repr = unsafe { Repr::from_value(I, value) };
        Variant { repr }
    }

    /// Creates a [`Variant`] holding the alternative at index `I`, built by `f`. Any error from
    /// `f` is returned as-is.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let v = Variant::<(u8, u16)>::try_with::<1, _, _>(|| u16::try_from(300_u32));
    /// assert_eq!(v.unwrap().get::<1>(), Ok(&300));
    ///
    /// let v = Variant::<(u8, u16)>::try_with::<0, _, _>(|| u8::try_from(300_u32));
    /// assert!(v.is_err());
    /// ```
    #[inline]
    pub fn try_with<const I: usize, F, E>(f: F) -> Result<Self, E>
    where
        L: Select<I>,
        F: FnOnce() -> Result<Alt<L, I>, E>,
    {
        let value = f()?;
        Ok(Self::with_index::<I>(value))
    }

    /// Creates a [`Variant`] holding the alternative at index `I`, collected from `iter`.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let v = Variant::<(u8, Vec<u32>)>::from_iter_at::<1, _>([1, 2, 3]);
    /// assert_eq!(v.get::<1>().unwrap(), &[1, 2, 3]);
    /// ```
    #[inline]
    pub fn from_iter_at<const I: usize, It>(iter: It) -> Self
    where
        L: Select<I>,
        It: IntoIterator,
        Alt<L, I>: FromIterator<It::Item>,
    {
        Self::with_index::<I>(iter.into_iter().collect())
    }

    #[inline]
    pub(crate) const fn valueless() -> Self {
        Variant {
            repr: Repr::valueless(),
        }
    }

    /// Returns the index of the active alternative, or [`NPOS`] if the variant is valueless.
    #[inline]
    pub fn index(&self) -> usize {
        self.repr.discriminant().index()
    }

    /// Returns which alternative, if any, is active.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::{Discriminant, Variant};
    ///
    /// let v: Variant<(u8, bool)> = Variant::new(true);
    /// assert_eq!(v.discriminant(), Discriminant::Active(1));
    /// ```
    #[inline]
    pub fn discriminant(&self) -> Discriminant {
        self.repr.discriminant()
    }

    /// Returns `true` if no alternative is live.
    ///
    /// A variant only becomes valueless when changing its active alternative failed part way
    /// through, or after its value was moved out with [`Variant::take`].
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let mut v: Variant<(u8, u16)> = Variant::new(1_u8);
    /// let failed = v.try_emplace_with::<1, _, _>(|| u16::try_from(-1_i32));
    ///
    /// assert!(failed.is_err());
    /// assert!(v.is_valueless());
    /// assert_eq!(v.index(), compact_variant::NPOS);
    /// ```
    #[inline]
    pub fn is_valueless(&self) -> bool {
        self.repr.is_valueless()
    }

    /// Returns `true` if the alternative at `index` is active.
    #[inline]
    pub fn holds_index(&self, index: usize) -> bool {
        self.repr.active() == Some(index)
    }

    /// Returns `true` if the alternative of type `T` is active.
    #[inline]
    pub fn holds<T, M>(&self) -> bool
    where
        L: Member<T, M>,
    {
        self.holds_index(<L as Member<T, M>>::INDEX)
    }

    /// Returns a reference to the alternative at index `I`, or [`BadAccess`] if a different
    /// alternative is active or the variant is valueless.
    #[inline]
    pub fn get<const I: usize>(&self) -> Result<&Alt<L, I>, BadAccess>
    where
        L: Select<I>,
    {
        self.get_if::<I>()
            .ok_or_else(|| BadAccess::new(I, self.discriminant()))
    }

    /// Mutable version of [`Variant::get`].
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> Result<&mut Alt<L, I>, BadAccess>
    where
        L: Select<I>,
    {
        let found = self.discriminant();
        self.get_if_mut::<I>().ok_or(BadAccess::new(I, found))
    }

    /// Returns a reference to the alternative at index `I`, or `None` if it isn't active.
    #[inline]
    pub fn get_if<const I: usize>(&self) -> Option<&Alt<L, I>>
    where
        L: Select<I>,
    {
        if self.holds_index(I) {
            // SAFETY: we just checked `I` is live
            Some(unsafe { self.repr.get_unchecked() })
        } else {
            None
        }
    }

    /// Mutable version of [`Variant::get_if`].
    #[inline]
    pub fn get_if_mut<const I: usize>(&mut self) -> Option<&mut Alt<L, I>>
    where
        L: Select<I>,
    {
        if self.holds_index(I) {
            // SAFETY: we just checked `I` is live
            Some(unsafe { self.repr.get_unchecked_mut() })
        } else {
            None
        }
    }

    /// Returns a reference to the alternative of type `T`, or [`BadAccess`] if it isn't active.
    #[inline]
    pub fn get_as<T, M>(&self) -> Result<&T, BadAccess>
    where
        L: Member<T, M>,
    {
        self.get_if_as::<T, M>()
            .ok_or_else(|| BadAccess::new(<L as Member<T, M>>::INDEX, self.discriminant()))
    }

    /// Mutable version of [`Variant::get_as`].
    #[inline]
    pub fn get_as_mut<T, M>(&mut self) -> Result<&mut T, BadAccess>
    where
        L: Member<T, M>,
    {
        let found = self.discriminant();
        self.get_if_as_mut::<T, M>()
            .ok_or(BadAccess::new(<L as Member<T, M>>::INDEX, found))
    }

    /// Returns a reference to the alternative of type `T`, or `None` if it isn't active.
    #[inline]
    pub fn get_if_as<T, M>(&self) -> Option<&T>
    where
        L: Member<T, M>,
    {
        if self.holds::<T, M>() {
            // SAFETY: `Member` guarantees `T` is the alternative at `INDEX`, which is live
            Some(unsafe { self.repr.get_unchecked() })
        } else {
            None
        }
    }

    /// Mutable version of [`Variant::get_if_as`].
    #[inline]
    pub fn get_if_as_mut<T, M>(&mut self) -> Option<&mut T>
    where
        L: Member<T, M>,
    {
        if self.holds::<T, M>() {
            // SAFETY: `Member` guarantees `T` is the alternative at `INDEX`, which is live
            Some(unsafe { self.repr.get_unchecked_mut() })
        } else {
            None
        }
    }

    /// Moves the alternative at index `I` out of the variant, or hands the variant back if a
    /// different alternative is active.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let v: Variant<(u8, String)> = Variant::new(String::from("sf"));
    /// let v = v.into_inner::<0>().unwrap_err();
    /// assert_eq!(v.into_inner::<1>().ok(), Some(String::from("sf")));
    /// ```
    #[inline]
    pub fn into_inner<const I: usize>(mut self) -> Result<Alt<L, I>, Self>
    where
        L: Select<I>,
    {
        if self.holds_index(I) {
            // SAFETY: we just checked `I` is live
            Ok(unsafe { self.repr.read() })
        } else {
            Err(self)
        }
    }

    /// Returns the [`TypeId`] of the active alternative.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        let index = self.repr.active()?;
        Some((L::TABLE[index].type_id)())
    }

    /// Returns the name of the active alternative's type, as [`core::any::type_name`] reports
    /// it.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        let index = self.repr.active()?;
        Some((L::TABLE[index].type_name)())
    }

    /// Returns the active alternative as [`Any`].
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let v: Variant<(u8, String)> = Variant::new(9_u8);
    /// let any = v.as_any().unwrap();
    /// assert_eq!(any.downcast_ref::<u8>(), Some(&9));
    /// ```
    #[inline]
    pub fn as_any(&self) -> Option<&dyn Any> {
        let index = self.repr.active()?;
        // SAFETY: the alternative at `index` is live and borrowed for as long as `self` is
        Some(unsafe { &*(L::TABLE[index].as_any)(self.repr.slot()) })
    }

    /// Mutable version of [`Variant::as_any`].
    #[inline]
    pub fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        let index = self.repr.active()?;
        // SAFETY: the alternative at `index` is live and borrowed for as long as `self` is
        Some(unsafe { &mut *(L::TABLE[index].as_any_mut)(self.repr.slot_mut()) })
    }

    /// Destroys the current value, if any, and stores `value` as the alternative at index `I`.
    /// Returns a reference to the new value.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let mut v: Variant<(u8, Vec<u8>)> = Variant::new(1_u8);
    /// v.emplace::<1>(Vec::new()).push(42);
    /// assert_eq!(v.get::<1>().unwrap(), &[42]);
    /// ```
    #[inline]
    pub fn emplace<const I: usize>(&mut self, value: Alt<L, I>) -> &mut Alt<L, I>
    where
        L: Select<I>,
    {
        self.repr.reset();
        // SAFETY: we're valueless after the reset, and `Select` guarantees the type
        unsafe { self.repr.write(I, value) }
    }

    /// Same as [`Variant::emplace`], with the alternative picked by its type.
    #[inline]
    pub fn emplace_as<T, M>(&mut self, value: T) -> &mut T
    where
        L: Member<T, M>,
    {
        self.repr.reset();
        // SAFETY: we're valueless after the reset, and `Member` guarantees the type
        unsafe { self.repr.write(<L as Member<T, M>>::INDEX, value) }
    }

    /// Destroys the current value, if any, then stores the alternative at index `I` built by `f`.
    ///
    /// The old value is always discarded first, so if `f` returns an error the variant is left
    /// valueless and the error is returned as-is.
    #[inline]
    pub fn try_emplace_with<const I: usize, F, E>(&mut self, f: F) -> Result<&mut Alt<L, I>, E>
    where
        L: Select<I>,
        F: FnOnce() -> Result<Alt<L, I>, E>,
    {
        self.repr.reset();
        let value = match f() {
            Ok(value) => value,
            Err(err) => {
                debug_event!(index = I, "emplacement failed, variant is now valueless");
                return Err(err);
            }
        };
        // SAFETY: we're valueless after the reset, and `Select` guarantees the type
        Ok(unsafe { self.repr.write(I, value) })
    }

    /// Moves the value out of `self`, leaving it valueless.
    ///
    /// # Examples
    /// ```
    /// use compact_variant::Variant;
    ///
    /// let mut v: Variant<(u8, String)> = Variant::new(String::from("chicago"));
    /// let taken = v.take();
    ///
    /// assert!(v.is_valueless());
    /// assert_eq!(taken.get::<1>().unwrap(), "chicago");
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        Variant {
            repr: self.repr.take(),
        }
    }

    /// Exchanges the contents of two variants, including their active index. Either side may be
    /// valueless.
    ///
    /// Values are exchanged by their bytes; no [`Alternative`] hook is invoked.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.repr, &mut other.repr)
    }
}

impl<L> Default for Variant<L>
where
    L: Select<0>,
    Alt<L, 0>: Default,
{
    /// Creates a [`Variant`] holding the default value of its first alternative.
    #[inline]
    fn default() -> Self {
        Self::with_index::<0>(Default::default())
    }
}
