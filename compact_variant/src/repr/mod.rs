use core::mem::{
    self,
    MaybeUninit,
};
use core::ptr;

pub(crate) mod discriminant;
pub(crate) mod slots;
pub(crate) mod table;

pub use discriminant::{
    Discriminant,
    MAX_ALTERNATIVES,
    NPOS,
};
use discriminant::NPOS_TAG;

use crate::{
    AlternativeSet,
    CopySet,
    LifetimeError,
};

/// Uninitialized storage for one alternative of `L`, plus the one byte tag saying which (if any)
/// is live.
///
/// # Invariants
/// * `tag == NPOS_TAG`: no alternative is live, `storage` holds nothing that needs dropping.
/// * `tag < L::COUNT`: exactly the alternative at index `tag` is live at the start of `storage`.
///
/// Every method that may run code belonging to an alternative clears the tag _before_ any
/// destructive step, so an error or a panic coming out of that code can only ever leave the
/// `Repr` valueless, never claiming a dead value is live.
pub(crate) struct Repr<L: AlternativeSet> {
    storage: MaybeUninit<L::Storage>,
    tag: u8,
}

impl<L: AlternativeSet> Repr<L> {
    #[inline]
    pub const fn valueless() -> Self {
        Repr {
            storage: MaybeUninit::uninit(),
            tag: NPOS_TAG,
        }
    }

    /// # Safety
    /// `T` must be the alternative at `index`
    #[inline]
    pub unsafe fn from_value<T>(index: usize, value: T) -> Self {
        let mut repr = Self::valueless();
        // SAFETY: we just created a valueless repr, and our caller upholds the type requirement
        unsafe { repr.write(index, value) };
        repr
    }

    #[inline(always)]
    pub fn discriminant(&self) -> Discriminant {
        Discriminant::from_tag(self.tag)
    }

    #[inline(always)]
    pub fn is_valueless(&self) -> bool {
        self.tag == NPOS_TAG
    }

    /// Returns the index of the live alternative
    #[inline(always)]
    pub fn active(&self) -> Option<usize> {
        if self.is_valueless() {
            None
        } else {
            Some(self.tag as usize)
        }
    }

    #[inline(always)]
    pub fn slot(&self) -> *const u8 {
        self.storage.as_ptr().cast()
    }

    #[inline(always)]
    pub fn slot_mut(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr().cast()
    }

    /// Moves `value` into the slot and marks `index` live.
    ///
    /// # Safety
    /// * `self` must be valueless
    /// * `T` must be the alternative at `index`
    #[inline]
    pub unsafe fn write<T>(&mut self, index: usize, value: T) -> &mut T {
        debug_assert!(self.is_valueless());
        debug_assert!(index < L::COUNT);

        let slot = self.slot_mut().cast::<T>();
        // SAFETY: `storage` is sized and aligned for every alternative and currently holds
        // nothing, so it's valid for a write of `T`
        unsafe { ptr::write(slot, value) };
        self.tag = index as u8;

        // SAFETY: we just initialized `slot`
        unsafe { &mut *slot }
    }

    /// # Safety
    /// `T` must be the live alternative
    #[inline(always)]
    pub unsafe fn get_unchecked<T>(&self) -> &T {
        debug_assert!(!self.is_valueless());
        unsafe { &*self.slot().cast::<T>() }
    }

    /// # Safety
    /// `T` must be the live alternative
    #[inline(always)]
    pub unsafe fn get_unchecked_mut<T>(&mut self) -> &mut T {
        debug_assert!(!self.is_valueless());
        unsafe { &mut *self.slot_mut().cast::<T>() }
    }

    /// Destroys the live value, if any, leaving `self` valueless.
    #[inline]
    pub fn reset(&mut self) {
        if let Some(index) = self.disown() {
            if L::TRIVIAL_DROP {
                return;
            }
            if let Some(drop) = L::TABLE[index].drop {
                // SAFETY: the alternative at `index` was live until we cleared the tag, and
                // nothing else will touch it again
                unsafe { drop(self.slot_mut()) };
            }
        }
    }

    /// Clears the tag _without_ destroying the value, returning the index that was live. The
    /// caller takes over the value left in the slot.
    #[inline]
    pub fn disown(&mut self) -> Option<usize> {
        let index = self.active();
        self.tag = NPOS_TAG;
        index
    }

    /// Takes the contents of `self`, leaving it valueless.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::valueless())
    }

    /// Reads out the live value, leaving `self` valueless.
    ///
    /// # Safety
    /// `T` must be the live alternative
    #[inline]
    pub unsafe fn read<T>(&mut self) -> T {
        debug_assert!(!self.is_valueless());
        self.tag = NPOS_TAG;
        // SAFETY: `T` was live and we just gave up ownership of it
        unsafe { ptr::read(self.slot().cast::<T>()) }
    }

    /// Relocates the alternative at `index` out of `src` into our slot.
    ///
    /// `src` gives up its value no matter the outcome. On error `self` stays valueless.
    ///
    /// # Safety
    /// * `self` must be valueless
    /// * `src` must point at a live alternative `index` that the caller no longer considers live
    #[inline]
    pub unsafe fn relocate_from(&mut self, index: usize, src: *mut u8) -> Result<(), LifetimeError> {
        debug_assert!(self.is_valueless());
        // SAFETY: upheld by our caller
        unsafe { (L::TABLE[index].relocate)(src, self.slot_mut())? };
        self.tag = index as u8;
        Ok(())
    }

    /// Move-assigns the live alternative out of `src` onto our live alternative of the same index.
    ///
    /// # Safety
    /// * `self` must hold alternative `index`
    /// * `src` must point at a live alternative `index` that the caller no longer considers live
    #[inline]
    pub unsafe fn move_assign_from(&mut self, index: usize, src: *mut u8) -> Result<(), LifetimeError> {
        debug_assert_eq!(self.active(), Some(index));
        // SAFETY: upheld by our caller
        unsafe { (L::TABLE[index].move_assign)(self.slot_mut(), src) }
    }
}

impl<L: CopySet> Repr<L> {
    /// Copies the alternative at `index` from `src` into our slot. On error `self` stays
    /// valueless.
    ///
    /// # Safety
    /// * `self` must be valueless
    /// * `src` must point at a live alternative `index`
    #[inline]
    pub unsafe fn copy_from(&mut self, index: usize, src: *const u8) -> Result<(), LifetimeError> {
        debug_assert!(self.is_valueless());
        // SAFETY: upheld by our caller
        unsafe { (L::COPY_TABLE[index].copy)(src, self.slot_mut())? };
        self.tag = index as u8;
        Ok(())
    }

    /// Copy-assigns onto our live alternative of the same index.
    ///
    /// # Safety
    /// * `self` must hold alternative `index`
    /// * `src` must point at a live alternative `index`, distinct from ours
    #[inline]
    pub unsafe fn copy_assign_from(&mut self, index: usize, src: *const u8) -> Result<(), LifetimeError> {
        debug_assert_eq!(self.active(), Some(index));
        // SAFETY: upheld by our caller
        unsafe { (L::COPY_TABLE[index].copy_assign)(self.slot_mut(), src) }
    }

    /// Builds a new `Repr` holding a copy of the alternative at `index` in `src`.
    ///
    /// # Safety
    /// `src` must point at a live alternative `index`
    #[inline]
    pub unsafe fn copy_of(index: usize, src: *const u8) -> Result<Self, LifetimeError> {
        let mut repr = Self::valueless();
        // SAFETY: upheld by our caller
        unsafe { repr.copy_from(index, src)? };
        Ok(repr)
    }
}

impl<L: AlternativeSet> Drop for Repr<L> {
    #[inline]
    fn drop(&mut self) {
        self.reset()
    }
}
