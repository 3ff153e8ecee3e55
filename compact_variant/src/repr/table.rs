//! Per-alternative dispatch tables.
//!
//! Each entry bundles the lifetime primitives of one alternative behind type-erased pointers to
//! its slot. The tables are associated constants of an [`AlternativeSet`](crate::AlternativeSet),
//! built once at compile time and indexed at runtime by the active tag.

use core::any::{
    Any,
    TypeId,
};
use core::cmp::Ordering;
use core::hash::{
    Hash,
    Hasher,
};
use core::{
    fmt,
    mem,
    ptr,
};

use crate::{
    Alternative,
    CopyAlternative,
    LifetimeError,
};

/// How the active alternative is changed when copying a value in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Destroy the current value, then copy straight into the slot. A failed copy leaves the
    /// variant valueless.
    Direct,
    /// Copy into a temporary variant first, then move the temporary in. A failed copy leaves the
    /// variant untouched.
    Staged,
}

impl Strategy {
    /// Staging only helps when the copy can fail and the move that follows it cannot.
    #[inline]
    pub const fn for_copy<T: CopyAlternative>() -> Self {
        if T::COPY_MAY_FAIL && !T::MOVE_MAY_FAIL {
            Strategy::Staged
        } else {
            Strategy::Direct
        }
    }
}

pub type DropFn = unsafe fn(*mut u8);
pub type RelocateFn = unsafe fn(*mut u8, *mut u8) -> Result<(), LifetimeError>;
pub type MoveAssignFn = unsafe fn(*mut u8, *mut u8) -> Result<(), LifetimeError>;
pub type CopyFn = unsafe fn(*const u8, *mut u8) -> Result<(), LifetimeError>;
pub type CopyAssignFn = unsafe fn(*mut u8, *const u8) -> Result<(), LifetimeError>;
pub type AnyFn = unsafe fn(*const u8) -> *const dyn Any;
pub type AnyMutFn = unsafe fn(*mut u8) -> *mut dyn Any;
pub type EqFn = unsafe fn(*const u8, *const u8) -> bool;
pub type PartialCmpFn = unsafe fn(*const u8, *const u8) -> Option<Ordering>;
pub type CmpFn = unsafe fn(*const u8, *const u8) -> Ordering;
pub type HashFn = unsafe fn(*const u8, &mut dyn Hasher);
pub type DebugFn = unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result;

/// Primitives every alternative provides.
#[doc(hidden)]
pub struct Lifetime {
    pub(crate) type_id: fn() -> TypeId,
    pub(crate) type_name: fn() -> &'static str,
    /// `None` when the alternative has no drop glue
    pub(crate) drop: Option<DropFn>,
    pub(crate) relocate: RelocateFn,
    pub(crate) move_assign: MoveAssignFn,
    pub(crate) as_any: AnyFn,
    pub(crate) as_any_mut: AnyMutFn,
}

impl Lifetime {
    pub(crate) const fn of<T: Alternative>() -> Self {
        Lifetime {
            type_id: TypeId::of::<T>,
            type_name: core::any::type_name::<T>,
            drop: if mem::needs_drop::<T>() {
                Some(drop_slot::<T> as DropFn)
            } else {
                None
            },
            relocate: relocate_slot::<T>,
            move_assign: move_assign_slot::<T>,
            as_any: any_slot::<T>,
            as_any_mut: any_slot_mut::<T>,
        }
    }
}

/// Primitives of alternatives that can be copied.
#[doc(hidden)]
pub struct CopyLifetime {
    pub(crate) copy: CopyFn,
    pub(crate) copy_assign: CopyAssignFn,
    pub(crate) strategy: Strategy,
}

impl CopyLifetime {
    pub(crate) const fn of<T: CopyAlternative>() -> Self {
        CopyLifetime {
            copy: copy_slot::<T>,
            copy_assign: copy_assign_slot::<T>,
            strategy: Strategy::for_copy::<T>(),
        }
    }
}

// All of the functions below require that their pointers point at live (or, for destinations
// of a construction, writable and uninitialized) values of type `T`.

unsafe fn drop_slot<T>(slot: *mut u8) {
    // SAFETY: caller guarantees `slot` holds a live `T`
    unsafe { ptr::drop_in_place(slot.cast::<T>()) }
}

unsafe fn relocate_slot<T: Alternative>(src: *mut u8, dst: *mut u8) -> Result<(), LifetimeError> {
    // SAFETY: caller guarantees `src` holds a live `T` that it no longer considers live
    let value = unsafe { ptr::read(src.cast::<T>()) };
    let value = value.try_relocate()?;
    // SAFETY: caller guarantees `dst` is writable storage for a `T`
    unsafe { ptr::write(dst.cast::<T>(), value) };
    Ok(())
}

unsafe fn move_assign_slot<T: Alternative>(
    dst: *mut u8,
    src: *mut u8,
) -> Result<(), LifetimeError> {
    // SAFETY: caller guarantees `src` holds a live `T` that it no longer considers live
    let value = unsafe { ptr::read(src.cast::<T>()) };
    // SAFETY: caller guarantees `dst` holds a live `T`
    unsafe { (*dst.cast::<T>()).try_move_assign(value) }
}

unsafe fn copy_slot<T: CopyAlternative>(src: *const u8, dst: *mut u8) -> Result<(), LifetimeError> {
    // SAFETY: caller guarantees `src` holds a live `T`
    let value = unsafe { (*src.cast::<T>()).try_copy()? };
    // SAFETY: caller guarantees `dst` is writable storage for a `T`
    unsafe { ptr::write(dst.cast::<T>(), value) };
    Ok(())
}

unsafe fn copy_assign_slot<T: CopyAlternative>(
    dst: *mut u8,
    src: *const u8,
) -> Result<(), LifetimeError> {
    // SAFETY: caller guarantees both slots hold live, distinct `T`s
    unsafe { (*dst.cast::<T>()).try_copy_assign(&*src.cast::<T>()) }
}

unsafe fn any_slot<T: Alternative>(slot: *const u8) -> *const dyn Any {
    slot.cast::<T>() as *const dyn Any
}

unsafe fn any_slot_mut<T: Alternative>(slot: *mut u8) -> *mut dyn Any {
    slot.cast::<T>() as *mut dyn Any
}

pub(crate) unsafe fn eq_slot<T: PartialEq>(a: *const u8, b: *const u8) -> bool {
    unsafe { *a.cast::<T>() == *b.cast::<T>() }
}

pub(crate) unsafe fn partial_cmp_slot<T: PartialOrd>(a: *const u8, b: *const u8) -> Option<Ordering> {
    unsafe { (*a.cast::<T>()).partial_cmp(&*b.cast::<T>()) }
}

pub(crate) unsafe fn cmp_slot<T: Ord>(a: *const u8, b: *const u8) -> Ordering {
    unsafe { (*a.cast::<T>()).cmp(&*b.cast::<T>()) }
}

pub(crate) unsafe fn hash_slot<T: Hash>(slot: *const u8, mut state: &mut dyn Hasher) {
    unsafe { (*slot.cast::<T>()).hash(&mut state) }
}

pub(crate) unsafe fn debug_slot<T: fmt::Debug>(
    slot: *const u8,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    unsafe { fmt::Debug::fmt(&*slot.cast::<T>(), f) }
}

#[cfg(test)]
mod tests {
    use super::Strategy;
    use crate::{
        Alternative,
        CopyAlternative,
        LifetimeError,
    };

    struct Flags<const COPY: bool, const MOVE: bool>;

    impl<const COPY: bool, const MOVE: bool> Alternative for Flags<COPY, MOVE> {
        const MOVE_MAY_FAIL: bool = MOVE;
    }

    impl<const COPY: bool, const MOVE: bool> CopyAlternative for Flags<COPY, MOVE> {
        const COPY_MAY_FAIL: bool = COPY;

        fn try_copy(&self) -> Result<Self, LifetimeError> {
            Ok(Flags)
        }
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(Strategy::for_copy::<Flags<false, false>>(), Strategy::Direct);
        assert_eq!(Strategy::for_copy::<Flags<false, true>>(), Strategy::Direct);
        assert_eq!(Strategy::for_copy::<Flags<true, true>>(), Strategy::Direct);
        assert_eq!(Strategy::for_copy::<Flags<true, false>>(), Strategy::Staged);
    }
}
