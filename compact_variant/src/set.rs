//! Type-level registry of the alternatives a [`Variant`](crate::Variant) can hold.
//!
//! A set is a tuple `(A, B, ...)` of one to [`MAX_ALTERNATIVES`](crate::MAX_ALTERNATIVES)
//! [`Alternative`]s; each alternative's index is its position in the tuple. All of the traits in
//! this module are implemented for every such tuple and can't be implemented outside this crate.

use core::any::TypeId;
use core::marker::PhantomData;

use crate::repr::slots::*;
use crate::repr::table::{
    cmp_slot,
    debug_slot,
    eq_slot,
    hash_slot,
    partial_cmp_slot,
    CmpFn,
    CopyLifetime,
    DebugFn,
    EqFn,
    HashFn,
    Lifetime,
    PartialCmpFn,
};
use crate::{
    Alternative,
    CopyAlternative,
};

mod private {
    pub trait Sealed {}
}

/// Type-level marker for the alternative at index `I`, used to infer which index a type occupies.
pub struct Index<const I: usize>(PhantomData<()>);

/// A tuple of [`Alternative`]s.
///
/// # Safety
/// `Storage` must be a `#[repr(C)]` union with a field for every alternative, and `TABLE[i]` must
/// describe the alternative at index `i`. Only the implementations in this crate exist.
pub unsafe trait AlternativeSet: private::Sealed + Sized + 'static {
    /// Number of alternatives.
    const COUNT: usize;
    /// Whether every alternative has no drop glue, in which case destroying a value is a no-op.
    const TRIVIAL_DROP: bool;

    #[doc(hidden)]
    type Storage;
    #[doc(hidden)]
    const TABLE: &'static [Lifetime];

    /// Returns the first index holding the type identified by `type_id`.
    fn position_of(type_id: TypeId) -> Option<usize> {
        Self::TABLE
            .iter()
            .position(|entry| (entry.type_id)() == type_id)
    }
}

/// Maps index `I` to the alternative stored there.
pub trait Select<const I: usize>: AlternativeSet {
    type Output: Alternative;
}

/// Maps the alternative `T` to its index. `M` is always [`Index<I>`] and is left for the compiler
/// to infer; a type listed more than once can't be inferred and has to be addressed by index.
///
/// # Safety
/// `T` must be the alternative at `INDEX`. Only the implementations in this crate exist.
pub unsafe trait Member<T, M>: AlternativeSet {
    const INDEX: usize;
}

/// A set whose every alternative is a [`CopyAlternative`].
pub trait CopySet: AlternativeSet {
    #[doc(hidden)]
    const COPY_TABLE: &'static [CopyLifetime];
}

/// A set whose every alternative is [`PartialEq`].
pub trait PartialEqSet: AlternativeSet {
    #[doc(hidden)]
    const EQ: &'static [EqFn];
}

/// A set whose every alternative is [`Eq`].
pub trait EqSet: PartialEqSet {}

/// A set whose every alternative is [`PartialOrd`].
pub trait PartialOrdSet: PartialEqSet {
    #[doc(hidden)]
    const PARTIAL_CMP: &'static [PartialCmpFn];
}

/// A set whose every alternative is [`Ord`].
pub trait OrdSet: EqSet + PartialOrdSet {
    #[doc(hidden)]
    const CMP: &'static [CmpFn];
}

/// A set whose every alternative is [`Hash`](core::hash::Hash).
pub trait HashableSet: AlternativeSet {
    #[doc(hidden)]
    const HASH: &'static [HashFn];
}

/// A set whose every alternative is [`Debug`](core::fmt::Debug).
pub trait DebugSet: AlternativeSet {
    #[doc(hidden)]
    const DEBUG: &'static [DebugFn];
}

macro_rules! impl_alternative_set {
    ($slots:ident; $($T:ident $idx:tt),+) => {
        impl<$($T: Alternative),+> private::Sealed for ($($T,)+) {}

        unsafe impl<$($T: Alternative),+> AlternativeSet for ($($T,)+) {
            const COUNT: usize = [$($idx),+].len();
            const TRIVIAL_DROP: bool = $( !core::mem::needs_drop::<$T>() )&&+;

            type Storage = $slots<$($T),+>;
            const TABLE: &'static [Lifetime] = &[$(Lifetime::of::<$T>()),+];
        }

        impl<$($T: CopyAlternative),+> CopySet for ($($T,)+) {
            const COPY_TABLE: &'static [CopyLifetime] = &[$(CopyLifetime::of::<$T>()),+];
        }

        impl<$($T: Alternative + PartialEq),+> PartialEqSet for ($($T,)+) {
            const EQ: &'static [EqFn] = &[$(eq_slot::<$T> as EqFn),+];
        }

        impl<$($T: Alternative + Eq),+> EqSet for ($($T,)+) {}

        impl<$($T: Alternative + PartialOrd),+> PartialOrdSet for ($($T,)+) {
            const PARTIAL_CMP: &'static [PartialCmpFn] = &[$(partial_cmp_slot::<$T> as PartialCmpFn),+];
        }

        impl<$($T: Alternative + Ord),+> OrdSet for ($($T,)+) {
            const CMP: &'static [CmpFn] = &[$(cmp_slot::<$T> as CmpFn),+];
        }

        impl<$($T: Alternative + core::hash::Hash),+> HashableSet for ($($T,)+) {
            const HASH: &'static [HashFn] = &[$(hash_slot::<$T> as HashFn),+];
        }

        impl<$($T: Alternative + core::fmt::Debug),+> DebugSet for ($($T,)+) {
            const DEBUG: &'static [DebugFn] = &[$(debug_slot::<$T> as DebugFn),+];
        }

        impl_alternative_set!(@index [$($T),+]; $($T $idx),+);
    };
    (@index $all:tt; $($T:ident $idx:tt),+) => {
        $( impl_alternative_set!(@index_one $all; $T $idx); )+
    };
    (@index_one [$($All:ident),+]; $T:ident $idx:tt) => {
        impl<$($All: Alternative),+> Select<$idx> for ($($All,)+) {
            type Output = $T;
        }

        unsafe impl<$($All: Alternative),+> Member<$T, Index<$idx>> for ($($All,)+) {
            const INDEX: usize = $idx;
        }
    };
}

for_each_set!(impl_alternative_set);

static_assertions::const_assert_eq!(<(u8,) as AlternativeSet>::COUNT, 1);
static_assertions::const_assert_eq!(
    <(u8, u8, u8, u8, u8, u8, u8, u8) as AlternativeSet>::COUNT,
    crate::MAX_ALTERNATIVES
);
