//! The raw storage of a [`Variant`](crate::Variant): one flat, `#[repr(C)]` union per arity.
//!
//! Every field of a `#[repr(C)]` union lives at offset 0, so the storage is sized and aligned to
//! the largest alternative and a pointer to the union is a valid pointer to whichever
//! alternative is live. The fields are never named; all access goes through that pointer.

use core::mem::ManuallyDrop;

macro_rules! define_slots {
    ($slots:ident; $($T:ident $idx:tt),+) => {
        #[doc(hidden)]
        #[repr(C)]
        #[allow(non_snake_case, dead_code)]
        pub union $slots<$($T),+> {
            $( $T: ManuallyDrop<$T>, )+
        }
    };
}

for_each_set!(define_slots);
