//! Compile time checks on the layout and auto traits of [`Variant`].

use static_assertions::{
    assert_eq_align,
    assert_eq_size,
    assert_impl_all,
};

use crate::Variant;

// the tag fits in the padding of the largest alternative, or costs a single byte
assert_eq_size!(Variant<(u8,)>, [u8; 2]);
assert_eq_size!(Variant<(u8, bool, char)>, [u32; 2]);
assert_eq_size!(Variant<(u8, u16)>, [u16; 2]);
assert_eq_align!(Variant<(u8, u64)>, u64);

#[cfg(target_pointer_width = "64")]
assert_eq_size!(Variant<(u64, String)>, [u64; 4]);
#[cfg(target_pointer_width = "64")]
assert_eq_size!(Variant<(Vec<u8>, Box<str>, String)>, [u64; 4]);

assert_impl_all!(Variant<(u32, String)>: Send, Sync, Clone, Default, Unpin);
assert_impl_all!(Variant<(u32, String)>: PartialEq<Variant<(String, f64)>>, Ord, core::hash::Hash);
