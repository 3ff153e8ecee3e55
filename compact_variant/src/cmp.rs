//! Comparison, hashing, and formatting of variants.
//!
//! Equality and ordering work between variants over _any_ two sets. Over the same set, variants
//! compare by active index first and by value second. Over different sets, two values compare
//! only when they're of the same concrete type; values of different types are unequal and
//! unordered. In every case a valueless variant equals another valueless variant and sorts before
//! everything else.

use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{
    Hash,
    Hasher,
};

use crate::{
    AlternativeSet,
    DebugSet,
    EqSet,
    HashableSet,
    OrdSet,
    PartialEqSet,
    PartialOrdSet,
    Variant,
};

/// The index in `L` of the alternative that can be compared with the live value of `other`.
#[inline]
fn comparable_index<L: AlternativeSet, M: AlternativeSet>(ours: usize, theirs: usize) -> Option<usize> {
    if TypeId::of::<L>() == TypeId::of::<M>() {
        return (ours == theirs).then_some(ours);
    }
    let same_type = (L::TABLE[ours].type_id)() == (M::TABLE[theirs].type_id)();
    same_type.then_some(ours)
}

impl<L: PartialEqSet, M: AlternativeSet> PartialEq<Variant<M>> for Variant<L> {
    fn eq(&self, other: &Variant<M>) -> bool {
        match (self.repr.active(), other.repr.active()) {
            (None, None) => true,
            (Some(ours), Some(theirs)) => match comparable_index::<L, M>(ours, theirs) {
                // SAFETY: both live values are of the alternative type at `index`
                Some(index) => unsafe { (L::EQ[index])(self.repr.slot(), other.repr.slot()) },
                None => false,
            },
            _ => false,
        }
    }
}

impl<L: EqSet> Eq for Variant<L> {}

impl<L: PartialOrdSet, M: AlternativeSet> PartialOrd<Variant<M>> for Variant<L> {
    fn partial_cmp(&self, other: &Variant<M>) -> Option<Ordering> {
        let (ours, theirs) = match (self.repr.active(), other.repr.active()) {
            (None, None) => return Some(Ordering::Equal),
            (None, Some(_)) => return Some(Ordering::Less),
            (Some(_), None) => return Some(Ordering::Greater),
            (Some(ours), Some(theirs)) => (ours, theirs),
        };

        if TypeId::of::<L>() == TypeId::of::<M>() && ours != theirs {
            return Some(ours.cmp(&theirs));
        }
        let index = comparable_index::<L, M>(ours, theirs)?;
        // SAFETY: both live values are of the alternative type at `index`
        unsafe { (L::PARTIAL_CMP[index])(self.repr.slot(), other.repr.slot()) }
    }
}

impl<L: OrdSet> Ord for Variant<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.repr.active(), other.repr.active()) {
            // SAFETY: both hold the alternative at `index`
            (Some(ours), Some(theirs)) if ours == theirs => unsafe {
                (L::CMP[ours])(self.repr.slot(), other.repr.slot())
            },
            _ => self.discriminant().cmp(&other.discriminant()),
        }
    }
}

impl<L: HashableSet> Hash for Variant<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
        if let Some(index) = self.repr.active() {
            // SAFETY: the alternative at `index` is live
            unsafe { (L::HASH[index])(self.repr.slot(), state) };
        }
    }
}

impl<L: DebugSet> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Active<'a, L: DebugSet>(&'a Variant<L>, usize);

        impl<L: DebugSet> fmt::Debug for Active<'_, L> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // SAFETY: the alternative at `self.1` is live
                unsafe { (L::DEBUG[self.1])(self.0.repr.slot(), f) }
            }
        }

        #[derive(Debug)]
        struct Valueless;

        match self.repr.active() {
            Some(index) => f.debug_tuple("Variant").field(&index).field(&Active(self, index)).finish(),
            None => f.debug_tuple("Variant").field(&Valueless).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{
        Hash,
        Hasher,
    };

    use crate::Variant;

    fn valueless<L: crate::AlternativeSet>(mut v: Variant<L>) -> Variant<L> {
        drop(v.take());
        v
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_same_set_orders_by_index_first() {
        type Set = (u32, u8);
        let a: Variant<Set> = Variant::new(u32::MAX);
        let b: Variant<Set> = Variant::new(0_u8);
        assert!(a < b);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Less);
    }

    #[test]
    fn test_same_set_duplicate_types_are_distinct() {
        type Set = (u8, u8);
        let a: Variant<Set> = Variant::with_index::<0>(1);
        let b: Variant<Set> = Variant::with_index::<1>(1);
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_cross_set_equality() {
        let a: Variant<(i32, bool)> = Variant::new(7_i32);
        let b: Variant<(bool, f64, i32)> = Variant::new(7_i32);
        let c: Variant<(bool, f64, i32)> = Variant::new(7.0_f64);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.partial_cmp(&c), None);
    }

    #[test]
    fn test_valueless_sorts_first() {
        let empty = valueless(Variant::<(i32, bool)>::new(false));
        let other_empty = valueless(Variant::<(bool,)>::new(true));
        let full: Variant<(i32, bool)> = Variant::new(i32::MIN);

        assert_eq!(empty, other_empty);
        assert!(empty < full);
        assert!(full > empty);
        assert_ne!(empty, full);
        assert_eq!(empty.cmp(&empty), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_float_partial_cmp() {
        let nan: Variant<(f64,)> = Variant::new(f64::NAN);
        assert_ne!(nan, nan);
        assert_eq!(nan.partial_cmp(&nan), None);
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let a: Variant<(u32, String)> = Variant::new(String::from("a"));
        let b: Variant<(u32, String)> = Variant::new(String::from("a"));
        assert_eq!(hash_of(&a), hash_of(&b));

        let set: HashSet<Variant<(u32, String)>> = [a, b, Variant::new(1_u32)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_debug() {
        let v: Variant<(u32, String)> = Variant::new(String::from("nyc"));
        assert_eq!(format!("{v:?}"), r#"Variant(1, "nyc")"#);

        let empty = valueless(v);
        assert_eq!(format!("{empty:?}"), "Variant(Valueless)");
    }
}
