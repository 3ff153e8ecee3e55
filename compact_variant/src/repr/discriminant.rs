use core::fmt;

/// Sentinel returned by [`Variant::index`](crate::Variant::index) when the variant is valueless.
pub const NPOS: usize = usize::MAX;

/// The largest number of alternatives a single set may hold.
pub const MAX_ALTERNATIVES: usize = 8;

/// Tag value stored in the one byte discriminant for the valueless state.
pub(crate) const NPOS_TAG: u8 = u8::MAX;

static_assertions::const_assert!(MAX_ALTERNATIVES < NPOS_TAG as usize);

/// Which alternative, if any, currently inhabits a [`Variant`](crate::Variant).
///
/// `Valueless` orders before every `Active` index, so sorting by discriminant puts valueless
/// variants first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Discriminant {
    /// No alternative is live; only reachable after a failed construction.
    Valueless,
    /// The alternative at this index is live.
    Active(usize),
}

impl Discriminant {
    #[inline(always)]
    pub(crate) const fn from_tag(tag: u8) -> Self {
        if tag == NPOS_TAG {
            Discriminant::Valueless
        } else {
            Discriminant::Active(tag as usize)
        }
    }

    /// Returns the active index, or [`NPOS`] when valueless.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Discriminant::Valueless => NPOS,
            Discriminant::Active(index) => index,
        }
    }

    #[inline]
    pub const fn is_valueless(self) -> bool {
        matches!(self, Discriminant::Valueless)
    }
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discriminant::Valueless => f.write_str("valueless"),
            Discriminant::Active(index) => write!(f, "holding alternative {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{
        Discriminant,
        NPOS,
        NPOS_TAG,
    };

    #[test_case(0 => Discriminant::Active(0); "first")]
    #[test_case(7 => Discriminant::Active(7); "last")]
    #[test_case(NPOS_TAG => Discriminant::Valueless; "npos")]
    fn test_from_tag(tag: u8) -> Discriminant {
        Discriminant::from_tag(tag)
    }

    #[test]
    fn test_valueless_sorts_first() {
        let mut all = vec![
            Discriminant::Active(3),
            Discriminant::Valueless,
            Discriminant::Active(0),
        ];
        all.sort();
        assert_eq!(
            all,
            [Discriminant::Valueless, Discriminant::Active(0), Discriminant::Active(3)]
        );
    }

    #[test]
    fn test_index_roundtrip() {
        assert_eq!(Discriminant::Valueless.index(), NPOS);
        assert_eq!(Discriminant::Active(2).index(), 2);
        assert!(Discriminant::Valueless.is_valueless());
        assert!(!Discriminant::Active(0).is_valueless());
    }
}
