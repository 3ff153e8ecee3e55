//! Implements the [`quickcheck::Arbitrary`] trait for [`Variant`]

use quickcheck::{
    Arbitrary,
    Gen,
};

use crate::{
    AlternativeSet,
    CopyAlternative,
    Variant,
};

macro_rules! impl_quickcheck {
    ($slots:ident; $($T:ident $idx:tt),+) => {
        impl<$($T),+> Arbitrary for Variant<($($T,)+)>
        where
            $($T: CopyAlternative + Arbitrary),+
        {
            fn arbitrary(g: &mut Gen) -> Self {
                let index = usize::arbitrary(g) % <($($T,)+) as AlternativeSet>::COUNT;
                $(
                    if index == $idx {
                        return Self::with_index::<$idx>($T::arbitrary(g));
                    }
                )+
                Self::valueless()
            }

            fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
                $(
                    if let Some(value) = self.get_if::<$idx>() {
                        return Box::new(value.shrink().map(Self::with_index::<$idx>));
                    }
                )+
                quickcheck::empty_shrinker()
            }
        }
    };
}

for_each_set!(impl_quickcheck);
