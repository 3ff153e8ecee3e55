//! Implements the [`proptest::arbitrary::Arbitrary`] trait for [`Variant`]

use proptest::arbitrary::Arbitrary;
use proptest::prelude::*;
use proptest::strategy::Union;

use crate::{
    Alternative,
    Variant,
};

macro_rules! impl_proptest {
    ($slots:ident; $($T:ident $idx:tt),+) => {
        impl<$($T),+> Arbitrary for Variant<($($T,)+)>
        where
            $(
                $T: Alternative + Arbitrary,
                <$T as Arbitrary>::Strategy: 'static,
            )+
        {
            type Parameters = ();
            type Strategy = Union<BoxedStrategy<Self>>;

            fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
                Union::new([
                    $(
                        any::<$T>()
                            .prop_map(Self::with_index::<$idx>)
                            .boxed()
                    ),+
                ])
            }
        }
    };
}

for_each_set!(impl_proptest);

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use crate::Variant;

    proptest! {
        #[test]
        #[cfg_attr(miri, ignore)]
        fn proptest_sanity(v: Variant<(u32, String, bool)>) {
            let copy = v.try_clone().unwrap();
            prop_assert_eq!(&copy, &v);
            prop_assert!(!v.is_valueless());
        }
    }
}
