//! Implements the [`arbitrary::Arbitrary`] trait for [`Variant`]

use arbitrary::{
    Arbitrary,
    Unstructured,
};

use crate::{
    Alternative,
    AlternativeSet,
    Variant,
};

macro_rules! impl_arbitrary {
    ($slots:ident; $($T:ident $idx:tt),+) => {
        impl<'a, $($T),+> Arbitrary<'a> for Variant<($($T,)+)>
        where
            $($T: Alternative + Arbitrary<'a>),+
        {
            fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
                let index = u.choose_index(<($($T,)+) as AlternativeSet>::COUNT)?;
                $(
                    if index == $idx {
                        return Ok(Self::with_index::<$idx>($T::arbitrary(u)?));
                    }
                )+
                Err(arbitrary::Error::IncorrectFormat)
            }
        }
    };
}

for_each_set!(impl_arbitrary);
