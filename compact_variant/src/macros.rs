/// Implements [`Alternative`](crate::Alternative) and
/// [`CopyAlternative`](crate::CopyAlternative) for types that implement [`Clone`], with
/// infallible lifetime primitives.
///
/// # Examples
/// ```
/// use compact_variant::{alternative, Variant};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// alternative!(Point);
///
/// let v: Variant<(Point, u8)> = Variant::new(Point { x: 1, y: 2 });
/// assert_eq!(v.get::<0>().unwrap().y, 2);
/// ```
#[macro_export]
macro_rules! alternative {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Alternative for $ty {}

            impl $crate::CopyAlternative for $ty {
                #[inline]
                fn try_copy(&self) -> ::core::result::Result<Self, $crate::LifetimeError> {
                    ::core::result::Result::Ok(::core::clone::Clone::clone(self))
                }
            }
        )+
    };
}

/// Invokes `$m` once per supported arity with the storage union name and the
/// `Type index` pairs of that arity.
macro_rules! for_each_set {
    ($m:ident) => {
        $m!(Slots1; A 0);
        $m!(Slots2; A 0, B 1);
        $m!(Slots3; A 0, B 1, C 2);
        $m!(Slots4; A 0, B 1, C 2, D 3);
        $m!(Slots5; A 0, B 1, C 2, D 3, E 4);
        $m!(Slots6; A 0, B 1, C 2, D 3, E 4, F 5);
        $m!(Slots7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
        $m!(Slots8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
    };
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! trace_event {
            ($($arg:tt)+) => { tracing::trace!(target: "compact_variant", $($arg)+) };
        }

        macro_rules! debug_event {
            ($($arg:tt)+) => { tracing::debug!(target: "compact_variant", $($arg)+) };
        }
    } else {
        macro_rules! trace_event {
            ($($arg:tt)+) => {};
        }

        macro_rules! debug_event {
            ($($arg:tt)+) => {};
        }
    }
}
