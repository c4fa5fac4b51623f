//! Lookup of fieldless enums by declared name or declared position.
//!
//! Ordinals follow declaration order: ordinal `0` is the first declared variant.

/// A fieldless enum that knows its declared variants and their names.
///
/// Implement it with [`declared_enum!`](crate::declared_enum).
pub trait DeclaredEnum: Sized + Copy + PartialEq + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The declared name of this variant.
    fn name(&self) -> &'static str;

    /// The position of this variant in [`Self::VARIANTS`].
    fn ordinal(&self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|v| v == self)
            .unwrap_or_default()
    }
}

/// Implements [`DeclaredEnum`] for a fieldless enum, listing its variants in
/// declaration order.
///
/// ```
/// use protobind_util::{declared_enum, enums::DeclaredEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Code { Ok, BadRequest }
/// declared_enum!(Code { Ok, BadRequest });
///
/// assert_eq!(Code::BadRequest.name(), "BadRequest");
/// assert_eq!(Code::BadRequest.ordinal(), 1);
/// ```
#[macro_export]
macro_rules! declared_enum {
    ($ty:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::enums::DeclaredEnum for $ty {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match *self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

/// Looks up a variant by its exact declared name.
pub fn from_name<E: DeclaredEnum>(name: &str) -> Option<E> {
    E::VARIANTS.iter().copied().find(|v| v.name() == name)
}

/// Looks up a variant by name, returning `default` for a missing or unknown name.
pub fn from_name_or<E: DeclaredEnum>(name: Option<&str>, default: E) -> E {
    name.and_then(from_name).unwrap_or(default)
}

/// Looks up a variant by its declared position. Negative or out-of-range
/// ordinals yield `None`.
pub fn from_ordinal<E: DeclaredEnum>(ordinal: i64) -> Option<E> {
    usize::try_from(ordinal)
        .ok()
        .and_then(|i| E::VARIANTS.get(i))
        .copied()
}

/// Looks up a variant by its declared position, returning `default` when out of range.
pub fn from_ordinal_or<E: DeclaredEnum>(ordinal: i64, default: E) -> E {
    from_ordinal(ordinal).unwrap_or(default)
}
