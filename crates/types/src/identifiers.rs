//! Node identifier types.

use std::fmt;
use std::hash::Hash;

/// A node identifier.
///
/// Diffusion models store state densely, so they only accept graphs whose
/// identifiers map onto `0..N`. `index` reports that mapping: `Some(i)` for
/// identifiers that denote a non-negative integer, `None` for everything else.
pub trait NodeLabel: Clone + Eq + Hash + fmt::Debug {
    /// Dense index of this identifier, if it has one.
    fn index(&self) -> Option<usize>;
}

macro_rules! impl_integer_label {
    ($($ty:ty),*) => {
        $(
            impl NodeLabel for $ty {
                fn index(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_integer_label!(usize, u32, u64, i32, i64);

impl NodeLabel for String {
    fn index(&self) -> Option<usize> {
        None
    }
}

impl NodeLabel for &'static str {
    fn index(&self) -> Option<usize> {
        None
    }
}
