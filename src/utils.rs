use std::fmt;

pub(crate) use hashmap::*;
pub(crate) type BuildHasher = fxhash::FxBuildHasher;

#[cfg(feature = "deterministic")]
mod hashmap {
    pub(crate) type HashMap<K, V> = indexmap::IndexMap<K, V, super::BuildHasher>;
    pub(crate) type HashSet<K> = indexmap::IndexSet<K, super::BuildHasher>;
}
#[cfg(not(feature = "deterministic"))]
mod hashmap {
    use super::BuildHasher;
    pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, BuildHasher>;
    pub(crate) type HashSet<K> = std::collections::HashSet<K, BuildHasher>;
}

/// `x.pow(y)` as an overloadable operator, since [`std::ops`] has none for it.
pub trait Pow<Rhs = Self> {
    type Output;
    fn pow(self, rhs: Rhs) -> Self::Output;
}

pub(crate) fn fmt_iter<T>(
    [start, sep, end]: [&str; 3],
    iter: impl Iterator<Item = T>,
    fmt_item: impl Fn(T, &mut fmt::Formatter<'_>) -> fmt::Result,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{start}")?;
    for (i, item) in iter.enumerate() {
        if i != 0 {
            write!(f, "{sep}")?;
        }
        fmt_item(item, f)?;
    }
    write!(f, "{end}")
}
