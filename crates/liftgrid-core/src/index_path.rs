#![forbid(unsafe_code)]

//! Logical item positions.

use std::fmt;

/// Identifies an item's logical slot as `(section, item)`.
///
/// Ordering is lexicographic: by section first, then by item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    /// Create a new index path.
    #[inline]
    #[must_use]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Index path for `item` in section 0.
    #[inline]
    #[must_use]
    pub const fn item(item: usize) -> Self {
        Self::new(0, item)
    }

    /// Same section, different item.
    #[inline]
    #[must_use]
    pub const fn with_item(self, item: usize) -> Self {
        Self::new(self.section, item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.item)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}
