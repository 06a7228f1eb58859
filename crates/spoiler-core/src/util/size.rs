use serde::Serialize;

use crate::util::PAGE_SIZE;

/// Buffer size with a binary unit.
///
/// All units use base-2 multipliers (1 KB = 1024 bytes).
///
/// # Examples
///
/// ```
/// use spoiler_core::util::Size;
///
/// let size = Size::MB(4);
/// assert_eq!(size.bytes(), 4 * 1024 * 1024);
/// assert_eq!(size.pages(), 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Size {
    /// Size in bytes
    B(usize),
    /// Size in kilobytes
    KB(usize),
    /// Size in megabytes
    MB(usize),
    /// Size in gigabytes
    GB(usize),
}

impl Size {
    /// Converts this size to bytes.
    pub const fn bytes(&self) -> usize {
        match self {
            Size::B(bytes) => *bytes,
            Size::KB(kb) => *kb << 10,
            Size::MB(mb) => *mb << 20,
            Size::GB(gb) => *gb << 30,
        }
    }

    /// Number of whole pages of [`PAGE_SIZE`] covered by this size.
    pub const fn pages(&self) -> usize {
        self.bytes() / PAGE_SIZE
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::B(bytes) => write!(f, "{} B", bytes),
            Size::KB(kb) => write!(f, "{} KB", kb),
            Size::MB(mb) => write!(f, "{} MB", mb),
            Size::GB(gb) => write!(f, "{} GB", gb),
        }
    }
}
