/// Page shift value (12 bits) for 4KB pages
pub const PAGE_SHIFT: usize = 12;
/// Standard page size (4096 bytes)
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
/// Mask for extracting page offset
pub const PAGE_MASK: usize = PAGE_SIZE - 1;

/// Number of preceding pages written before each timed probe
pub const SPOILER_WINDOW: usize = 64;
/// Number of timed rounds per page
pub const SPOILER_ROUNDS: usize = 100;
/// Rounds taking this many cycles or more are discarded as noise
pub const THRESH_OUTLIER: u32 = 600;
/// No-op iterations executed once before the first measured page
pub const WARMUP_ITERATIONS: usize = 1_000_000;
