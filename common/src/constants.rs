pub const WORD_SIZE: u32 = 8; // Bytes per bus access
pub const WORD_SHIFT: u32 = 3;

// Physical base of the MACE aperture on IP32.
pub const MACE_BASE: u32 = 0x1f00_0000;
pub const MACE_SIZE: u32 = 0x0040_0000;

pub const FULL_MASK: u64 = u64::MAX;
pub const LOWER_MASK: u64 = 0x0000_0000_ffff_ffff;
pub const UPPER_MASK: u64 = 0xffff_ffff_0000_0000;
