use derive_more::Display;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// The functional sub-ranges of the MACE aperture.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash, Display)]
pub enum Block {
    #[display(fmt = "PCI")]
    Pci = 0,
    #[display(fmt = "VIN1")]
    Vin1,
    #[display(fmt = "VIN2")]
    Vin2,
    #[display(fmt = "VOUT")]
    Vout,
    #[display(fmt = "ENET")]
    Enet,
    #[display(fmt = "AUDIO")]
    Audio,
    #[display(fmt = "ISA")]
    Isa,
    #[display(fmt = "KBDMS")]
    Kbdms,
    #[display(fmt = "I2C")]
    I2c,
    #[display(fmt = "UST_MSC")]
    UstMsc,
    #[display(fmt = "ISA_EXT")]
    IsaExt,
    #[display(fmt = "RTC")]
    Rtc,
}

impl Block {
    pub const COUNT: usize = 12;

    // (start, size) in bytes, relative to the MACE base.
    const RANGES: [(u32, u32); Self::COUNT] = [
        (0x08_0000, 0x8_0000),
        (0x10_0000, 0x8_0000),
        (0x18_0000, 0x8_0000),
        (0x20_0000, 0x8_0000),
        (0x28_0000, 0x8_0000),
        (0x30_0000, 0x1_0000),
        (0x31_0000, 0x1_0000),
        (0x32_0000, 0x1_0000),
        (0x33_0000, 0x1_0000),
        (0x34_0000, 0x1_0000),
        (0x38_0000, 0x2_0000),
        (0x3a_0000, 0x0_8000),
    ];

    pub fn iter() -> impl Iterator<Item = Block> {
        (0..Self::COUNT).filter_map(Block::from_usize)
    }

    pub fn start(self) -> u32 {
        Self::RANGES[self as usize].0
    }

    pub fn size(self) -> u32 {
        Self::RANGES[self as usize].1
    }

    // Exclusive
    pub fn end(self) -> u32 {
        self.start() + self.size()
    }

    pub fn contains(self, offset: u32) -> bool {
        (self.start()..self.end()).contains(&offset)
    }

    /// Finds the block covering `offset` (bytes from the MACE base) and returns it with the
    /// block-relative byte offset.
    pub fn decode(offset: u32) -> Option<(Block, u32)> {
        Self::iter()
            .find(|block| block.contains(offset))
            .map(|block| (block, offset - block.start()))
    }

    pub fn log_target(self) -> &'static str {
        match self {
            Block::Pci => "mace::pci",
            Block::Vin1 => "mace::vin1",
            Block::Vin2 => "mace::vin2",
            Block::Vout => "mace::vout",
            Block::Enet => "mace::enet",
            Block::Audio => "mace::audio",
            Block::Isa => "mace::isa",
            Block::Kbdms => "mace::kbdms",
            Block::I2c => "mace::i2c",
            Block::UstMsc => "mace::ust_msc",
            Block::IsaExt => "mace::isa_ext",
            Block::Rtc => "mace::rtc",
        }
    }

    /// Case-insensitive lookup by display name, e.g. "ust_msc" or "ISA".
    pub fn from_name(name: &str) -> Option<Block> {
        Self::iter().find(|block| block.to_string().eq_ignore_ascii_case(name))
    }
}
