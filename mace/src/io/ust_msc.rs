// UST/MSC timebase.
//
// UST counts 960 ns periods and MSC counts 1 ms periods. The two are kept in the
// composite register as (UST << 32) | MSC, which is what the compare registers are
// matched against on every tick of either counter.

use common::Block;
use common::constants::{LOWER_MASK, UPPER_MASK};
use common::mem::join;

use crate::MaceState;
use crate::io::isa::IsaRegs;
use crate::io::{Access, MMIOHandler, check_lanes, unknown_read, unknown_write};

use log::{debug, trace};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// Sources that latch the composite timebase on their own events. Nothing in this device
/// produces them yet.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Source {
    AudioIn = 0,
    AudioOut1,
    AudioOut2,
    VideoIn1,
    VideoIn2,
    VideoOut,
}

impl Source {
    pub const COUNT: usize = 6;

    fn name(self) -> &'static str {
        match self {
            Source::AudioIn => "Audio In",
            Source::AudioOut1 => "Audio Out 1",
            Source::AudioOut2 => "Audio Out 2",
            Source::VideoIn1 => "Video In 1",
            Source::VideoIn2 => "Video In 2",
            Source::VideoOut => "Video Out",
        }
    }
}

/// The three compare registers.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Compare {
    Compare1 = 0,
    Compare2,
    Compare3,
}

impl Compare {
    pub const COUNT: usize = 3;

    pub fn iter() -> impl Iterator<Item = Compare> {
        (0..Self::COUNT).filter_map(Compare::from_usize)
    }

    /// Interrupt status bit raised when this compare matches.
    pub fn status_bit(self) -> u64 {
        match self {
            Compare::Compare1 => IsaRegs::INT_COMPARE1,
            Compare::Compare2 => IsaRegs::INT_COMPARE2,
            Compare::Compare3 => IsaRegs::INT_COMPARE3,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UstMsc {
    msc: u32,
    ust: u32,
    ust_msc: u64,
    compare: [u64; Compare::COUNT],
    snapshots: [u64; Source::COUNT],
}

impl UstMsc {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn ust(&self) -> u32 {
        self.ust
    }

    pub fn msc(&self) -> u32 {
        self.msc
    }

    pub fn ust_msc(&self) -> u64 {
        self.ust_msc
    }

    pub fn compare(&self, which: Compare) -> u64 {
        self.compare[which as usize]
    }

    pub fn set_compare(&mut self, which: Compare, val: u64) {
        self.compare[which as usize] = val;
    }

    pub fn snapshot(&self, source: Source) -> u64 {
        self.snapshots[source as usize]
    }

    /// For the block that owns `source` to latch the current timebase.
    pub fn latch(&mut self, source: Source) {
        self.snapshots[source as usize] = self.ust_msc;
    }

    /// Advances UST and returns the interrupt status bits of any compare that now matches.
    pub fn ust_tick(&mut self) -> u64 {
        self.ust = self.ust.wrapping_add(1);
        self.ust_msc &= LOWER_MASK;
        self.ust_msc |= (self.ust as u64) << u32::BITS;
        self.check_compare()
    }

    /// Advances MSC and returns the interrupt status bits of any compare that now matches.
    pub fn msc_tick(&mut self) -> u64 {
        self.msc = self.msc.wrapping_add(1);
        self.ust_msc &= UPPER_MASK;
        self.ust_msc |= self.msc as u64;
        self.check_compare()
    }

    pub fn check_compare(&self) -> u64 {
        Compare::iter()
            .filter(|&which| self.compare(which) == self.ust_msc)
            .fold(0, |bits, which| bits | which.status_bit())
    }

    // Restoring a saved image is the only way to set the counters directly.
    pub(crate) fn restore(&mut self, ust: u32, msc: u32, compare: [u64; Compare::COUNT], snapshots: [u64; Source::COUNT]) {
        self.ust = ust;
        self.msc = msc;
        self.ust_msc = join(ust, msc);
        self.compare = compare;
        self.snapshots = snapshots;
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Register interface for the timebase block.
#[derive(Debug, Default, Clone, Copy)]
pub struct UstMscBlock();

impl UstMscBlock {
    pub const COUNTER: u32 = 0x0000 / 8;
    pub const COMPARE1: u32 = 0x0008 / 8;
    pub const COMPARE2: u32 = 0x0010 / 8;
    pub const COMPARE3: u32 = 0x0018 / 8;
    pub const AIN_MSC_UST: u32 = 0x0020 / 8;
    pub const AOUT1_MSC_UST: u32 = 0x0028 / 8;
    pub const AOUT2_MSC_UST: u32 = 0x0030 / 8;
    pub const VIN1_MSC_UST: u32 = 0x0038 / 8;
    pub const VIN2_MSC_UST: u32 = 0x0040 / 8;
    pub const VOUT_MSC_UST: u32 = 0x0048 / 8;

    const BLOCK: Block = Block::UstMsc;
    const TARGET: &'static str = "mace::ust_msc";

    fn compare(offset: u32) -> Option<Compare> {
        Compare::from_u32(offset.checked_sub(Self::COMPARE1)?)
    }

    fn source(offset: u32) -> Option<Source> {
        Source::from_u32(offset.checked_sub(Self::AIN_MSC_UST)?)
    }
}

impl MMIOHandler for UstMscBlock {
    fn block(&self) -> Block {
        Self::BLOCK
    }

    fn read(&mut self, state: &mut MaceState, offset: u32, mem_mask: u64) -> u64 {
        let ust_msc = *state.ust_msc();
        match offset {
            Self::COUNTER => {
                let ret = join(ust_msc.ust(), ust_msc.msc());
                let access = Access::read(state, Self::BLOCK, offset, ret, mem_mask);
                check_lanes(&access, "MSC/UST Counter");
                trace!(target: Self::TARGET, "MSC/UST Counter Read: {access}");
                ret
            }
            _ => match (Self::compare(offset), Self::source(offset)) {
                (Some(which), _) => {
                    let ret = ust_msc.compare(which);
                    let access = Access::read(state, Self::BLOCK, offset, ret, mem_mask);
                    check_lanes(&access, "Compare");
                    debug!(target: Self::TARGET, "{which:?} Read: {access}");
                    ret
                }
                (None, Some(source)) => {
                    let ret = ust_msc.snapshot(source);
                    let access = Access::read(state, Self::BLOCK, offset, ret, mem_mask);
                    check_lanes(&access, source.name());
                    debug!(target: Self::TARGET, "{} MSC/UST Read: {access}", source.name());
                    ret
                }
                (None, None) => unknown_read(state, Self::BLOCK, offset, mem_mask),
            },
        }
    }

    fn write(&mut self, state: &mut MaceState, offset: u32, data: u64, mem_mask: u64) {
        let access = Access::write(state, Self::BLOCK, offset, data, mem_mask);
        match offset {
            Self::COUNTER => {
                debug!(target: Self::TARGET, "MSC/UST Counter Write (Ignored): {access}");
            }
            _ => match (Self::compare(offset), Self::source(offset)) {
                // Stored whole; a partial lane mask is only reported.
                (Some(which), _) => {
                    check_lanes(&access, "Compare");
                    debug!(target: Self::TARGET, "{which:?} Write: {access}");
                    state.ust_msc_mut().set_compare(which, data);
                }
                // No producer is wired up, so these stay read-only from the bus.
                (None, Some(source)) => {
                    debug!(target: Self::TARGET, "{} MSC/UST Write (Ignored): {access}", source.name());
                }
                (None, None) => unknown_write(state, Self::BLOCK, offset, data, mem_mask),
            },
        }
    }
}
