use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use common::Block;

use crate::MaceState;
use crate::io::{Access, MMIOHandler};

use log::debug;

/// The RTC chip hanging off the ISA-extended bus. It owns all clock state; MACE only
/// forwards register accesses to it.
pub trait RtcDevice: Send + Sync {
    fn read(&self, reg: u8) -> u64;
    fn write(&self, reg: u8, val: u8);
}

////////////////////////////////////////////////////////////////////////////////

// Stands in when no RTC is attached: reads zero, drops writes.
#[derive(Default, Clone, Copy)]
pub struct NullRtc();

impl RtcDevice for NullRtc {
    fn read(&self, _reg: u8) -> u64 {
        0
    }

    fn write(&self, _reg: u8, _val: u8) {}
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcAccess {
    Read(u8),
    Write(u8, u8),
}

/// A bank of byte registers with no clock behind it. Every access is recorded.
pub struct RamRtc {
    regs: Mutex<[u8; RamRtc::NUM_REGS]>,
    history: Mutex<VecDeque<RtcAccess>>,
}

impl Default for RamRtc {
    fn default() -> Self {
        RamRtc {
            regs: Mutex::new([0; Self::NUM_REGS]),
            history: Mutex::new(VecDeque::new()),
        }
    }
}

impl RamRtc {
    pub const NUM_REGS: usize = 128;

    pub fn peek(&self, reg: u8) -> u8 {
        self.regs.lock().unwrap_or_else(PoisonError::into_inner)[reg as usize % Self::NUM_REGS]
    }

    pub fn poke(&self, reg: u8, val: u8) {
        self.regs.lock().unwrap_or_else(PoisonError::into_inner)[reg as usize % Self::NUM_REGS] = val;
    }

    pub fn take_history(&self) -> VecDeque<RtcAccess> {
        std::mem::take(&mut *self.history.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self, access: RtcAccess) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(access);
    }
}

impl RtcDevice for RamRtc {
    fn read(&self, reg: u8) -> u64 {
        self.record(RtcAccess::Read(reg));
        self.peek(reg) as u64
    }

    fn write(&self, reg: u8, val: u8) {
        self.record(RtcAccess::Write(reg, val));
        self.poke(reg, val);
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Forwards the RTC range to an `RtcDevice`. Registers are 32 words (256 bytes) apart.
pub struct RtcBridge {
    device: Arc<dyn RtcDevice>,
}

impl Default for RtcBridge {
    fn default() -> Self {
        RtcBridge::new(Arc::new(NullRtc()))
    }
}

impl RtcBridge {
    pub const REG_SHIFT: u32 = 5;

    const BLOCK: Block = Block::Rtc;
    const TARGET: &'static str = "mace::rtc";

    pub fn new(device: Arc<dyn RtcDevice>) -> Self {
        RtcBridge { device }
    }

    // `Mace` only routes offsets inside the block (0x1000 words), so this always fits.
    pub fn reg_index(offset: u32) -> u8 {
        (offset >> Self::REG_SHIFT) as u8
    }
}

impl MMIOHandler for RtcBridge {
    fn block(&self) -> Block {
        Self::BLOCK
    }

    fn read(&mut self, state: &mut MaceState, offset: u32, mem_mask: u64) -> u64 {
        let reg = Self::reg_index(offset);
        let ret = self.device.read(reg);
        let access = Access::read(state, Self::BLOCK, offset, ret, mem_mask);
        debug!(target: Self::TARGET, "RTC Read (register {reg:02x}): {access}");
        ret
    }

    fn write(&mut self, state: &mut MaceState, offset: u32, data: u64, mem_mask: u64) {
        let reg = Self::reg_index(offset);
        let access = Access::write(state, Self::BLOCK, offset, data, mem_mask);
        debug!(target: Self::TARGET, "RTC Write (register {reg:02x}): {access}");
        self.device.write(reg, data as u8);
    }
}
