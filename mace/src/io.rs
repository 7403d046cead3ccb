pub mod isa;
pub mod rtc;
pub mod stub;
pub mod ust_msc;

use common::Block;
use common::constants::{FULL_MASK, WORD_SIZE};

use crate::MaceState;

use derive_more::Display;
use log::debug;

/// A block's register decoder. `offset` is in 64-bit words from the start of the block.
pub trait MMIOHandler: Send {
    fn block(&self) -> Block;

    fn read(&mut self, state: &mut MaceState, offset: u32, mem_mask: u64) -> u64;
    fn write(&mut self, state: &mut MaceState, offset: u32, data: u64, mem_mask: u64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Dir {
    Read,
    Write,
}

// One bus access, as reported on the diagnostic channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "{} {} [{:08x}] = {:016x} & {:016x}", block, dir, addr, data, mem_mask)]
pub struct Access {
    pub block: Block,
    pub dir: Dir,
    pub addr: u32,
    pub data: u64,
    pub mem_mask: u64,
}

impl Access {
    pub fn new(state: &MaceState, block: Block, dir: Dir, offset: u32, data: u64, mem_mask: u64) -> Self {
        Access {
            block,
            dir,
            addr: absolute_addr(state.base(), block, offset),
            data,
            mem_mask,
        }
    }

    pub fn read(state: &MaceState, block: Block, offset: u32, data: u64, mem_mask: u64) -> Self {
        Self::new(state, block, Dir::Read, offset, data, mem_mask)
    }

    pub fn write(state: &MaceState, block: Block, offset: u32, data: u64, mem_mask: u64) -> Self {
        Self::new(state, block, Dir::Write, offset, data, mem_mask)
    }

    pub fn is_partial(&self) -> bool {
        self.mem_mask != FULL_MASK
    }
}

// Only ever used for reporting.
pub fn absolute_addr(base: u32, block: Block, offset: u32) -> u32 {
    base.wrapping_add(block.start())
        .wrapping_add(offset.wrapping_mul(WORD_SIZE))
}

pub(crate) fn unknown_read(state: &MaceState, block: Block, offset: u32, mem_mask: u64) -> u64 {
    let access = Access::read(state, block, offset, 0, mem_mask);
    debug!(target: block.log_target(), "Unknown {access}");
    0
}

pub(crate) fn unknown_write(state: &MaceState, block: Block, offset: u32, data: u64, mem_mask: u64) {
    let access = Access::write(state, block, offset, data, mem_mask);
    debug!(target: block.log_target(), "Unknown {access}");
}

pub(crate) fn check_lanes(access: &Access, reg: &str) {
    if access.is_partial() {
        debug!(target: access.block.log_target(), "{reg}: Partial lane access: {access}");
    }
}
