use common::Block;

use crate::MaceState;
use crate::io::{MMIOHandler, unknown_read, unknown_write};

/// A block with no implemented registers: reads return zero and writes are dropped, both
/// reported on the block's log target.
#[derive(Debug, Clone, Copy)]
pub struct Stub {
    block: Block,
}

impl Stub {
    pub fn new(block: Block) -> Self {
        Stub { block }
    }
}

impl MMIOHandler for Stub {
    fn block(&self) -> Block {
        self.block
    }

    fn read(&mut self, state: &mut MaceState, offset: u32, mem_mask: u64) -> u64 {
        unknown_read(state, self.block, offset, mem_mask)
    }

    fn write(&mut self, state: &mut MaceState, offset: u32, data: u64, mem_mask: u64) {
        unknown_write(state, self.block, offset, data, mem_mask);
    }
}
