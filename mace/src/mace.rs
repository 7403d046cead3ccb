use std::sync::Arc;
use std::time::Duration;

use common::Block;
use common::constants::{MACE_BASE, WORD_SHIFT, WORD_SIZE};

use crate::MMIOHandler;
use crate::MaceState;
use crate::io::isa::{IsaBridge, StatusWritePolicy};
use crate::io::rtc::{RtcBridge, RtcDevice};
use crate::io::stub::Stub;
use crate::io::ust_msc::UstMscBlock;
use crate::sched::{Scheduler, TimerId, to_nanos};

use delegate::delegate;
use log::{debug, trace};
use savestate::SaveState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaceConfig {
    /// Physical base of the aperture. Only used to report absolute addresses.
    pub base: u32,
    pub status_write: StatusWritePolicy,
}

impl Default for MaceConfig {
    fn default() -> Self {
        MaceConfig {
            base: MACE_BASE,
            status_write: StatusWritePolicy::Ignore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Ust,
    Msc,
}

pub struct Mace {
    state: MaceState,
    handlers: Vec<Box<dyn MMIOHandler>>,
    sched: Scheduler<TimerEvent>,
    timer_ust: TimerId,
    timer_msc: TimerId,
}

impl Mace {
    pub const UST_PERIOD: Duration = Duration::from_nanos(960);
    pub const MSC_PERIOD: Duration = Duration::from_millis(1);

    pub fn new(rtc: Arc<dyn RtcDevice>) -> Mace {
        Self::with_config(MaceConfig::default(), rtc)
    }

    /// Builds the device with both timers allocated but not running; `reset` starts them.
    pub fn with_config(config: MaceConfig, rtc: Arc<dyn RtcDevice>) -> Mace {
        let mut sched = Scheduler::new();
        let timer_ust = sched.alloc(TimerEvent::Ust);
        let timer_msc = sched.alloc(TimerEvent::Msc);

        let mut mace = Mace {
            state: MaceState::new(config.base),
            handlers: Block::iter()
                .map(|block| Box::new(Stub::new(block)) as Box<dyn MMIOHandler>)
                .collect(),
            sched,
            timer_ust,
            timer_msc,
        };
        mace.set_mmio_handler(IsaBridge::new(config.status_write));
        mace.set_mmio_handler(UstMscBlock());
        mace.set_mmio_handler(RtcBridge::new(rtc));
        mace
    }

    /// Replaces the decoder for the handler's block.
    pub fn set_mmio_handler(&mut self, handler: impl MMIOHandler + 'static) {
        let block = handler.block();
        self.handlers[block as usize] = Box::new(handler);
    }

    pub fn reset(&mut self) {
        debug!("Reset");
        self.state.reset();
        self.sched.adjust(self.timer_ust, Some(Self::UST_PERIOD), Some(Self::UST_PERIOD));
        self.sched.adjust(self.timer_msc, Some(Self::MSC_PERIOD), Some(Self::MSC_PERIOD));
    }

    /// Halts both timers. State is kept; `reset` starts them again.
    pub fn stop(&mut self) {
        debug!("Stop");
        self.sched.disarm(self.timer_ust);
        self.sched.disarm(self.timer_msc);
    }

    pub fn is_running(&self) -> bool {
        self.sched.is_armed(self.timer_ust) || self.sched.is_armed(self.timer_msc)
    }

    pub fn now(&self) -> Duration {
        self.sched.now()
    }

    // Run every timer that expires within `dur`, in time order.
    pub fn run_for(&mut self, dur: Duration) {
        let deadline = self.sched.now_nanos().saturating_add(to_nanos(dur));
        while let Some(event) = self.sched.pop_until(deadline) {
            match event {
                TimerEvent::Ust => self.state.ust_tick(),
                TimerEvent::Msc => self.state.msc_tick(),
            }
        }
        self.sched.advance_to(deadline);
    }

    ///////////////////////////////////////////////////////////////////////////

    // Bus accesses. `offset` is in bytes from the MACE base.

    pub fn read(&mut self, offset: u32, mem_mask: u64) -> u64 {
        let Some((block, offset)) = self.decode(offset) else {
            debug!("Unmapped Read: [{:08x}] & {mem_mask:016x}", self.state.base().wrapping_add(offset));
            return 0;
        };
        self.read_block(block, offset, mem_mask)
    }

    pub fn write(&mut self, offset: u32, data: u64, mem_mask: u64) {
        let Some((block, offset)) = self.decode(offset) else {
            debug!(
                "Unmapped Write: [{:08x}] = {data:016x} & {mem_mask:016x}",
                self.state.base().wrapping_add(offset)
            );
            return;
        };
        self.write_block(block, offset, data, mem_mask);
    }

    /// `offset` is in words from the start of `block`. Offsets past the end of the block
    /// are unmapped.
    pub fn read_block(&mut self, block: Block, offset: u32, mem_mask: u64) -> u64 {
        if !Self::in_block(block, offset) {
            debug!("Unmapped Read: {block}+{offset:#x} (words) & {mem_mask:016x}");
            return 0;
        }
        self.handlers[block as usize].read(&mut self.state, offset, mem_mask)
    }

    pub fn write_block(&mut self, block: Block, offset: u32, data: u64, mem_mask: u64) {
        if !Self::in_block(block, offset) {
            debug!("Unmapped Write: {block}+{offset:#x} (words) = {data:016x} & {mem_mask:016x}");
            return;
        }
        self.handlers[block as usize].write(&mut self.state, offset, data, mem_mask);
    }

    fn in_block(block: Block, offset: u32) -> bool {
        offset < block.size() >> WORD_SHIFT
    }

    // Returns the block and the word offset within it.
    fn decode(&self, offset: u32) -> Option<(Block, u32)> {
        if offset % WORD_SIZE != 0 {
            trace!("Unaligned access at {offset:#x}; using the containing word");
        }
        let (block, rel) = Block::decode(offset)?;
        Some((block, rel >> WORD_SHIFT))
    }

    ///////////////////////////////////////////////////////////////////////////

    delegate! {
        to self.state {
            pub fn ust(&self) -> u32;
            pub fn msc(&self) -> u32;
            pub fn int_status(&self) -> u64;
            pub fn int_mask(&self) -> u64;
            // Single ticks outside the timeline.
            pub fn ust_tick(&mut self);
            pub fn msc_tick(&mut self);
        }
    }

    pub fn ust_msc(&self) -> u64 {
        self.state.ust_msc().ust_msc()
    }

    pub fn get_state(&self) -> &MaceState {
        &self.state
    }

    pub fn get_state_mut(&mut self) -> &mut MaceState {
        &mut self.state
    }

    pub fn save_state(&self) -> SaveState {
        self.state.save()
    }

    pub fn restore_state(&mut self, save: &SaveState) {
        debug!("Restoring state");
        self.state.restore(save);
    }
}
