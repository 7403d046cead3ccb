use common::Block;
use common::misc::bit;

use crate::MaceState;
use crate::io::{Access, MMIOHandler, check_lanes, unknown_read, unknown_write};

use log::{debug, trace};

/// What a bus write to the interrupt status register does.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusWritePolicy {
    /// The write is accepted and dropped; latched bits stay set until reset.
    #[default]
    Ignore,
    /// Each set bit in the written data clears that status bit.
    WriteOneToClear,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsaRegs {
    pub ringbase_reset: u64,
    pub flash_nic_ctrl: u64,
    pub int_status: u64,
    pub int_mask: u64,
}

impl IsaRegs {
    pub const INT_COMPARE1: u64 = 0x1 << 13;
    pub const INT_COMPARE2: u64 = 0x1 << 14;
    pub const INT_COMPARE3: u64 = 0x1 << 15;

    pub fn new() -> Self {
        Default::default()
    }

    pub fn flash_nic_ctrl(&self) -> FlashNicCtrl {
        FlashNicCtrl::from_raw(self.flash_nic_ctrl)
    }
}

////////////////////////////////////////////////////////////////////////////////

// Flash/LED/DP-RAM/NIC control. Stored for whoever ends up driving the LEDs and flash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlashNicCtrl(u64);

impl FlashNicCtrl {
    const FLASH_WRITE_SHIFT: u32 = 0;
    const NIC_DEASSERT_SHIFT: u32 = 2;
    const NIC_DATA_SHIFT: u32 = 3;
    const RED_LED_SHIFT: u32 = 4;
    const GREEN_LED_SHIFT: u32 = 5;
    const DPRAM_SHIFT: u32 = 6;

    pub fn from_raw(raw: u64) -> Self {
        FlashNicCtrl(raw)
    }

    pub fn to_raw(&self) -> u64 {
        self.0
    }

    pub fn get_flash_write_enable(&self) -> bool {
        bit(self.0, Self::FLASH_WRITE_SHIFT)
    }

    pub fn get_nic_deassert(&self) -> bool {
        bit(self.0, Self::NIC_DEASSERT_SHIFT)
    }

    pub fn get_nic_data(&self) -> bool {
        bit(self.0, Self::NIC_DATA_SHIFT)
    }

    pub fn get_red_led(&self) -> bool {
        bit(self.0, Self::RED_LED_SHIFT)
    }

    pub fn get_green_led(&self) -> bool {
        bit(self.0, Self::GREEN_LED_SHIFT)
    }

    pub fn get_dpram_enable(&self) -> bool {
        bit(self.0, Self::DPRAM_SHIFT)
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, Copy)]
pub struct IsaBridge {
    status_write: StatusWritePolicy,
}

impl IsaBridge {
    pub const RINGBASE_RESET: u32 = 0x0000 / 8;
    pub const FLASH_NIC_CTRL: u32 = 0x0008 / 8;
    pub const INT_STATUS: u32 = 0x0010 / 8;
    pub const INT_MASK: u32 = 0x0018 / 8;

    const BLOCK: Block = Block::Isa;
    const TARGET: &'static str = "mace::isa";

    pub fn new(status_write: StatusWritePolicy) -> Self {
        IsaBridge { status_write }
    }

    fn log_flash_nic_ctrl(ctrl: FlashNicCtrl) {
        trace!(target: Self::TARGET, "    Enable Flash Writes: {}", ctrl.get_flash_write_enable() as u8);
        trace!(target: Self::TARGET, "    NIC Deassert: {}", ctrl.get_nic_deassert() as u8);
        trace!(target: Self::TARGET, "    NIC Data: {}", ctrl.get_nic_data() as u8);
        trace!(target: Self::TARGET, "    Red LED: {}", ctrl.get_red_led() as u8);
        trace!(target: Self::TARGET, "    Green LED: {}", ctrl.get_green_led() as u8);
        trace!(target: Self::TARGET, "    DP-RAM Enable: {}", ctrl.get_dpram_enable() as u8);
    }
}

impl MMIOHandler for IsaBridge {
    fn block(&self) -> Block {
        Self::BLOCK
    }

    fn read(&mut self, state: &mut MaceState, offset: u32, mem_mask: u64) -> u64 {
        let isa = *state.isa();
        let (ret, name) = match offset {
            Self::RINGBASE_RESET => (isa.ringbase_reset, "Ringbase Address"),
            Self::FLASH_NIC_CTRL => (isa.flash_nic_ctrl, "Flash/LED/DPRAM/NIC Control"),
            Self::INT_STATUS => (isa.int_status, "Interrupt Status"),
            Self::INT_MASK => (isa.int_mask, "Interrupt Mask"),
            _ => return unknown_read(state, Self::BLOCK, offset, mem_mask),
        };

        let access = Access::read(state, Self::BLOCK, offset, ret, mem_mask);
        check_lanes(&access, name);
        if offset == Self::FLASH_NIC_CTRL {
            trace!(target: Self::TARGET, "{name} Read: {access}");
        } else {
            debug!(target: Self::TARGET, "{name} Read: {access}");
        }
        ret
    }

    fn write(&mut self, state: &mut MaceState, offset: u32, data: u64, mem_mask: u64) {
        let access = Access::write(state, Self::BLOCK, offset, data, mem_mask);
        let isa = state.isa_mut();
        match offset {
            Self::RINGBASE_RESET => {
                check_lanes(&access, "Ringbase Address/Reset");
                debug!(target: Self::TARGET, "Ringbase Address/Reset Write: {access}");
                isa.ringbase_reset = data;
            }
            Self::FLASH_NIC_CTRL => {
                check_lanes(&access, "Flash/LED/DPRAM/NIC Control");
                trace!(target: Self::TARGET, "Flash/LED/DPRAM/NIC Control Write: {access}");
                isa.flash_nic_ctrl = data;
                Self::log_flash_nic_ctrl(isa.flash_nic_ctrl());
            }
            Self::INT_STATUS => match self.status_write {
                StatusWritePolicy::Ignore => {
                    debug!(target: Self::TARGET, "Interrupt Status Write (Ignored): {access}");
                }
                StatusWritePolicy::WriteOneToClear => {
                    debug!(target: Self::TARGET, "Interrupt Status Write (Clear): {access}");
                    isa.int_status &= !(data & mem_mask);
                }
            },
            Self::INT_MASK => {
                check_lanes(&access, "Interrupt Mask");
                debug!(target: Self::TARGET, "Interrupt Mask Write: {access}");
                isa.int_mask = data;
            }
            _ => unknown_write(state, Self::BLOCK, offset, data, mem_mask),
        }
    }
}
