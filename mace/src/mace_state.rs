use crate::io::isa::IsaRegs;
use crate::io::ust_msc::{Compare, Source, UstMsc};

use log::debug;
use savestate::SaveState;

// This is separate so a mutable borrow can be passed to the MMIO handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaceState {
    base: u32,
    isa: IsaRegs,
    ust_msc: UstMsc,
}

impl MaceState {
    pub fn new(base: u32) -> Self {
        MaceState {
            base,
            isa: IsaRegs::new(),
            ust_msc: UstMsc::new(),
        }
    }

    pub fn reset(&mut self) {
        self.isa = IsaRegs::new();
        self.ust_msc.reset();
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn isa(&self) -> &IsaRegs {
        &self.isa
    }

    pub fn isa_mut(&mut self) -> &mut IsaRegs {
        &mut self.isa
    }

    pub fn ust_msc(&self) -> &UstMsc {
        &self.ust_msc
    }

    pub fn ust_msc_mut(&mut self) -> &mut UstMsc {
        &mut self.ust_msc
    }

    pub fn ust(&self) -> u32 {
        self.ust_msc.ust()
    }

    pub fn msc(&self) -> u32 {
        self.ust_msc.msc()
    }

    pub fn int_status(&self) -> u64 {
        self.isa.int_status
    }

    pub fn int_mask(&self) -> u64 {
        self.isa.int_mask
    }

    // Status bits are only ever OR'd in here; clearing is up to software.
    pub fn raise(&mut self, bits: u64) {
        if bits != 0 {
            debug!(target: "mace::isa", "Raising interrupt status {bits:#x}");
            self.isa.int_status |= bits;
        }
    }

    pub fn ust_tick(&mut self) {
        let bits = self.ust_msc.ust_tick();
        self.raise(bits);
    }

    pub fn msc_tick(&mut self) {
        let bits = self.ust_msc.msc_tick();
        self.raise(bits);
    }

    pub fn save(&self) -> SaveState {
        let snapshot = |source| self.ust_msc.snapshot(source);
        SaveState {
            ringbase_reset: self.isa.ringbase_reset,
            flash_nic_ctrl: self.isa.flash_nic_ctrl,
            int_status: self.isa.int_status,
            int_mask: self.isa.int_mask,
            msc: self.ust_msc.msc() as u64,
            ust: self.ust_msc.ust() as u64,
            ust_msc: self.ust_msc.ust_msc(),
            compare1: self.ust_msc.compare(Compare::Compare1),
            compare2: self.ust_msc.compare(Compare::Compare2),
            compare3: self.ust_msc.compare(Compare::Compare3),
            ain_msc_ust: snapshot(Source::AudioIn),
            aout1_msc_ust: snapshot(Source::AudioOut1),
            aout2_msc_ust: snapshot(Source::AudioOut2),
            vin1_msc_ust: snapshot(Source::VideoIn1),
            vin2_msc_ust: snapshot(Source::VideoIn2),
            vout_msc_ust: snapshot(Source::VideoOut),
        }
    }

    // `SaveState::read_from` has already checked the counters fit and agree with the
    // composite, so the composite is rebuilt from the halves.
    pub fn restore(&mut self, save: &SaveState) {
        self.isa = IsaRegs {
            ringbase_reset: save.ringbase_reset,
            flash_nic_ctrl: save.flash_nic_ctrl,
            int_status: save.int_status,
            int_mask: save.int_mask,
        };
        self.ust_msc.restore(
            save.ust as u32,
            save.msc as u32,
            [save.compare1, save.compare2, save.compare3],
            [
                save.ain_msc_ust,
                save.aout1_msc_ust,
                save.aout2_msc_ust,
                save.vin1_msc_ust,
                save.vin2_msc_ust,
                save.vout_msc_ust,
            ],
        );
    }
}
