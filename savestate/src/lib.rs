use std::io::{self, Read, Write};

use common::mem::{ReadU64, WriteU64, join};

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a MACE save state (magic {0:#018x})")]
    BadMagic(u64),

    #[error("Unsupported save state version {0}")]
    Version(u32),

    #[error("Counter out of range: {name} = {val:#x}")]
    CounterRange { name: &'static str, val: u64 },

    #[error("Composite timebase {ust_msc:#018x} doesn't match UST {ust:#x} / MSC {msc:#x}")]
    Timebase { ust_msc: u64, ust: u64, msc: u64 },
}

/// The persisted registers, in file order.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct SaveState {
    pub ringbase_reset: u64,
    pub flash_nic_ctrl: u64,
    pub int_status: u64,
    pub int_mask: u64,
    pub msc: u64,
    pub ust: u64,
    pub ust_msc: u64,
    pub compare1: u64,
    pub compare2: u64,
    pub compare3: u64,
    pub ain_msc_ust: u64,
    pub aout1_msc_ust: u64,
    pub aout2_msc_ust: u64,
    pub vin1_msc_ust: u64,
    pub vin2_msc_ust: u64,
    pub vout_msc_ust: u64,
}

impl SaveState {
    const MAGIC: u64 = u64::from_le_bytes(*b"MACESAVE");
    const VERSION: u32 = 1;
    const NUM_FIELDS: usize = size_of::<SaveState>() / size_of::<u64>();

    pub fn read_from(reader: &mut impl Read) -> Result<SaveState, SaveStateError> {
        let magic = reader.read_u64()?;
        if magic != Self::MAGIC {
            return Err(SaveStateError::BadMagic(magic));
        }

        let version = reader.read_u32()?;
        if version != Self::VERSION {
            return Err(SaveStateError::Version(version));
        }

        let mut fields = [0u64; Self::NUM_FIELDS];
        for field in fields.iter_mut() {
            *field = reader.read_u64()?;
        }
        let save: SaveState = bytemuck::cast(fields);
        save.validate()?;
        Ok(save)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), SaveStateError> {
        writer.write_u64(Self::MAGIC)?;
        writer.write_u32(Self::VERSION)?;
        for field in bytemuck::cast_ref::<SaveState, [u64; Self::NUM_FIELDS]>(self) {
            writer.write_u64(*field)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SaveStateError> {
        for (name, val) in [("UST", self.ust), ("MSC", self.msc)] {
            if val > u32::MAX as u64 {
                return Err(SaveStateError::CounterRange { name, val });
            }
        }
        if self.ust_msc != join(self.ust as u32, self.msc as u32) {
            return Err(SaveStateError::Timebase {
                ust_msc: self.ust_msc,
                ust: self.ust,
                msc: self.msc,
            });
        }
        Ok(())
    }
}
