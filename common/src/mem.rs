use std::io::{self, Read, Write};

pub fn upper(val: u64) -> u32 {
    (val >> u32::BITS) as u32
}

pub fn lower(val: u64) -> u32 {
    val as u32
}

pub fn join(upper: u32, lower: u32) -> u64 {
    ((upper as u64) << u32::BITS) | lower as u64
}

////////////////////////////////////////////////////////////////////////////////

pub trait ReadU64 {
    fn read_u32(&mut self) -> io::Result<u32>;
    fn read_u64(&mut self) -> io::Result<u64>;
}

impl<T: Read> ReadU64 for T {
    fn read_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

////////////////////////////////////////////////////////////////////////////////

pub trait WriteU64 {
    fn write_u32(&mut self, val: u32) -> io::Result<()>;
    fn write_u64(&mut self, val: u64) -> io::Result<()>;
}

impl<T: Write> WriteU64 for T {
    fn write_u32(&mut self, val: u32) -> io::Result<()> {
        self.write_all(&val.to_le_bytes())
    }

    fn write_u64(&mut self, val: u64) -> io::Result<()> {
        self.write_all(&val.to_le_bytes())
    }
}
