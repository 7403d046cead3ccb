use common::Block;
use common::constants::{FULL_MASK, MACE_SIZE};
use mace_lib::Mace;
use mace_lib::io::rtc::NullRtc;
use mace_lib::io::ust_msc::Compare;

use std::sync::Arc;

fn mace() -> Mace {
    let mut mace = Mace::new(Arc::new(NullRtc()));
    mace.reset();
    mace
}

#[test]
fn block_bounds() {
    let expected = [
        (Block::Pci, 0x08_0000, 0x0f_ffff),
        (Block::Vin1, 0x10_0000, 0x17_ffff),
        (Block::Vin2, 0x18_0000, 0x1f_ffff),
        (Block::Vout, 0x20_0000, 0x27_ffff),
        (Block::Enet, 0x28_0000, 0x2f_ffff),
        (Block::Audio, 0x30_0000, 0x30_ffff),
        (Block::Isa, 0x31_0000, 0x31_ffff),
        (Block::Kbdms, 0x32_0000, 0x32_ffff),
        (Block::I2c, 0x33_0000, 0x33_ffff),
        (Block::UstMsc, 0x34_0000, 0x34_ffff),
        (Block::IsaExt, 0x38_0000, 0x39_ffff),
        (Block::Rtc, 0x3a_0000, 0x3a_7fff),
    ];
    for (block, first, last) in expected {
        assert_eq!(Block::decode(first), Some((block, 0)), "{block}");
        assert_eq!(Block::decode(last), Some((block, last - first)), "{block}");
    }
}

#[test]
fn holes() {
    for offset in [0x0, 0x7_fff8, 0x35_0000, 0x37_fff8, 0x3a_8000, MACE_SIZE - 8] {
        assert_eq!(Block::decode(offset), None, "{offset:#x}");
    }
}

#[test]
fn stubs_read_zero_and_keep_state() {
    let mut mace = mace();
    mace.ust_tick();
    let before = mace.get_state().clone();
    for block in Block::iter() {
        if matches!(block, Block::Isa | Block::UstMsc | Block::Rtc) {
            continue;
        }
        mace.write(block.start(), u64::MAX, FULL_MASK);
        mace.write(block.end() - 8, u64::MAX, FULL_MASK);
        assert_eq!(mace.read(block.start(), FULL_MASK), 0, "{block}");
        assert_eq!(mace.read(block.end() - 8, FULL_MASK), 0, "{block}");
    }
    assert_eq!(mace.get_state(), &before);
}

#[test]
fn word_offsets_reach_handlers() {
    let mut mace = mace();
    // Word 1 of the UST/MSC block is compare1.
    mace.write_block(Block::UstMsc, 1, 0x42, FULL_MASK);
    assert_eq!(mace.read(0x34_0008, FULL_MASK), 0x42);
    assert_eq!(mace.get_state().ust_msc().compare(Compare::Compare1), 0x42);
}

#[test]
fn reset_zeroes_everything() {
    let mut mace = mace();
    mace.write(0x31_0000, 0xabcd, FULL_MASK);
    mace.write(0x31_0008, 0x30, FULL_MASK);
    mace.write(0x31_0018, 0xff, FULL_MASK);
    mace.write(0x34_0008, 0x0000_0001_0000_0000, FULL_MASK);
    mace.ust_tick();
    mace.msc_tick();
    assert_ne!(mace.int_status(), 0);

    mace.reset();
    for offset in [0x31_0000, 0x31_0008, 0x31_0010, 0x31_0018, 0x34_0000, 0x34_0008] {
        assert_eq!(mace.read(offset, FULL_MASK), 0, "{offset:#x}");
    }
    assert_eq!(mace.ust(), 0);
    assert_eq!(mace.msc(), 0);
}
