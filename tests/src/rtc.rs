use common::Block;
use common::constants::FULL_MASK;
use mace_lib::Mace;
use mace_lib::io::rtc::{RamRtc, RtcAccess, RtcBridge};

use std::sync::Arc;

const RTC: u32 = 0x3a_0000;

fn mace_with_rtc() -> (Mace, Arc<RamRtc>) {
    let rtc = Arc::new(RamRtc::default());
    let mut mace = Mace::new(rtc.clone());
    mace.reset();
    (mace, rtc)
}

#[test]
fn register_index() {
    assert_eq!(RtcBridge::reg_index(0x00), 0);
    assert_eq!(RtcBridge::reg_index(0x20), 1);
    assert_eq!(RtcBridge::reg_index(0x40), 2);
    assert_eq!(RtcBridge::reg_index(0x5f), 2);
}

#[test]
fn byte_address_0x200_is_register_2() {
    let (mut mace, rtc) = mace_with_rtc();
    rtc.poke(2, 0x59);
    assert_eq!(mace.read(RTC + 0x200, FULL_MASK), 0x59);
    assert_eq!(rtc.take_history(), [RtcAccess::Read(2)]);
}

#[test]
fn writes_forward_low_byte() {
    let (mut mace, rtc) = mace_with_rtc();
    mace.write_block(Block::Rtc, 0x40, 0x1234, FULL_MASK);
    assert_eq!(rtc.peek(2), 0x34);
    assert_eq!(rtc.take_history(), [RtcAccess::Write(2, 0x34)]);
}

#[test]
fn history_in_order() {
    let (mut mace, rtc) = mace_with_rtc();
    mace.write(RTC + 0x100, 0x07, FULL_MASK);
    mace.read(RTC + 0x100, FULL_MASK);
    mace.read(RTC, FULL_MASK);
    assert_eq!(
        rtc.take_history(),
        [RtcAccess::Write(1, 0x07), RtcAccess::Read(1), RtcAccess::Read(0)]
    );
    assert!(rtc.take_history().is_empty());
}

#[test]
fn reset_leaves_rtc_alone() {
    let (mut mace, rtc) = mace_with_rtc();
    mace.write(RTC + 0x300, 0x12, FULL_MASK);
    mace.reset();
    assert_eq!(rtc.peek(3), 0x12);
}

#[test]
fn offsets_past_the_block_dont_wrap() {
    let (mut mace, rtc) = mace_with_rtc();
    rtc.poke(0, 0x77);
    // 0x2000 words would land on register 0 if the index wrapped.
    assert_eq!(mace.read_block(Block::Rtc, 0x2000, FULL_MASK), 0);
    mace.write_block(Block::Rtc, 0x2000, 0x55, FULL_MASK);
    mace.write_block(Block::Rtc, 0x1000, 0x55, FULL_MASK);
    assert_eq!(rtc.peek(0), 0x77);
    assert!(rtc.take_history().is_empty());

    // The last word of the block still reaches the device.
    mace.write_block(Block::Rtc, 0x0fff, 0x12, FULL_MASK);
    assert_eq!(rtc.take_history(), [RtcAccess::Write(0x7f, 0x12)]);
}
