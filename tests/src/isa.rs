use common::constants::FULL_MASK;
use mace_lib::io::isa::{IsaRegs, StatusWritePolicy};
use mace_lib::io::rtc::NullRtc;
use mace_lib::{Mace, MaceConfig};

use std::sync::Arc;

const RINGBASE_RESET: u32 = 0x31_0000;
const FLASH_NIC_CTRL: u32 = 0x31_0008;
const INT_STATUS: u32 = 0x31_0010;
const INT_MASK: u32 = 0x31_0018;
const COMPARE1: u32 = 0x34_0008;

fn mace_with(status_write: StatusWritePolicy) -> Mace {
    let config = MaceConfig {
        status_write,
        ..Default::default()
    };
    let mut mace = Mace::with_config(config, Arc::new(NullRtc()));
    mace.reset();
    mace
}

#[test]
fn ringbase_passthrough() {
    let mut mace = mace_with(StatusWritePolicy::Ignore);
    mace.write(RINGBASE_RESET, 0xABCD, FULL_MASK);
    assert_eq!(mace.read(RINGBASE_RESET, FULL_MASK), 0xABCD);
    assert_eq!(mace.get_state().isa().ringbase_reset, 0xABCD);
}

#[test]
fn flash_nic_ctrl_fields() {
    let mut mace = mace_with(StatusWritePolicy::Ignore);
    mace.write(FLASH_NIC_CTRL, 0x31, FULL_MASK);
    assert_eq!(mace.read(FLASH_NIC_CTRL, FULL_MASK), 0x31);

    let ctrl = mace.get_state().isa().flash_nic_ctrl();
    assert!(ctrl.get_flash_write_enable());
    assert!(ctrl.get_red_led());
    assert!(ctrl.get_green_led());
    assert!(!ctrl.get_nic_data());
    assert!(!ctrl.get_dpram_enable());
}

#[test]
fn int_mask_read_write() {
    let mut mace = mace_with(StatusWritePolicy::Ignore);
    mace.write(INT_MASK, 0xe000, FULL_MASK);
    assert_eq!(mace.read(INT_MASK, FULL_MASK), 0xe000);
    assert_eq!(mace.int_mask(), 0xe000);
}

#[test]
fn status_write_ignored_by_default() {
    let mut mace = mace_with(StatusWritePolicy::Ignore);
    mace.write(COMPARE1, 0x0000_0001_0000_0000, FULL_MASK);
    mace.ust_tick();
    mace.write(INT_STATUS, FULL_MASK, FULL_MASK);
    mace.write(INT_STATUS, 0, FULL_MASK);
    assert_eq!(mace.read(INT_STATUS, FULL_MASK), IsaRegs::INT_COMPARE1);
}

#[test]
fn status_write_one_to_clear() {
    let mut mace = mace_with(StatusWritePolicy::WriteOneToClear);
    mace.write(COMPARE1, 0x0000_0001_0000_0000, FULL_MASK);
    mace.write(0x34_0010, 0x0000_0001_0000_0000, FULL_MASK);
    mace.ust_tick();
    assert_eq!(
        mace.int_status(),
        IsaRegs::INT_COMPARE1 | IsaRegs::INT_COMPARE2
    );

    mace.write(INT_STATUS, IsaRegs::INT_COMPARE2, FULL_MASK);
    assert_eq!(mace.int_status(), IsaRegs::INT_COMPARE1);

    // Bits outside the lane mask aren't cleared.
    mace.write(INT_STATUS, IsaRegs::INT_COMPARE1, 0xffff_ffff_0000_0000);
    assert_eq!(mace.int_status(), IsaRegs::INT_COMPARE1);
}

#[test]
fn unknown_isa_register() {
    let mut mace = mace_with(StatusWritePolicy::Ignore);
    let before = mace.get_state().clone();
    mace.write(0x31_0020, u64::MAX, FULL_MASK);
    assert_eq!(mace.read(0x31_0020, FULL_MASK), 0);
    assert_eq!(mace.get_state(), &before);
}

#[test]
fn partial_lane_writes_store_whole_value() {
    let mut mace = mace_with(StatusWritePolicy::Ignore);
    mace.write(RINGBASE_RESET, 0x1111_2222_3333_4444, FULL_MASK);
    mace.write(RINGBASE_RESET, 0xaaaa_bbbb_cccc_dddd, 0x0000_0000_ffff_ffff);
    assert_eq!(mace.read(RINGBASE_RESET, FULL_MASK), 0xaaaa_bbbb_cccc_dddd);

    mace.write(FLASH_NIC_CTRL, 0x40, 0xff00);
    assert_eq!(mace.read(FLASH_NIC_CTRL, FULL_MASK), 0x40);
}
