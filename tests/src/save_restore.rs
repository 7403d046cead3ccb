use common::constants::FULL_MASK;
use mace_lib::Mace;
use mace_lib::io::rtc::NullRtc;
use savestate::{SaveState, SaveStateError};

use std::sync::Arc;
use std::time::Duration;

fn mace() -> Mace {
    let mut mace = Mace::new(Arc::new(NullRtc()));
    mace.reset();
    mace
}

fn busy_mace() -> Mace {
    let mut mace = mace();
    mace.write(0x31_0000, 0xabcd, FULL_MASK);
    mace.write(0x31_0008, 0x30, FULL_MASK);
    mace.write(0x31_0018, 0xe000, FULL_MASK);
    mace.write(0x34_0008, 0x0000_0010_0000_0000, FULL_MASK);
    mace.write(0x34_0018, 0x1234_5678_9abc_def0, FULL_MASK);
    mace.run_for(Duration::from_millis(2));
    mace
}

#[test]
fn round_trip_through_bytes() {
    let mace = busy_mace();
    let mut buf = Vec::new();
    mace.save_state().write_to(&mut buf).unwrap();

    let mut other = self::mace();
    other.restore_state(&SaveState::read_from(&mut buf.as_slice()).unwrap());
    assert_eq!(other.get_state(), mace.get_state());
    assert_eq!(other.ust_msc(), mace.ust_msc());
    assert_eq!(other.int_status(), mace.int_status());
}

#[test]
fn restored_counters_keep_counting() {
    let mace = busy_mace();
    let save = mace.save_state();
    assert_eq!(save.msc, 2);

    let mut other = self::mace();
    other.restore_state(&save);
    other.msc_tick();
    assert_eq!(other.msc(), 3);
    assert_eq!(other.ust(), mace.ust());
}

#[test]
fn corrupt_image_rejected() {
    let mut buf = Vec::new();
    let save = SaveState {
        ust: 5,
        ust_msc: 0x0000_0006_0000_0000,
        ..Default::default()
    };
    save.write_to(&mut buf).unwrap();
    assert!(matches!(
        SaveState::read_from(&mut buf.as_slice()),
        Err(SaveStateError::Timebase { .. })
    ));
}
