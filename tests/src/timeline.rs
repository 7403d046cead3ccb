use common::constants::FULL_MASK;
use mace_lib::Mace;
use mace_lib::io::isa::IsaRegs;
use mace_lib::io::rtc::NullRtc;
use mace_lib::sched::Scheduler;

use std::sync::Arc;
use std::time::Duration;

fn mace() -> Mace {
    let mut mace = Mace::new(Arc::new(NullRtc()));
    mace.reset();
    mace
}

#[test]
fn rates() {
    let mut mace = mace();
    mace.run_for(Duration::from_millis(10));
    // 10_000_000 / 960 = 10416.67
    assert_eq!(mace.ust(), 10_416);
    assert_eq!(mace.msc(), 10);
}

#[test]
fn just_before_first_tick() {
    let mut mace = mace();
    mace.run_for(Duration::from_nanos(959));
    assert_eq!(mace.ust(), 0);
    mace.run_for(Duration::from_nanos(1));
    assert_eq!(mace.ust(), 1);
}

#[test]
fn compare_hits_on_msc_boundary() {
    let mut mace = mace();
    // At 1ms the UST timer has fired 1041 times, then MSC fires.
    mace.write(0x34_0010, (1041 << 32) | 1, FULL_MASK);
    mace.run_for(Duration::from_micros(999));
    assert_eq!(mace.int_status(), 0);
    mace.run_for(Duration::from_micros(1));
    assert_eq!(mace.int_status(), IsaRegs::INT_COMPARE2);
}

#[test]
fn scheduler_ties_in_alloc_order() {
    let mut sched = Scheduler::new();
    let a = sched.alloc('a');
    let b = sched.alloc('b');
    let period = Duration::from_nanos(10);
    sched.adjust(b, Some(period), Some(period));
    sched.adjust(a, Some(period), Some(period));

    let mut fired = Vec::new();
    while let Some(event) = sched.pop_until(20) {
        fired.push(event);
    }
    assert_eq!(fired, ['a', 'b', 'a', 'b']);
}

#[test]
fn scheduler_one_shot() {
    let mut sched = Scheduler::new();
    let id = sched.alloc(1u8);
    sched.adjust(id, Some(Duration::from_nanos(5)), None);
    assert_eq!(sched.next_expiry(), Some(5));
    assert_eq!(sched.pop_until(100), Some(1));
    assert_eq!(sched.pop_until(100), None);
    assert!(!sched.is_armed(id));
}
