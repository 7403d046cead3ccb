// Single-threaded timeline for the device's periodic timers.
//
// Time is kept in nanoseconds. Timers are polled in expiry order by whoever owns the
// scheduler; nothing here runs on its own.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(usize);

#[derive(Debug, Clone, Copy)]
struct Timer<E> {
    event: E,
    expire: Option<u64>,
    period: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: u64,
    timers: Vec<Timer<E>>,
}

impl<E: Copy> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_nanos(dur: Duration) -> u64 {
    u64::try_from(dur.as_nanos()).unwrap_or(u64::MAX)
}

impl<E: Copy> Scheduler<E> {
    pub fn new() -> Self {
        Scheduler {
            now: 0,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        Duration::from_nanos(self.now)
    }

    pub fn now_nanos(&self) -> u64 {
        self.now
    }

    /// Allocates a disarmed timer that yields `event` each time it expires.
    pub fn alloc(&mut self, event: E) -> TimerId {
        self.timers.push(Timer {
            event,
            expire: None,
            period: None,
        });
        TimerId(self.timers.len() - 1)
    }

    /// Arms `id` to fire `start` from now, then every `period` after that. A `start` of
    /// `None` disarms it. A zero period makes it one-shot.
    pub fn adjust(&mut self, id: TimerId, start: Option<Duration>, period: Option<Duration>) {
        let now = self.now;
        let timer = &mut self.timers[id.0];
        timer.expire = start.map(|start| now.saturating_add(to_nanos(start)));
        timer.period = period.map(to_nanos).filter(|&period| period != 0);
    }

    pub fn disarm(&mut self, id: TimerId) {
        self.adjust(id, None, None);
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers[id.0].expire.is_some()
    }

    pub fn next_expiry(&self) -> Option<u64> {
        self.timers.iter().filter_map(|timer| timer.expire).min()
    }

    /// Pops the earliest timer expiring at or before `deadline`, moving `now` up to its
    /// expiry and re-arming it if periodic. Ties go to the timer allocated first.
    pub fn pop_until(&mut self, deadline: u64) -> Option<E> {
        let (idx, expire) = self
            .timers
            .iter()
            .enumerate()
            .filter_map(|(idx, timer)| Some((idx, timer.expire?)))
            .filter(|&(_, expire)| expire <= deadline)
            .min_by_key(|&(idx, expire)| (expire, idx))?;

        self.now = self.now.max(expire);
        let timer = &mut self.timers[idx];
        timer.expire = timer.period.map(|period| expire.saturating_add(period));
        Some(timer.event)
    }

    pub fn advance_to(&mut self, deadline: u64) {
        self.now = self.now.max(deadline);
    }
}
