//! Virtual-clock timers with one live slot per purpose.
//!
//! Time only moves through [`Timers::next_due`] and [`Timers::settle`], which the frame loop calls
//! with the frame duration and tests call with whatever they want to simulate.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    /// End of a slide's display period.
    AutoplayAdvance,
    /// End of the slide swap started by a navigation.
    TransitionComplete,
}

const PURPOSES: [TimerPurpose; 2] = [TimerPurpose::AutoplayAdvance, TimerPurpose::TransitionComplete];

impl TimerPurpose {
    fn slot(self) -> usize {
        match self {
            TimerPurpose::AutoplayAdvance => 0,
            TimerPurpose::TransitionComplete => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    purpose: TimerPurpose,
    generation: u64,
}

impl TimerHandle {
    pub fn purpose(&self) -> TimerPurpose {
        self.purpose
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TimerHandle,
    deadline_ms: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    now_ms: u64,
    next_generation: u64,
    slots: [Option<Pending>; 2],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedules `purpose` to fire after `delay_ms`, replacing any pending
    /// timer of the same purpose.
    pub fn schedule(&mut self, purpose: TimerPurpose, delay_ms: u64) -> TimerHandle {
        self.next_generation += 1;
        let handle = TimerHandle {
            purpose,
            generation: self.next_generation,
        };
        self.slots[purpose.slot()] = Some(Pending {
            handle,
            deadline_ms: self.now_ms.saturating_add(delay_ms),
        });
        handle
    }

    pub fn cancel(&mut self, purpose: TimerPurpose) -> Option<TimerHandle> {
        self.slots[purpose.slot()].take().map(|pending| pending.handle)
    }

    pub fn cancel_all(&mut self) {
        self.slots = [None, None];
    }

    pub fn pending(&self, purpose: TimerPurpose) -> Option<TimerHandle> {
        self.slots[purpose.slot()].map(|pending| pending.handle)
    }

    pub fn is_pending(&self, purpose: TimerPurpose) -> bool {
        self.slots[purpose.slot()].is_some()
    }

    pub fn remaining_ms(&self, purpose: TimerPurpose) -> Option<u64> {
        self.slots[purpose.slot()].map(|pending| pending.deadline_ms.saturating_sub(self.now_ms))
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock
    /// to its deadline. Callers loop until `None`, then call [`Timers::settle`].
    pub fn next_due(&mut self, until_ms: u64) -> Option<TimerPurpose> {
        let due = PURPOSES
            .iter()
            .filter_map(|purpose| self.slots[purpose.slot()])
            .filter(|pending| pending.deadline_ms <= until_ms)
            .min_by_key(|pending| (pending.deadline_ms, pending.handle.generation))?;

        self.slots[due.handle.purpose.slot()] = None;
        self.now_ms = self.now_ms.max(due.deadline_ms);
        Some(due.handle.purpose)
    }

    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
