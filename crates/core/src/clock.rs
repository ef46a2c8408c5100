//! Clock module - pausable, countable repeating tick scheduler
//!
//! The clock runs on virtual time: callers feed elapsed milliseconds through
//! [`Clock::advance`] (or one tick at a time through [`Clock::step`]) and due
//! ticks fire in order. A stopped or paused clock never fires.
//!
//! Every transition mutates the clock first and then queues its event, so an
//! event's snapshot always describes the state the transition produced. Each tick
//! queues `Uptick` and `Downtick` carrying the tick count from before the tick.

use crate::types::ClockState;

/// Clock state captured when an event is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockSnapshot {
    pub state: ClockState,
    pub delay_ms: u32,
    pub ticks: u32,
    pub max_ticks: Option<u32>,
}

/// Clock notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockEvent {
    Start(ClockSnapshot),
    Stop(ClockSnapshot),
    Restart(ClockSnapshot),
    Pause(ClockSnapshot),
    Resume(ClockSnapshot),
    Uptick(ClockSnapshot),
    Downtick(ClockSnapshot),
}

impl ClockEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClockEvent::Start(_) => "start",
            ClockEvent::Stop(_) => "stop",
            ClockEvent::Restart(_) => "restart",
            ClockEvent::Pause(_) => "pause",
            ClockEvent::Resume(_) => "resume",
            ClockEvent::Uptick(_) => "uptick",
            ClockEvent::Downtick(_) => "downtick",
        }
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        match *self {
            ClockEvent::Start(s)
            | ClockEvent::Stop(s)
            | ClockEvent::Restart(s)
            | ClockEvent::Pause(s)
            | ClockEvent::Resume(s)
            | ClockEvent::Uptick(s)
            | ClockEvent::Downtick(s) => s,
        }
    }
}

/// Repeating tick scheduler
#[derive(Debug, Clone)]
pub struct Clock {
    state: ClockState,
    delay_ms: u32,
    ticks: u32,
    max_ticks: Option<u32>,
    /// Time left until the scheduled tick; `None` when nothing is scheduled
    pending_ms: Option<u32>,
    events: Vec<ClockEvent>,
}

impl Clock {
    /// Create a stopped clock with the given interval
    pub fn new(delay_ms: u32) -> Self {
        Self {
            state: ClockState::Stopped,
            delay_ms,
            ticks: 0,
            max_ticks: None,
            pending_ms: None,
            events: Vec::new(),
        }
    }

    /// Stop after `max_ticks` ticks
    pub fn with_max_ticks(mut self, max_ticks: Option<u32>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Ticks fired since the last restart
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn max_ticks(&self) -> Option<u32> {
        self.max_ticks
    }

    /// Milliseconds until the scheduled tick, if one is scheduled
    pub fn time_until_tick(&self) -> Option<u32> {
        self.pending_ms
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            state: self.state,
            delay_ms: self.delay_ms,
            ticks: self.ticks,
            max_ticks: self.max_ticks,
        }
    }

    /// Start a stopped clock or resume a paused one
    pub fn start(&mut self) {
        match self.state {
            ClockState::Running => {}
            ClockState::Stopped => {
                self.state = ClockState::Running;
                self.schedule();
                self.emit(ClockEvent::Start);
            }
            ClockState::Paused => {
                self.state = ClockState::Running;
                self.schedule();
                self.emit(ClockEvent::Resume);
            }
        }
    }

    /// Cancel the pending tick and stop, from any state
    pub fn stop(&mut self) {
        self.pending_ms = None;
        self.state = ClockState::Stopped;
        self.emit(ClockEvent::Stop);
    }

    /// Suspend a running clock; the tick counter is kept
    pub fn pause(&mut self) {
        if self.state != ClockState::Running {
            return;
        }
        self.pending_ms = None;
        self.state = ClockState::Paused;
        self.emit(ClockEvent::Pause);
    }

    /// Stop if needed and reset the tick counter; the clock stays stopped
    pub fn restart(&mut self) {
        if self.state != ClockState::Stopped {
            self.stop();
        }
        self.ticks = 0;
        self.emit(ClockEvent::Restart);
    }

    /// Change the interval; a running clock reschedules its pending tick
    pub fn set_delay(&mut self, delay_ms: u32) {
        self.delay_ms = delay_ms;
        if self.state == ClockState::Running {
            self.schedule();
        }
    }

    /// Push the pending tick a full interval into the future
    pub fn reschedule(&mut self) {
        if self.state == ClockState::Running {
            self.schedule();
        }
    }

    /// Consume up to `*budget_ms` of elapsed time.
    ///
    /// Returns `true` when the scheduled tick came due and was processed; the
    /// budget is reduced by the time spent reaching it. Returns `false` once the
    /// budget cannot reach a tick (or none is scheduled).
    pub fn step(&mut self, budget_ms: &mut u32) -> bool {
        let Some(remaining) = self.pending_ms else {
            return false;
        };
        if *budget_ms < remaining {
            self.pending_ms = Some(remaining - *budget_ms);
            *budget_ms = 0;
            return false;
        }

        *budget_ms -= remaining;
        self.pending_ms = None;
        self.tick();
        true
    }

    /// Feed elapsed time and process every tick that comes due.
    /// Returns how many scheduled ticks were processed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut budget = elapsed_ms;
        let mut fired = 0;
        while self.step(&mut budget) {
            fired += 1;
        }
        fired
    }

    /// Take every queued event, oldest first
    pub fn take_events(&mut self) -> Vec<ClockEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn tick(&mut self) {
        if let Some(max) = self.max_ticks {
            if self.ticks >= max {
                self.stop();
                return;
            }
        }

        self.schedule();
        self.emit(ClockEvent::Uptick);
        self.emit(ClockEvent::Downtick);
        self.ticks += 1;
    }

    fn schedule(&mut self) {
        self.pending_ms = Some(self.delay_ms.max(1));
    }

    fn emit(&mut self, make: fn(ClockSnapshot) -> ClockEvent) {
        let snapshot = self.snapshot();
        self.events.push(make(snapshot));
    }
}
