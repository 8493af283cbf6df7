use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running; nothing happened.
    Ignored,
    /// One or more seconds elapsed and time remains.
    Running(u32),
    /// The tick that reached zero. Reported exactly once.
    Expired,
}

/// Whole-second countdown owned by a session.
///
/// Time is fed in from the event loop through [`Countdown::advance`] (or one
/// second at a time through [`Countdown::tick`]). Ticks outside the `Running`
/// state are no-ops, so a tick racing a session that already ended cannot
/// fire the expiry a second time.
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining: u32,
    state: TimerState,
    anchor: Option<Instant>,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds.max(1),
            state: TimerState::Idle,
            anchor: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.state == TimerState::Idle {
            self.state = TimerState::Running;
            self.anchor = Some(now);
        }
    }

    /// Apply every whole second elapsed since the last applied tick.
    pub fn advance(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::Ignored;
        while self.state == TimerState::Running {
            let Some(anchor) = self.anchor else { break };
            if now.saturating_duration_since(anchor) < TICK {
                break;
            }
            self.anchor = Some(anchor + TICK);
            outcome = self.tick();
        }
        outcome
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            self.anchor = None;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    /// Stop without expiring. Idempotent; a no-op once expired.
    pub fn cancel(&mut self) {
        if matches!(self.state, TimerState::Idle | TimerState::Running) {
            self.state = TimerState::Cancelled;
            self.anchor = None;
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }
}
