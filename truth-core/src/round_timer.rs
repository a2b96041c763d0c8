/// Length of a sudden-death round, regardless of the configured time limit.
pub const SUDDEN_DEATH_SECONDS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// A second elapsed and time remains
    Tick { remaining: u32 },
    /// The countdown reached zero. Emitted once per start.
    Expired,
}

/// Countdown for a single round.
///
/// The timer doesn't own a clock. Whoever drives the match calls
/// [`RoundTimer::tick`] once per elapsed second with the round's
/// `time_left`; the returned signal replaces the tick and expiry callbacks.
/// After expiry or [`RoundTimer::cancel`] further ticks are ignored, so a
/// late tick can never expire a round that was already decided.
#[derive(Debug, Clone, Default)]
pub struct RoundTimer {
    running: bool,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, time_left: &mut u32, seconds: u32) {
        *time_left = seconds;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self, time_left: &mut u32) -> Option<TimerSignal> {
        if !self.running {
            return None;
        }

        *time_left = time_left.saturating_sub(1);
        if *time_left == 0 {
            self.running = false;
            Some(TimerSignal::Expired)
        } else {
            Some(TimerSignal::Tick {
                remaining: *time_left,
            })
        }
    }
}
