use std::time::{Duration, Instant};

/// Paces the tick loop: one deadline at a time, restarted with whichever
/// period applies next (tick interval while busy, idle poll otherwise).
#[derive(Clone, Copy, Debug)]
pub struct TickTimer {
    start_time: Instant,
    period: Duration,
}

impl TickTimer {
    pub fn new(period: Duration) -> TickTimer {
        TickTimer {
            start_time: Instant::now(),
            period,
        }
    }

    pub fn start(&mut self, period: Duration) {
        self.start_time = Instant::now();
        self.period = period;
    }

    pub fn deadline(&self) -> Instant {
        self.start_time + self.period
    }
}
