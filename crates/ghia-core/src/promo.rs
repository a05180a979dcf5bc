//! New-arrivals countdown banner.

use std::time::Duration;

/// A daily countdown, ticked once per second by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u64,
    start_secs: u64,
}

impl Countdown {
    pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(length: Duration) -> Self {
        Self {
            remaining_secs: length.as_secs(),
            start_secs: length.as_secs(),
        }
    }

    pub fn daily() -> Self {
        Self::new(Self::DAY)
    }

    /// Take one second off, stopping at zero. Returns whether time is left.
    pub fn tick(&mut self) -> bool {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        !self.is_finished()
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.start_secs;
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_secs)
    }

    /// `HH:MM:SS`, zero padded.
    pub fn format(&self) -> String {
        let hours = self.remaining_secs / 3600;
        let minutes = (self.remaining_secs % 3600) / 60;
        let seconds = self.remaining_secs % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::daily()
    }
}
