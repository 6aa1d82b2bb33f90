use exam_core::format_clock;

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u32),
    /// Returned once, on the tick that reaches zero.
    Expired,
    Stopped,
}

/// Decrementing exam clock. `tick` is the only writer of the remaining time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_seconds: u32,
    remaining_seconds: u32,
    stopped: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(total_seconds: u32) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            stopped: false,
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.stopped = true;
            return Tick::Expired;
        }
        Tick::Running(self.remaining_seconds)
    }

    /// Freeze the clock. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds - self.remaining_seconds
    }

    /// Remaining time as `M:SS`.
    #[must_use]
    pub fn label(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_down_and_expires_once() {
        let mut countdown = Countdown::new(3);
        assert_eq!(countdown.tick(), Tick::Running(2));
        assert_eq!(countdown.tick(), Tick::Running(1));
        assert_eq!(countdown.tick(), Tick::Expired);
        assert_eq!(countdown.tick(), Tick::Stopped);
        assert_eq!(countdown.tick(), Tick::Stopped);
        assert_eq!(countdown.remaining_seconds(), 0);
        assert_eq!(countdown.elapsed_seconds(), 3);
    }

    #[test]
    fn stop_freezes_remaining_time() {
        let mut countdown = Countdown::new(10);
        countdown.tick();
        countdown.stop();
        countdown.stop();
        assert_eq!(countdown.tick(), Tick::Stopped);
        assert_eq!(countdown.remaining_seconds(), 9);
        assert_eq!(countdown.elapsed_seconds(), 1);
    }

    #[test]
    fn label_is_minutes_and_padded_seconds() {
        let mut countdown = Countdown::new(5400);
        assert_eq!(countdown.label(), "90:00");
        countdown.tick();
        assert_eq!(countdown.label(), "89:59");
        assert_eq!(Countdown::new(65).label(), "1:05");
    }
}
