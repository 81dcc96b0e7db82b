//! Simulation clocks.
//!
//! Every timed rule (frame delays, cooldowns, spawn timer, seed-drop
//! lifetime) reads the clock once per tick.

/// Monotonic source of tick timestamps in milliseconds.
pub trait Clock {
    /// Timestamp of the tick about to run.
    fn now_ms(&self) -> f64;
    /// Move on to the next tick.
    fn advance(&mut self);
}

/// Clock that advances a fixed step per tick.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step_ms: f64,
    elapsed_ms: f64,
}

impl FixedStepClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            elapsed_ms: 0.0,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }

    fn advance(&mut self) {
        self.elapsed_ms += self.step_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step() {
        let mut clock = FixedStepClock::new(20.0);
        assert_eq!(clock.now_ms(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now_ms(), 40.0);
    }
}
