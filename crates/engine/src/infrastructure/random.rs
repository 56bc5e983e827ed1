//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed random for testing. The value is clamped into the requested range.
#[cfg(test)]
pub struct FixedRandom(pub u32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max.max(min))
    }
}

/// Scripted random for testing.
///
/// Hands out the queued values in order, each clamped into the requested
/// range. Once the script runs dry every draw returns `min`.
#[cfg(test)]
pub struct SequenceRandom {
    values: std::sync::Mutex<std::collections::VecDeque<u32>>,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: std::sync::Mutex::new(values.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        let next = self
            .values
            .lock()
            .ok()
            .and_then(|mut values| values.pop_front());
        next.map(|v| v.clamp(min, max.max(min))).unwrap_or(min)
    }
}
