//! Random Source - The domain's only window onto chance
//!
//! Stealing a key, rotating door requirements and the automated
//! player's "thinking" delay all need randomness. The domain asks
//! for it through this port so the rules stay deterministic under test.

/// Random Source Trait
///
/// This is a PORT. The adapter layer provides a `rand`-backed
/// implementation; tests use [`SequenceRandom`].
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform value in `min..=max`. Callers guarantee `min <= max`.
    fn between(&mut self, min: u64, max: u64) -> u64;
}

/// Scripted random source
///
/// Replays a fixed sequence of raw values, wrapping around when exhausted.
/// `index(len)` yields `value % len`; `between(min, max)` yields
/// `min + value % (max - min + 1)`. An empty script always yields the
/// lowest possible value.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<u64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    fn next_raw(&mut self) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for SequenceRandom {
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() on an empty range");
        (self.next_raw() % len.max(1) as u64) as usize
    }

    fn between(&mut self, min: u64, max: u64) -> u64 {
        debug_assert!(min <= max, "between() with min > max");
        let span = max.saturating_sub(min).saturating_add(1);
        min + self.next_raw() % span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_wraps() {
        let mut rng = SequenceRandom::new([1, 5]);
        assert_eq!(rng.index(3), 1);
        assert_eq!(rng.index(3), 2);
        assert_eq!(rng.index(3), 1);
    }

    #[test]
    fn test_between_stays_in_range() {
        let mut rng = SequenceRandom::new([0, 999, 2000, 2001]);
        for _ in 0..4 {
            let v = rng.between(1000, 3000);
            assert!((1000..=3000).contains(&v));
        }
    }

    #[test]
    fn test_empty_script_yields_minimum() {
        let mut rng = SequenceRandom::default();
        assert_eq!(rng.index(4), 0);
        assert_eq!(rng.between(7, 9), 7);
    }
}
