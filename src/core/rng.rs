//! Random number plumbing shared by loot generation and combat.
//!
//! Every random decision in the crate is a single uniform draw in `[0, 1)`
//! taken through [`roll`], so any `rand::Rng` can drive the game and a
//! [`ScriptedRng`] can replay an exact sequence of decisions in tests.

use rand::{Error, Rng, RngCore};

/// Draws one uniform value in `[0, 1)`.
pub fn roll(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>()
}

/// Picks an index in `0..len` with one uniform draw. `len` must be non-zero.
pub fn pick_index(rng: &mut impl Rng, len: usize) -> usize {
    let index = (roll(rng) * len as f64) as usize;
    index.min(len.saturating_sub(1))
}

/// Shuffles a slice in place (Fisher-Yates), one draw per swap.
pub fn shuffle<T>(rng: &mut impl Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = pick_index(rng, i + 1);
        items.swap(i, j);
    }
}

/// Deterministic RNG that replays a fixed list of `[0, 1)` rolls.
///
/// `rng.gen::<f64>()` on this source returns the scripted values in order,
/// cycling back to the start when the list is exhausted. Values are snapped
/// to the 2^-53 grid rand samples on, so dyadic rolls (0.5, 0.25, ...)
/// come back bit-exact and others within one grid step. Byte fills (used
/// for item ids) come from an internal counter and do not consume rolls.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    rolls: Vec<f64>,
    cursor: usize,
    fill_counter: u64,
}

impl ScriptedRng {
    pub fn new(rolls: Vec<f64>) -> Self {
        Self {
            rolls,
            cursor: 0,
            fill_counter: 0,
        }
    }

    /// A source that always rolls the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of rolls consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_roll(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}

// rand's f64 sampling keeps the top 53 bits of `next_u64` and scales by 2^-53.
const F64_MANTISSA_BITS: u32 = 53;

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.next_roll().clamp(0.0, 1.0 - f64::EPSILON);
        let mantissa = (value * (1u64 << F64_MANTISSA_BITS) as f64) as u64;
        mantissa << (64 - F64_MANTISSA_BITS)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            self.fill_counter = self.fill_counter.wrapping_add(1);
            let bytes = self.fill_counter.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_rng_replays_rolls() {
        let mut rng = ScriptedRng::new(vec![0.25, 0.5, 0.75]);
        assert_eq!(roll(&mut rng), 0.25);
        assert_eq!(roll(&mut rng), 0.5);
        assert_eq!(roll(&mut rng), 0.75);
        // Cycles
        assert_eq!(roll(&mut rng), 0.25);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_scripted_rng_zero_roll() {
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(roll(&mut rng), 0.0);
    }

    #[test]
    fn test_pick_index_bounds() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.999, 0.5]);
        assert_eq!(pick_index(&mut rng, 4), 0);
        assert_eq!(pick_index(&mut rng, 4), 3);
        assert_eq!(pick_index(&mut rng, 4), 2);
    }

    #[test]
    fn test_fill_bytes_does_not_consume_rolls() {
        let mut rng = ScriptedRng::new(vec![0.125, 0.5]);
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        assert_eq!(rng.consumed(), 0);
        assert_eq!(roll(&mut rng), 0.125);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = ScriptedRng::new(vec![0.3, 0.9, 0.1]);
        let mut items = vec![1, 2, 3, 4];
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }
}
