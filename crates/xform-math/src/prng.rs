// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::{MathError, Result};

/// Seeded `xoroshiro128+` generator behind [`crate::Vec3::random`] and
/// [`crate::Quat::random`].
///
/// * Not cryptographically secure.
/// * Matching seeds yield identical sequences on every platform, so random
///   scenes and test inputs are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

const SPLITMIX_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

impl Prng {
    /// Constructs a generator from two 64-bit seeds.
    ///
    /// An all-zero state would lock the generator at zero, so it is nudged.
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        let mut state = [seed0, seed1];
        if state == [0, 0] {
            state[0] = SPLITMIX_GAMMA;
        }
        Self { state }
    }

    /// Constructs a generator from a single 64-bit seed via SplitMix64 expansion.
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(SPLITMIX_GAMMA);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let first = splitmix64(&mut sm_state);
        let second = splitmix64(&mut sm_state);
        Self::from_seed(first, second)
    }

    fn next_u64(&mut self) -> u64 {
        let [s0, mut s1] = self.state;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state = [s0.rotate_left(55) ^ s1 ^ (s1 << 14), s1.rotate_left(36)];

        result
    }

    /// Returns the next float in `[0, 1)`.
    ///
    /// The top 23 bits of the output fill the mantissa of a float in
    /// `[1, 2)`, which is then shifted down by one.
    pub fn next_f32(&mut self) -> f32 {
        #[allow(clippy::cast_possible_truncation)]
        let bits = ((self.next_u64() >> 41) as u32) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Returns the next float in `[min, max)`.
    ///
    /// Fails with [`MathError::InvalidRange`] when `min > max`.
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> Result<f32> {
        if min > max {
            return Err(MathError::InvalidRange);
        }
        Ok(self.next_f32() * (max - min) + min)
    }

    /// Returns the next integer in the inclusive range `[min, max]`.
    ///
    /// Uses rejection sampling to avoid modulo bias.
    pub fn next_int(&mut self, min: i32, max: i32) -> Result<i32> {
        if min > max {
            return Err(MathError::InvalidRange);
        }
        #[allow(clippy::cast_sign_loss)]
        let span = (i64::from(max) - i64::from(min)) as u64 + 1;
        if span == 1 {
            return Ok(min);
        }

        let value = if span.is_power_of_two() {
            self.next_u64() & (span - 1)
        } else {
            let bound = u64::MAX - u64::MAX % span;
            loop {
                let candidate = self.next_u64();
                if candidate < bound {
                    break candidate % span;
                }
            }
        };

        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let offset = (value as i64 + i64::from(min)) as i32;
        Ok(offset)
    }
}
