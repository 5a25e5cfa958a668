//! Xorshift128+ PRNG seeded from a single 32-bit integer.
//!
//! The 128-bit state is kept as two 64-bit halves built from four seed words:
//! `[seed, 0x12340123, 0xf8e7d6c5 ^ seed, 0xc00200f0]`. Each draw returns the
//! upper 32 bits of the 64-bit output, so a given seed replays the exact light
//! sequence of earlier versions of the game.

use rand::RngCore;

const SEED_WORD_1: u32 = 0x1234_0123;
const SEED_MASK_2: u32 = 0xf8e7_d6c5;
const SEED_WORD_3: u32 = 0xc002_00f0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift {
    s0: u64,
    s1: u64,
}

impl XorShift {
    pub fn new(seed: i32) -> Self {
        let seed = seed as u32;
        Self::from_words([seed, SEED_WORD_1, SEED_MASK_2 ^ seed, SEED_WORD_3])
    }

    /// Build from raw state words (high/low of the first half, then the second)
    pub fn from_words(words: [u32; 4]) -> Self {
        Self {
            s0: (u64::from(words[0]) << 32) | u64::from(words[1]),
            s1: (u64::from(words[2]) << 32) | u64::from(words[3]),
        }
    }

    /// Advance the state and return the full 64-bit output
    pub fn step(&mut self) -> u64 {
        let mut s1 = self.s0;
        let s0 = self.s1;
        let result = s0.wrapping_add(s1);

        self.s0 = s0;
        s1 ^= s1 << 23;
        self.s1 = s1 ^ s0 ^ (s1 >> 18) ^ (s0 >> 5);

        result
    }

    /// Draw one unsigned 32-bit value
    pub fn draw(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }
}

impl RngCore for XorShift {
    fn next_u32(&mut self) -> u32 {
        self.draw()
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_sequence_seed_one() {
        let mut rng = XorShift::new(1);
        assert_eq!(rng.draw(), 4175943365);
        assert_eq!(rng.draw(), 4170303765);
        assert_eq!(rng.draw(), 1652375288);
        assert_eq!(rng.draw(), 433116939);
        assert_eq!(rng.draw(), 971526900);
    }

    #[test]
    fn test_known_sequence_negative_seed() {
        let mut rng = XorShift::new(-1);
        assert_eq!(rng.draw(), 119023929);
        assert_eq!(rng.draw(), 242104011);
        assert_eq!(rng.draw(), 2758459626);
        assert_eq!(rng.draw(), 4082171827);
        assert_eq!(rng.draw(), 3142520040);
    }

    #[test]
    fn test_raw_output_is_sum_of_halves() {
        let mut rng = XorShift::new(1);
        assert_eq!(rng.step(), 0xf8e7_d6c5_d236_0213);
        assert_eq!(rng.step(), 0xf891_c915_e338_7229);
    }

    #[test]
    fn test_rng_core_matches_draw() {
        let mut a = XorShift::new(777);
        let mut b = XorShift::new(777);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.draw());
        }
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = XorShift::new(5);
        let mut b = XorShift::new(5);
        let mut buf = [0u8; 11];
        a.fill_bytes(&mut buf);
        let first = b.step().to_le_bytes();
        let second = b.step().to_le_bytes();
        assert_eq!(&buf[..8], &first[..]);
        assert_eq!(&buf[8..], &second[..3]);
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_stream(seed in any::<i32>(), draws in 1usize..256) {
            let mut a = XorShift::new(seed);
            let mut b = XorShift::new(seed);
            for _ in 0..draws {
                prop_assert_eq!(a.draw(), b.draw());
            }
        }
    }
}
