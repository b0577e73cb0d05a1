//! Random value source for the simulated lookups
//!
//! A seeded ChaCha stream, so runs with a fixed seed replay the same guesses.

use rand_chacha::{
    ChaCha20Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::constants::{GUESSABLE_NATIONS, RATING_MAX, RATING_MIN};
use crate::messages::LookupKind;
use crate::models::Developer;

pub struct Oracle {
    rng: ChaCha20Rng,
}

impl Oracle {
    pub fn new(seed: u64) -> Self {
        Oracle {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f64 {
        // 53 random mantissa bits
        (self.rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick one of the candidate nations
    pub fn guess_nation(&mut self) -> &'static str {
        let index = (self.next_unit() * GUESSABLE_NATIONS.len() as f64) as usize;
        GUESSABLE_NATIONS[index.min(GUESSABLE_NATIONS.len() - 1)]
    }

    /// Rating in [8.0, 10.0], rounded to one decimal
    pub fn rate(&mut self) -> f64 {
        let raw = RATING_MIN + self.next_unit() * (RATING_MAX - RATING_MIN);
        round_one_decimal(raw)
    }

    /// The developer as the lookup would return it
    pub fn resolve(&mut self, kind: LookupKind, developer: &Developer) -> Developer {
        match kind {
            LookupKind::GuessNation => developer.with_nation(self.guess_nation()),
            LookupKind::RateDeveloper => developer.with_talent_rank(self.rate()),
        }
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
