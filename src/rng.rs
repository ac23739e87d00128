//! Linear congruential generator threaded through `GameState` as a value.
//!
//! Uses the GCC constants with a non-standard increment. Nothing here
//! mutates: `int` is a pure function of the current state and `next`
//! returns a successor generator.

use serde::{Deserialize, Serialize};

const A: u64 = 1_103_515_245;
const C: u64 = 42_069;
const M: u64 = 0x8000_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Seeds are reduced modulo `M` up front, which keeps `A * state`
    /// inside `u64` without changing any output.
    pub fn new(seed: u64) -> Self {
        Self { state: seed % M }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// `(A * state + C) mod M`, always below 2^31.
    pub fn int(&self) -> u64 {
        (A * self.state + C) % M
    }

    /// `int() / (M - 1)`.
    pub fn float(&self) -> f64 {
        self.int() as f64 / (M - 1) as f64
    }

    pub fn next(&self) -> Lcg {
        Lcg { state: self.int() }
    }
}
