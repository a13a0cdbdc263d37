//! Bead pattern generation.
//!
//! Fills the leading slots of a bead layout from an ordered list of bead
//! items. Output covers `min(slot_count, cap)` slots; the cap keeps pattern
//! previews short and is configurable.

use std::fmt;
use std::str::FromStr;

use beadsmith_core::constants::PATTERN_PREVIEW_CAP;
use beadsmith_core::ItemId;
use serde::{Deserialize, Serialize};

/// Pattern algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PatternKind {
    /// First two items, alternating.
    Alternating,
    /// Items in order, cycling.
    Gradient,
    /// Independent uniform draws from a seeded generator.
    Random { seed: u64 },
    /// Gradient over the first half, mirrored onto the second.
    Symmetrical,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alternating => write!(f, "alternating"),
            Self::Gradient => write!(f, "gradient"),
            Self::Random { seed } => write!(f, "random:{}", seed),
            Self::Symmetrical => write!(f, "symmetrical"),
        }
    }
}

impl FromStr for PatternKind {
    type Err = String;

    /// Accepts `alternating`, `gradient`, `symmetrical`, `random` or `random:<seed>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };
        match (name, arg) {
            ("alternating", None) => Ok(Self::Alternating),
            ("gradient", None) => Ok(Self::Gradient),
            ("symmetrical" | "symmetric", None) => Ok(Self::Symmetrical),
            ("random", None) => Ok(Self::Random { seed: 0 }),
            ("random", Some(seed)) => seed
                .parse()
                .map(|seed| Self::Random { seed })
                .map_err(|_| format!("Invalid random seed: {}", seed)),
            _ => Err(format!("Unknown pattern: {}", s)),
        }
    }
}

/// xorshift64 stream; identical seeds give identical patterns.
#[derive(Debug, Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // splitmix64 finaliser; bijective, so distinct seeds give distinct states.
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        // Zero is a fixed point of xorshift.
        if z == 0 {
            z = 0x9E37_79B9_7F4A_7C15;
        }
        Self { state: z }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform index in `0..bound` by multiply-shift.
    fn next_index(&mut self, bound: usize) -> usize {
        ((u128::from(self.next_u64()) * bound as u128) >> 64) as usize
    }
}

/// Generates slot assignments for bead patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternGenerator {
    cap: u32,
}

impl PatternGenerator {
    pub fn new(cap: u32) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Number of slots a pattern over `slot_count` slots fills.
    pub fn output_len(&self, slot_count: u32) -> u32 {
        slot_count.min(self.cap)
    }

    /// Assigns items to slots `0..min(slot_count, cap)`.
    ///
    /// Returns `(position, item)` pairs in slot order. An empty item list
    /// yields no assignments.
    pub fn generate(&self, kind: PatternKind, slot_count: u32, items: &[ItemId]) -> Vec<(u32, ItemId)> {
        let n = self.output_len(slot_count) as usize;
        let k = items.len();
        if n == 0 || k == 0 {
            return Vec::new();
        }

        let indices: Vec<usize> = match kind {
            PatternKind::Alternating => {
                let span = k.min(2);
                (0..n).map(|i| i % span).collect()
            }
            PatternKind::Gradient => (0..n).map(|i| i % k).collect(),
            PatternKind::Random { seed } => {
                let mut rng = XorShift64::new(seed);
                (0..n).map(|_| rng.next_index(k)).collect()
            }
            PatternKind::Symmetrical => {
                let mut indices = vec![0; n];
                let half = n.div_ceil(2);
                for i in 0..half {
                    indices[i] = i % k;
                    indices[n - 1 - i] = i % k;
                }
                indices
            }
        };

        tracing::debug!("Generated {} pattern over {} of {} slots", kind, n, slot_count);

        indices
            .into_iter()
            .enumerate()
            .map(|(slot, index)| (slot as u32, items[index].clone()))
            .collect()
    }
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new(PATTERN_PREVIEW_CAP)
    }
}
