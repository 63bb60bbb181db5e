//! Portable deterministic random number stream.
//!
//! The whole simulation draws from [`GameRng`], a PCG-XSH-RR generator with a
//! single 64-bit state word. Its layout is fixed (8 bytes, little endian) so a
//! serialized stream resumes with the exact same future draws after a reload.
//!
//! # Algorithm
//!
//! ```text
//! step:   state' = state * 6364136223846793005 + 1442695040888963407  (mod 2^64)
//! output: xorshifted = (((state' >> 18) ^ state') >> 27) as u32
//!         rot        = (state' >> 59) as u32
//!         value      = xorshifted.rotate_right(rot)
//! seed:   state = mix(value, 0)
//! derive: state = mix(state, purpose)       (source stream untouched)
//! ```
//!
//! `mix` is a SplitMix64-style combiner followed by a murmur avalanche.

/// Errors raised when restoring a serialized RNG state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RngStateError {
    #[error("rng state must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl crate::error::GameError for RngStateError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }
}

/// Well-known purposes for [`GameRng::derive_stream`].
pub mod purpose {
    /// Seed of the level generated for a given depth (xor'd with the depth).
    pub const LEVEL: u64 = 0x4c45_5645_4c00_0000;
    /// Second attempt when the first layout fails validation.
    pub const REGENERATE: u64 = 0x5245_4745_4e00_0000;
    /// Monster/item/portal population of a level.
    pub const POPULATE: u64 = 0x504f_5055_4c00_0000;
}

/// PCG random number stream (Permuted Congruential Generator).
///
/// - **Deterministic**: same seed always produces same output
/// - **Small state**: only 64 bits, serialized as 8 little-endian bytes
/// - **Portable**: wrapping integer arithmetic only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Size of the serialized state.
    pub const STATE_BYTES: usize = 8;

    /// Creates a stream from a user-facing seed.
    pub fn seed(value: u64) -> Self {
        Self {
            state: mix(value, 0),
        }
    }

    /// Rebuilds a stream from a raw state word.
    pub const fn from_state(state: u64) -> Self {
        Self { state }
    }

    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    pub fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }

    /// Uniform value in `[min, max]` inclusive. Returns `min` when `min >= max`.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        let offset = self.next_u32() as u64 % span;
        (min as i64 + offset as i64) as i32
    }

    /// True with probability `percent / 100`.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }

    /// True with probability `per_mille / 1000`.
    pub fn per_mille(&mut self, per_mille: u32) -> bool {
        self.below(1000) < per_mille
    }

    pub fn coin(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len() as u32) as usize)
    }

    /// Picks from `(value, weight)` pairs proportionally to weight.
    pub fn choose_weighted<'a, T>(&mut self, table: &'a [(T, u32)]) -> Option<&'a T> {
        let total: u32 = table.iter().map(|(_, weight)| *weight).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.below(total);
        for (value, weight) in table {
            if roll < *weight {
                return Some(value);
            }
            roll -= weight;
        }
        None
    }

    /// Returns an independent stream keyed by `purpose` without advancing `self`.
    pub fn derive_stream(&self, purpose: u64) -> Self {
        Self {
            state: mix(self.state, purpose),
        }
    }

    /// Seed value for an independent stream; see [`Self::derive_stream`].
    pub fn derive_seed(&self, purpose: u64) -> u64 {
        mix(self.state, purpose)
    }

    pub fn to_bytes(&self) -> [u8; Self::STATE_BYTES] {
        self.state.to_le_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RngStateError> {
        let raw: [u8; Self::STATE_BYTES] =
            bytes
                .try_into()
                .map_err(|_| RngStateError::InvalidLength {
                    expected: Self::STATE_BYTES,
                    actual: bytes.len(),
                })?;
        Ok(Self {
            state: u64::from_le_bytes(raw),
        })
    }
}

/// Combines a base value with a purpose key.
///
/// These constants are based on SplitMix64 and FxHash multipliers.
fn mix(base: u64, purpose: u64) -> u64 {
    let mut hash = base;
    hash ^= purpose.wrapping_mul(0x9e3779b97f4a7c15);
    hash = hash.wrapping_add(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}
