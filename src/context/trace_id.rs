//! Correlation identifier generation.
//!
//! # Responsibilities
//! - Produce 128-bit identifiers that are unique within the process
//! - Render them as 32 lowercase hex characters
//!
//! # Design Decisions
//! - One `StdRng` per process, seeded from OS entropy on first use
//! - Uniqueness is the requirement; unpredictability is not
//! - Rendering goes through `uuid`'s simple form (no hyphens)

use std::fmt;
use std::sync::{Mutex, OnceLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

static GENERATOR: OnceLock<Mutex<StdRng>> = OnceLock::new();

fn next_u128() -> u128 {
    let generator = GENERATOR.get_or_init(|| Mutex::new(StdRng::from_entropy()));
    // A panic while holding the lock cannot leave the RNG in a bad state.
    let mut rng = generator.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    rng.gen()
}

/// An immutable 128-bit correlation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Draw a fresh identifier from the process-wide generator.
    pub fn generate() -> Self {
        Self(Uuid::from_u128(next_u128()))
    }

    /// Build an identifier from raw bits.
    pub fn from_u128(bits: u128) -> Self {
        Self(Uuid::from_u128(bits))
    }

    /// Raw bits of the identifier.
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// 32 lowercase hex characters, no separators.
    pub fn to_hex(&self) -> String {
        self.0.simple().to_string()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hex_shape() {
        for _ in 0..100 {
            let hex = TraceId::generate().to_hex();
            assert_eq!(hex.len(), 32);
            assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')), "bad hex: {}", hex);
        }
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(TraceId::from_u128(0).to_hex(), "0".repeat(32));
        assert_eq!(TraceId::from_u128(0xab).to_hex(), format!("{}ab", "0".repeat(30)));
        assert_eq!(TraceId::from_u128(u128::MAX).to_hex(), "f".repeat(32));
    }

    #[test]
    fn test_display_matches_hex() {
        let id = TraceId::generate();
        assert_eq!(id.to_string(), id.to_hex());
        assert_eq!(TraceId::from_u128(id.as_u128()), id);
    }

    #[test]
    fn test_ten_thousand_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| TraceId::generate().to_hex()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..1_000).map(|_| TraceId::generate()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 4_000);
    }
}
