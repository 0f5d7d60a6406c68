//! Random sources shared by towns, hunters and the session.
//!
//! Every roll in the game is drawn as a unit value in `[0, 1)` and scaled, so a
//! test can replay an exact sequence with [`ScriptedRolls`] while real play
//! uses seeded `SmallRng` streams from [`RngBundle`].
use hmac::digest::generic_array::GenericArray;
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;

use crate::numbers::{floor_f64_to_i32, floor_f64_to_index};

/// Source of uniform unit draws.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Draw `low..=high` by scaling a unit value and flooring.
pub fn roll_range<R: RandomSource + ?Sized>(rng: &mut R, low: i32, high: i32) -> i32 {
    if high <= low {
        return low;
    }
    let span = f64::from(high) - f64::from(low) + 1.0;
    let offset = floor_f64_to_i32(rng.next_unit() * span);
    low.saturating_add(offset).clamp(low, high)
}

/// Draw `1..=sides`.
pub fn roll_die<R: RandomSource + ?Sized>(rng: &mut R, sides: i32) -> i32 {
    roll_range(rng, 1, sides)
}

/// Draw an index below `len`.
pub fn roll_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    let scale = f64::from(u32::try_from(len).unwrap_or(u32::MAX));
    floor_f64_to_index(rng.next_unit() * scale, len)
}

/// True with probability `p`.
pub fn chance<R: RandomSource + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.next_unit() < p
}

/// Replays a fixed list of unit values, wrapping when exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    values: Vec<f64>,
    cursor: usize,
    draws: u64,
}

impl ScriptedRolls {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of values consumed so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 1.0)
    }
}

/// Named RNG streams derived from one session seed.
#[derive(Debug, Clone)]
pub struct RngBundle {
    town: CountingRng<SmallRng>,
    brawl: CountingRng<SmallRng>,
    crossing: CountingRng<SmallRng>,
    dig: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            town: CountingRng::seeded(stream_seed(seed, b"town")),
            brawl: CountingRng::seeded(stream_seed(seed, b"brawl")),
            crossing: CountingRng::seeded(stream_seed(seed, b"crossing")),
            dig: CountingRng::seeded(stream_seed(seed, b"dig")),
        }
    }

    /// Terrain, toughness and treasure draws for new towns.
    pub fn town(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.town
    }

    /// Brawl draws while looking for trouble.
    pub fn brawl(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.brawl
    }

    /// Item breakage draws when leaving town.
    pub fn crossing(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.crossing
    }

    /// Gold draws while digging.
    pub fn dig(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.dig
    }

    /// Total draws across every stream.
    #[must_use]
    pub fn total_draws(&self) -> u64 {
        self.town
            .draws()
            .saturating_add(self.brawl.draws())
            .saturating_add(self.crossing.draws())
            .saturating_add(self.dig.draws())
    }
}

/// Seeded stream that tallies every call made against it.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    inner: R,
    calls: u64,
}

impl CountingRng<SmallRng> {
    fn seeded(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
            calls: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Calls made so far, whatever their width.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.calls
    }

    fn tick(&mut self) -> &mut R {
        self.calls = self.calls.saturating_add(1);
        &mut self.inner
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.tick().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.tick().next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.tick().fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.tick().try_fill_bytes(dest)
    }
}

/// First eight bytes of HMAC-SHA256 over `tag`, keyed by the session seed.
fn stream_seed(session_seed: u64, tag: &[u8]) -> u64 {
    // HMAC zero-pads short keys to the 64-byte block, so this equals keying with the seed bytes.
    let mut key = [0u8; 64];
    key[..8].copy_from_slice(&session_seed.to_le_bytes());
    let mut mac = Hmac::<Sha256>::new(GenericArray::from_slice(&key));
    mac.update(tag);
    let digest = mac.finalize().into_bytes();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_rolls_wrap_and_count() {
        let mut rolls = ScriptedRolls::new([0.1, 0.9]);
        assert!((rolls.next_unit() - 0.1).abs() < f64::EPSILON);
        assert!((rolls.next_unit() - 0.9).abs() < f64::EPSILON);
        assert!((rolls.next_unit() - 0.1).abs() < f64::EPSILON);
        assert_eq!(rolls.draws(), 3);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut rolls = ScriptedRolls::default();
        assert!(rolls.next_unit().abs() < f64::EPSILON);
    }

    #[test]
    fn roll_range_scales_unit_values() {
        let mut rolls = ScriptedRolls::new([0.0, 0.05, 0.5, 0.999, 1.0]);
        assert_eq!(roll_range(&mut rolls, 1, 10), 1);
        assert_eq!(roll_range(&mut rolls, 1, 10), 1);
        assert_eq!(roll_range(&mut rolls, 1, 10), 6);
        assert_eq!(roll_range(&mut rolls, 1, 10), 10);
        assert_eq!(roll_range(&mut rolls, 1, 10), 10);
    }

    #[test]
    fn degenerate_range_does_not_draw() {
        let mut rolls = ScriptedRolls::new([0.7]);
        assert_eq!(roll_range(&mut rolls, 4, 4), 4);
        assert_eq!(rolls.draws(), 0);
    }

    #[test]
    fn roll_die_and_index_cover_edges() {
        let mut rolls = ScriptedRolls::new([0.0, 0.99, 0.34, 0.67]);
        assert_eq!(roll_die(&mut rolls, 6), 1);
        assert_eq!(roll_die(&mut rolls, 6), 6);
        assert_eq!(roll_index(&mut rolls, 3), 1);
        assert_eq!(roll_index(&mut rolls, 3), 2);
    }

    #[test]
    fn chance_is_strictly_less_than() {
        let mut rolls = ScriptedRolls::new([0.5, 0.49]);
        assert!(!chance(&mut rolls, 0.5));
        assert!(chance(&mut rolls, 0.5));
    }

    #[test]
    fn bundle_streams_are_seeded_and_counted() {
        let mut a = RngBundle::from_user_seed(42);
        let mut b = RngBundle::from_user_seed(42);
        let left: Vec<f64> = (0..4).map(|_| a.brawl().next_unit()).collect();
        let right: Vec<f64> = (0..4).map(|_| b.brawl().next_unit()).collect();
        assert_eq!(left, right);
        assert_eq!(a.brawl().draws(), 4);
        assert_eq!(a.total_draws(), 4);
        assert_ne!(a.town().next_u64(), a.dig().next_u64());
    }

    #[test]
    fn stream_seeds_match_seed_keyed_hmac_and_differ_per_tag() {
        let mut mac = Hmac::<Sha256>::new_from_slice(&42u64.to_le_bytes()).unwrap();
        mac.update(b"brawl");
        let digest = mac.finalize().into_bytes();
        let expected = u64::from_le_bytes(digest[..8].try_into().unwrap());
        assert_eq!(stream_seed(42, b"brawl"), expected);
        assert_ne!(stream_seed(42, b"brawl"), stream_seed(42, b"dig"));
        assert_ne!(stream_seed(42, b"brawl"), stream_seed(43, b"brawl"));
    }
}
