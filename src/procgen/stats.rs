use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::setting::RankTable;

/// Standard deviation of effective rank around the base rank.
pub const RANK_SPREAD: f64 = 0.3;

pub const MIN_RECOGNITION: f64 = 1.0;
pub const MAX_RECOGNITION: f64 = 15.0;

/// Chance of each extra XP bonus roll succeeding.
pub const XP_BONUS_CHANCE: f64 = 0.10;
pub const XP_BONUS: u32 = 50;
/// XP jitter is `XP_JITTER_STEP × uniform[0, XP_JITTER_STEPS)`.
pub const XP_JITTER_STEP: u32 = 5;
pub const XP_JITTER_STEPS: u32 = 10;

pub const MIN_HONOR: f64 = 1.0;

/// Round to the nearest half, ties to even, then clamp to `[min, max]`.
///
/// Never panics: an inverted range collapses to `max`, and NaN to `min`.
pub fn rounded(x: f64, min: f64, max: f64) -> f64 {
    ((x * 2.0).round_ties_even() / 2.0).max(min).min(max)
}

/// One draw from `N(mean, std_dev)`. A non-finite or negative spread
/// degenerates to the mean.
pub fn normal(rng: &mut dyn RngCore, mean: f64, std_dev: f64) -> f64 {
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

/// Effective rank: `N(base, 0.3)` rounded to a half and kept within one of base.
pub fn generate_rank(base_rank: i32, rng: &mut dyn RngCore) -> f64 {
    let base = f64::from(base_rank);
    rounded(normal(rng, base, RANK_SPREAD), base - 1.0, base + 1.0)
}

/// Recognition drawn around `center`, clamped to `[1, 15]`.
pub fn generate_recognition(center: f64, spread: f64, rng: &mut dyn RngCore) -> f64 {
    rounded(normal(rng, center, spread), MIN_RECOGNITION, MAX_RECOGNITION)
}

/// Direction of a rank-threshold lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankLookup {
    /// Highest threshold at or below the rank.
    Ascending,
    /// Lowest threshold at or above the rank.
    Inverted,
}

pub fn lookup_rank<T>(table: &RankTable<T>, rank: f64, lookup: RankLookup) -> Option<&T> {
    match lookup {
        RankLookup::Ascending => table
            .iter()
            .rev()
            .find(|(threshold, _)| f64::from(**threshold) <= rank)
            .map(|(_, value)| value),
        RankLookup::Inverted => table
            .iter()
            .find(|(threshold, _)| f64::from(**threshold) >= rank)
            .map(|(_, value)| value),
    }
}

/// Base XP for the rank, or 0 when no threshold applies.
pub fn base_xp(table: Option<&RankTable<u32>>, rank: f64, lookup: RankLookup) -> u32 {
    table
        .and_then(|t| lookup_rank(t, rank, lookup))
        .copied()
        .unwrap_or(0)
}

/// Base XP plus a geometric run of 50-point bonuses and a 0–45 jitter.
pub fn generate_xp(base: u32, rng: &mut dyn RngCore) -> u32 {
    let mut xp = base;
    while rng.random_bool(XP_BONUS_CHANCE) {
        xp = xp.saturating_add(XP_BONUS);
    }
    xp.saturating_add(XP_JITTER_STEP * rng.random_range(0..XP_JITTER_STEPS))
}

/// Shape of an archetype's honor distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HonorProfile {
    pub base: f64,
    pub ceiling: f64,
    pub sigma_up: f64,
    pub sigma_down: f64,
}

impl HonorProfile {
    pub const DEFAULT: HonorProfile = HonorProfile {
        base: 2.0,
        ceiling: 5.0,
        sigma_up: 1.0,
        sigma_down: 0.5,
    };

    /// Chance that honor trends above the base, rising with rank.
    pub fn upward_chance(rank: f64) -> f64 {
        (0.50 + 0.03 * rank).clamp(0.0, 1.0)
    }

    pub fn clamp(&self, honor: f64) -> f64 {
        rounded(honor, MIN_HONOR, self.ceiling)
    }
}

impl Default for HonorProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Honor trends up with probability `0.5 + 0.03 × rank`, otherwise down.
pub fn generate_honor(profile: &HonorProfile, rank: f64, rng: &mut dyn RngCore) -> f64 {
    if rng.random_bool(HonorProfile::upward_chance(rank)) {
        profile.clamp(profile.base + normal(rng, 0.0, profile.sigma_up).abs())
    } else {
        profile.clamp(profile.base - normal(rng, 0.0, profile.sigma_down).abs())
    }
}

/// Honor displaced from the base in a random direction by `|N(0, sigma)|`.
pub fn generate_signed_honor(profile: &HonorProfile, sigma: f64, rng: &mut dyn RngCore) -> f64 {
    let offset = normal(rng, 0.0, sigma).abs();
    if rng.random_bool(0.5) {
        profile.clamp(profile.base + offset)
    } else {
        profile.clamp(profile.base - offset)
    }
}

/// Half-integer for display: `3` rather than `3.0`, `3.5` as is.
pub fn format_half(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
