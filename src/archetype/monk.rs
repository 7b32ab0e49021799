use rand::RngCore;

use crate::error::RenderError;
use crate::model::{Character, GenerationRequest, Hierarchy};
use crate::procgen::stats::{self, HonorProfile, RankLookup, rounded};
use crate::procgen::weighted::choose_or_empty;
use crate::setting::Setting;
use crate::template::{RenderContext, TemplateSet, relabel_lines, render_source};

use super::{Archetype, Placement, rank_title};

pub const MONK: &str = "monk";
pub const ORDER_DETAIL: &str = "order";

/// Monastic seats run from 1 (most senior) to 10.
pub const MIN_SEAT: f64 = 1.0;
pub const MAX_SEAT: f64 = 10.0;

pub const HONOR: HonorProfile = HonorProfile {
    base: 3.0,
    ceiling: 6.0,
    sigma_up: 1.5,
    sigma_down: 1.5,
};

const RECOGNITION_SPREAD: f64 = 1.5;

/// Members of a monastic order. Rank is a seat where lower numbers are more
/// senior, so XP, titles and recognition all run against the rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monk;

impl Monk {
    /// Honor spread narrows as rank rises.
    pub fn honor_spread(rank: f64) -> f64 {
        HONOR.sigma_up / rank.max(1.0)
    }
}

impl Archetype for Monk {
    fn name(&self) -> &'static str {
        MONK
    }

    fn resolve_placement(
        &self,
        setting: &Setting,
        request: &GenerationRequest,
        rng: &mut dyn RngCore,
    ) -> Placement {
        let order = match request.pinned_order() {
            Some(order) => order.to_string(),
            None => choose_or_empty(Some(&setting.orders), rng),
        };
        let mut placement = Placement::from(Hierarchy::default());
        if !order.is_empty() {
            placement.details.insert(ORDER_DETAIL.to_string(), order);
        }
        placement
    }

    /// Out-of-range bases are pulled onto the nearest seat first.
    fn generate_rank(&self, base_rank: i32, rng: &mut dyn RngCore) -> f64 {
        let base = f64::from(base_rank).clamp(MIN_SEAT, MAX_SEAT);
        rounded(
            stats::normal(rng, base, stats::RANK_SPREAD),
            (base - 1.0).max(MIN_SEAT),
            (base + 1.0).min(MAX_SEAT),
        )
    }

    fn generate_recognition(&self, rank: f64, rng: &mut dyn RngCore) -> f64 {
        stats::generate_recognition(MAX_SEAT - rank + 1.0, RECOGNITION_SPREAD, rng)
    }

    fn xp_lookup(&self) -> RankLookup {
        RankLookup::Inverted
    }

    fn generate_honor(&self, rank: f64, rng: &mut dyn RngCore) -> f64 {
        stats::generate_signed_honor(&HONOR, Self::honor_spread(rank), rng)
    }

    fn generate_tags(&self, setting: &Setting, character: &Character) -> Vec<String> {
        let mut tags = Vec::new();
        if let Some(order) = character.detail(ORDER_DETAIL) {
            tags.push(format!("Order of {order}"));
        }
        if let Some(title) = rank_title(
            setting,
            MONK,
            f64::from(character.base_rank),
            RankLookup::Inverted,
        ) {
            tags.push(title.to_string());
        }
        tags
    }

    fn render(
        &self,
        templates: &TemplateSet,
        template: &str,
        context: &RenderContext,
    ) -> Result<String, RenderError> {
        let source = relabel_lines(templates.source(template)?, "Rank:", "Seat:");
        render_source(template, &source, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn seat_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for base in [1, 5, 10] {
            for _ in 0..200 {
                let rank = Monk.generate_rank(base, &mut rng);
                assert!((MIN_SEAT..=MAX_SEAT).contains(&rank), "seat {rank}");
                assert!((rank - f64::from(base)).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn out_of_range_base_stays_on_a_seat() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..200 {
            let low = Monk.generate_rank(-5, &mut rng);
            assert!((1.0..=2.0).contains(&low), "seat {low}");
            let high = Monk.generate_rank(20, &mut rng);
            assert!((9.0..=10.0).contains(&high), "seat {high}");
        }
    }

    #[test]
    fn recognition_runs_against_rank() {
        let mut rng = SmallRng::seed_from_u64(42);
        let samples: Vec<f64> = (0..2_000)
            .map(|_| Monk.generate_recognition(9.0, &mut rng))
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean > 1.5 && mean < 3.5, "mean recognition {mean}");
        assert!(samples.iter().all(|&r| r < 9.0));
    }

    #[test]
    fn honor_spread_narrows_with_rank() {
        assert!(Monk::honor_spread(9.0) < Monk::honor_spread(2.0));
        assert_eq!(Monk::honor_spread(0.0), Monk::honor_spread(1.0));
    }

    #[test]
    fn honor_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        for rank in 1..=10 {
            for _ in 0..200 {
                let honor = Monk.generate_honor(f64::from(rank), &mut rng);
                assert!((1.0..=HONOR.ceiling).contains(&honor), "honor {honor}");
            }
        }
    }

    #[test]
    fn senior_seats_earn_more_xp() {
        let setting = Setting::sample().unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let senior: u32 = (0..500).map(|_| Monk.generate_xp(&setting, 1.0, &mut rng)).sum();
        let junior: u32 = (0..500).map(|_| Monk.generate_xp(&setting, 10.0, &mut rng)).sum();
        assert!(senior > junior);
    }

    #[test]
    fn pinned_order_is_kept() {
        let setting = Setting::sample().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let request = GenerationRequest::new(3).order("Osano-wo").clan("Crab");
        let placement = Monk.resolve_placement(&setting, &request, &mut rng);
        assert_eq!(placement.details.get(ORDER_DETAIL).map(String::as_str), Some("Osano-wo"));
        assert_eq!(placement.hierarchy, Hierarchy::default());
    }

    #[test]
    fn render_relabels_rank_as_seat() {
        let mut templates = TemplateSet::builtin();
        templates.insert("t.txt", "Rank: {rank}");
        let mut ctx = RenderContext::default();
        ctx.insert("rank", "2");
        assert_eq!(Monk.render(&templates, "t.txt", &ctx).unwrap(), "Seat: 2");
    }
}
