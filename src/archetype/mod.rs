//! Character archetypes and the generation rules each one overrides.

pub mod legionnaire;
pub mod monk;
pub mod peasant;
pub mod samurai;

pub use legionnaire::Legionnaire;
pub use monk::Monk;
pub use peasant::Peasant;
pub use samurai::Samurai;

use indexmap::IndexMap;
use rand::RngCore;

use crate::error::{GenerationError, RenderError};
use crate::model::{Character, Gender, GenerationRequest, Hierarchy};
use crate::procgen::stats::{self, HonorProfile, RankLookup};
use crate::procgen::{self, hierarchy_tags};
use crate::setting::Setting;
use crate::template::{RenderContext, TemplateSet};

/// Where an archetype places a character before names and stats are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub hierarchy: Hierarchy,
    /// Archetype-specific values copied into [`Character::details`].
    pub details: IndexMap<String, String>,
}

impl From<Hierarchy> for Placement {
    fn from(hierarchy: Hierarchy) -> Self {
        Self {
            hierarchy,
            details: IndexMap::new(),
        }
    }
}

/// A pluggable character category.
///
/// Every method has the generic behaviour as its default; an archetype
/// overrides only the rules that differ. Object-safe so archetypes can be
/// registered as `Box<dyn Archetype>` and looked up by [`name`](Self::name).
pub trait Archetype: Send + Sync {
    /// Registry key, also used to find the archetype's rank tables.
    fn name(&self) -> &'static str;

    fn base_rank(&self, requested: Option<i32>) -> Result<i32, GenerationError> {
        requested.ok_or_else(|| GenerationError::MissingBaseRank {
            archetype: self.name().to_string(),
        })
    }

    fn resolve_placement(
        &self,
        setting: &Setting,
        request: &GenerationRequest,
        rng: &mut dyn RngCore,
    ) -> Placement {
        procgen::resolve_hierarchy(setting, &request.pins, rng).into()
    }

    fn generate_rank(&self, base_rank: i32, rng: &mut dyn RngCore) -> f64 {
        stats::generate_rank(base_rank, rng)
    }

    fn generate_recognition(&self, rank: f64, rng: &mut dyn RngCore) -> f64 {
        stats::generate_recognition(rank, 1.0, rng)
    }

    fn full_name(&self, hierarchy: &Hierarchy, personal_name: &str) -> String {
        let _ = hierarchy;
        personal_name.to_string()
    }

    fn xp_lookup(&self) -> RankLookup {
        RankLookup::Ascending
    }

    fn generate_xp(&self, setting: &Setting, rank: f64, rng: &mut dyn RngCore) -> u32 {
        let table = setting.rank_xp_bases.get(self.name());
        stats::generate_xp(stats::base_xp(table, rank, self.xp_lookup()), rng)
    }

    fn generate_honor(&self, rank: f64, rng: &mut dyn RngCore) -> f64 {
        stats::generate_honor(&HonorProfile::DEFAULT, rank, rng)
    }

    fn generate_traits(&self, setting: &Setting, gender: Gender, rng: &mut dyn RngCore) -> Vec<String> {
        procgen::select_traits(&setting.traits, setting.gender_traits.get(&gender), rng)
    }

    fn generate_tags(&self, setting: &Setting, character: &Character) -> Vec<String> {
        hierarchy_tags(setting, &character.hierarchy)
    }

    fn render(
        &self,
        templates: &TemplateSet,
        template: &str,
        context: &RenderContext,
    ) -> Result<String, RenderError> {
        templates.render(template, context)
    }
}

/// Title for `rank` in the archetype's title table, if one applies.
pub fn rank_title<'a>(
    setting: &'a Setting,
    archetype: &str,
    rank: f64,
    lookup: RankLookup,
) -> Option<&'a str> {
    setting
        .rank_titles
        .get(archetype)
        .and_then(|titles| stats::lookup_rank(titles, rank, lookup))
        .map(String::as_str)
}

/// The archetypes every generator starts with.
pub fn builtin() -> Vec<Box<dyn Archetype>> {
    vec![
        Box::new(Samurai),
        Box::new(Peasant),
        Box::new(Monk),
        Box::new(Legionnaire::default()),
    ]
}
