use rand::RngCore;

use crate::model::{Character, GenerationRequest, Hierarchy};
use crate::procgen::stats::RankLookup;
use crate::procgen::tags::push_unique;
use crate::procgen::weighted::choose_or_empty;
use crate::setting::Setting;

use super::{Archetype, Placement, Samurai, rank_title};

pub const LEGIONNAIRE: &str = "legionnaire";
pub const COMPANY_DETAIL: &str = "company";

/// A samurai serving in one of the Imperial Legions.
///
/// Generated exactly like a [`Samurai`], then tagged with a company and a
/// military rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legionnaire {
    samurai: Samurai,
}

impl Archetype for Legionnaire {
    fn name(&self) -> &'static str {
        LEGIONNAIRE
    }

    fn resolve_placement(
        &self,
        setting: &Setting,
        request: &GenerationRequest,
        rng: &mut dyn RngCore,
    ) -> Placement {
        let mut placement = self.samurai.resolve_placement(setting, request, rng);
        let company = match request.pinned_company() {
            Some(company) => company.to_string(),
            None => choose_or_empty(Some(&setting.companies), rng),
        };
        if !company.is_empty() {
            placement.details.insert(COMPANY_DETAIL.to_string(), company);
        }
        placement
    }

    fn full_name(&self, hierarchy: &Hierarchy, personal_name: &str) -> String {
        self.samurai.full_name(hierarchy, personal_name)
    }

    fn generate_tags(&self, setting: &Setting, character: &Character) -> Vec<String> {
        let mut tags = self.samurai.generate_tags(setting, character);
        if let Some(company) = character.detail(COMPANY_DETAIL) {
            push_unique(&mut tags, company);
        }
        if let Some(title) = rank_title(
            setting,
            LEGIONNAIRE,
            f64::from(character.base_rank),
            RankLookup::Ascending,
        ) {
            push_unique(&mut tags, title);
        }
        tags
    }
}
