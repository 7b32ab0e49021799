use crate::model::{Character, Hierarchy};
use crate::procgen::stats::RankLookup;
use crate::procgen::tags::{hierarchy_tags, push_unique};
use crate::setting::Setting;

use super::{Archetype, rank_title};

pub const SAMURAI: &str = "samurai";

/// The generic samurai: full hierarchy, a school, and a title once their
/// base rank is high enough to carry one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Samurai;

impl Archetype for Samurai {
    fn name(&self) -> &'static str {
        SAMURAI
    }

    fn full_name(&self, hierarchy: &Hierarchy, personal_name: &str) -> String {
        samurai_full_name(hierarchy, personal_name)
    }

    fn generate_tags(&self, setting: &Setting, character: &Character) -> Vec<String> {
        let mut tags = hierarchy_tags(setting, &character.hierarchy);
        if let Some(title) = rank_title(
            setting,
            SAMURAI,
            f64::from(character.base_rank),
            RankLookup::Ascending,
        ) {
            push_unique(&mut tags, title);
        }
        tags
    }
}

/// `<family> no <house> <personal>`, dropping the house part when the
/// house is empty or shares the family's name.
pub fn samurai_full_name(hierarchy: &Hierarchy, personal_name: &str) -> String {
    let house = (!hierarchy.house.is_empty() && hierarchy.house != hierarchy.family)
        .then(|| format!("no {}", hierarchy.house));
    [Some(hierarchy.family.clone()), house, Some(personal_name.to_string())]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy(family: &str, house: &str) -> Hierarchy {
        Hierarchy {
            clan: "Lion".into(),
            family: family.into(),
            house: house.into(),
            ..Hierarchy::default()
        }
    }

    #[test]
    fn full_name_includes_distinct_house() {
        assert_eq!(
            samurai_full_name(&hierarchy("Matsu", "Kamiyo"), "Gohei"),
            "Matsu no Kamiyo Gohei"
        );
    }

    #[test]
    fn full_name_skips_house_named_after_family() {
        assert_eq!(samurai_full_name(&hierarchy("Matsu", "Matsu"), "Gohei"), "Matsu Gohei");
        assert_eq!(samurai_full_name(&hierarchy("Ikoma", ""), "Gohei"), "Ikoma Gohei");
    }

    #[test]
    fn full_name_without_family_is_personal_name() {
        assert_eq!(samurai_full_name(&hierarchy("", ""), "Gohei"), "Gohei");
    }
}
