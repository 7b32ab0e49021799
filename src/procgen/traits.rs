use indexmap::IndexMap;
use rand::{Rng, RngCore};
use serde::Deserialize;

/// Probability for a single trait, or for each member of an exclusive group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TraitChance {
    Single(f64),
    Group(Vec<f64>),
}

impl TraitChance {
    pub fn probabilities(&self) -> &[f64] {
        match self {
            TraitChance::Single(p) => std::slice::from_ref(p),
            TraitChance::Group(ps) => ps,
        }
    }
}

/// Trait key → chance. A key containing `/` names an exclusive group,
/// e.g. `"thin / fat"`.
pub type TraitTable = IndexMap<String, TraitChance>;

/// Members of a trait key, trimmed, in order.
pub fn trait_members(key: &str) -> impl Iterator<Item = &str> {
    key.split('/').map(str::trim)
}

/// Global table overlaid with the gender table. Gender entries replace
/// global ones on key collision but keep the global position.
pub fn merged_tables(global: &TraitTable, gender_specific: Option<&TraitTable>) -> TraitTable {
    let mut merged = global.clone();
    if let Some(extra) = gender_specific {
        for (key, chance) in extra {
            merged.insert(key.clone(), chance.clone());
        }
    }
    merged
}

/// Roll every entry of the merged tables and return the sorted trait set.
///
/// Group members are tried in order and the first success wins; later
/// members of that group are never rolled, so effective odds depend on
/// member order and are not normalized.
pub fn select_traits(
    global: &TraitTable,
    gender_specific: Option<&TraitTable>,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let mut traits = Vec::new();
    for (key, chance) in &merged_tables(global, gender_specific) {
        let picked = trait_members(key)
            .zip(chance.probabilities())
            .find(|&(_, &probability)| rng.random_bool(probability.clamp(0.0, 1.0)));
        if let Some((member, _)) = picked {
            traits.push(member.to_string());
        }
    }
    traits.sort();
    traits.dedup();
    traits
}
