use indexmap::IndexMap;
use rand::{Rng, RngCore};

use crate::error::GenerationError;
use crate::model::Gender;
use crate::registry::NameRegistry;

/// Personal names and their meanings, per gender.
pub type NamePool = IndexMap<Gender, IndexMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedName {
    pub gender: Gender,
    pub personal_name: String,
    pub meaning: String,
}

/// Draw a personal name the registry does not hold yet.
///
/// Nothing is claimed here. Callers claim the name with
/// [`NameRegistry::claim`] once the character is complete and draw again if
/// another generation claimed it first. Gender is a coin flip when not
/// given. Gives up with [`GenerationError::NamesExhausted`] once every name
/// in the pool is taken or `budget` draws have all collided.
pub fn unclaimed_name(
    pool: &NamePool,
    registry: &NameRegistry,
    gender: Option<Gender>,
    rng: &mut dyn RngCore,
    budget: usize,
) -> Result<AllocatedName, GenerationError> {
    let gender = gender.unwrap_or_else(|| Gender::random(rng));
    let exhausted = |attempts| GenerationError::NamesExhausted { gender, attempts };

    let Some(names) = pool.get(&gender).filter(|names| !names.is_empty()) else {
        return Err(exhausted(0));
    };
    if names.keys().all(|name| registry.contains(name)) {
        tracing::warn!(%gender, pool = names.len(), "name pool exhausted");
        return Err(exhausted(0));
    }

    for attempt in 1..=budget {
        let Some((name, meaning)) = names.get_index(rng.random_range(0..names.len())) else {
            continue;
        };
        if !registry.contains(name) {
            return Ok(AllocatedName {
                gender,
                personal_name: name.clone(),
                meaning: meaning.clone(),
            });
        }
        tracing::trace!(%gender, name = %name, attempt, "name already used");
    }

    tracing::warn!(%gender, budget, "name retry budget spent");
    Err(exhausted(budget))
}
