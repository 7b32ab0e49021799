use rand::RngCore;

use crate::model::{Hierarchy, HierarchyPins};
use crate::setting::Setting;

use super::weighted::choose_or_empty;

/// Walk clan → family → house → lineage, then pick a school for the clan.
///
/// A pinned level is used as-is and the walk continues beneath it. Levels
/// with no configured children come back empty.
pub fn resolve_hierarchy(
    setting: &Setting,
    pins: &HierarchyPins,
    rng: &mut dyn RngCore,
) -> Hierarchy {
    let clan = resolve_clan(setting, pins, rng);
    let family = pinned_or(pins.family(), || {
        choose_or_empty(setting.families_of(&clan), rng)
    });
    let house = pinned_or(pins.house(), || {
        choose_or_empty(setting.houses_of(&family), rng)
    });
    let lineage = pinned_or(pins.lineage(), || {
        choose_or_empty(setting.lineages_of(&house), rng)
    });
    let school = resolve_school(setting, &clan, pins.school(), rng);

    Hierarchy {
        clan,
        family,
        house,
        lineage,
        school,
    }
}

pub fn resolve_clan(setting: &Setting, pins: &HierarchyPins, rng: &mut dyn RngCore) -> String {
    pinned_or(pins.clan(), || choose_or_empty(Some(&setting.clans), rng))
}

pub fn resolve_school(
    setting: &Setting,
    clan: &str,
    pin: Option<&str>,
    rng: &mut dyn RngCore,
) -> String {
    pinned_or(pin, || choose_or_empty(Some(setting.schools_of(clan)), rng))
}

fn pinned_or(pin: Option<&str>, resolve: impl FnOnce() -> String) -> String {
    match pin {
        Some(value) => value.to_string(),
        None => resolve(),
    }
}
