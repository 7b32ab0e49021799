//! Imperial ministry rosters built from samurai characters.

use rand::RngCore;
use serde::Serialize;

use crate::archetype::samurai::SAMURAI;
use crate::error::GenerationError;
use crate::generator::Generator;
use crate::model::{Character, GenerationRequest, HierarchyPins};
use crate::procgen::tags::push_unique;
use crate::setting::Setting;

const DEFAULT_MINISTRY_TITLE: &str = "Minister";

/// A samurai serving in one of the ministries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Minister {
    #[serde(flatten)]
    pub character: Character,
    pub ministry: String,
    /// Ministry title for the base rank, e.g. "Deputy Minister".
    pub ministry_rank: String,
    /// e.g. "Provincial Minister of Justice"
    pub summary: String,
}

/// Title a ministry gives to `rank`, "Minister" when none is configured.
pub fn ministry_title(setting: &Setting, rank: i32) -> &str {
    setting
        .ministry_titles
        .get(&rank)
        .map(String::as_str)
        .unwrap_or(DEFAULT_MINISTRY_TITLE)
}

pub fn generate_minister(
    generator: &Generator,
    ministry: &str,
    rank: i32,
    pins: &HierarchyPins,
) -> Result<Minister, GenerationError> {
    generate_minister_with_rng(generator, ministry, rank, pins, &mut rand::rng())
}

pub fn generate_minister_with_rng(
    generator: &Generator,
    ministry: &str,
    rank: i32,
    pins: &HierarchyPins,
    rng: &mut dyn RngCore,
) -> Result<Minister, GenerationError> {
    let request = GenerationRequest {
        base_rank: Some(rank),
        pins: pins.clone(),
        ..GenerationRequest::default()
    };
    let mut character = generator.generate_with_rng(SAMURAI, &request, rng)?;
    push_unique(&mut character.tags, ministry);

    let title = ministry_title(generator.setting(), rank).to_string();
    let department = ministry.strip_prefix("Ministry of ").unwrap_or(ministry);
    Ok(Minister {
        summary: format!("{title} of {department}"),
        character,
        ministry: ministry.to_string(),
        ministry_rank: title,
    })
}

/// One minister per configured ministry, all at `rank`.
pub fn generate_ministry_roster(
    generator: &Generator,
    rank: i32,
    pins: &HierarchyPins,
) -> Result<Vec<Minister>, GenerationError> {
    generate_ministry_roster_with_rng(generator, rank, pins, &mut rand::rng())
}

pub fn generate_ministry_roster_with_rng(
    generator: &Generator,
    rank: i32,
    pins: &HierarchyPins,
    rng: &mut dyn RngCore,
) -> Result<Vec<Minister>, GenerationError> {
    let roster = generator
        .setting()
        .ministries
        .iter()
        .map(|ministry| generate_minister_with_rng(generator, ministry, rank, pins, rng))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(rank, ministers = roster.len(), "generated ministry roster");
    Ok(roster)
}
