use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use super::gender::Gender;
use super::hierarchy::Hierarchy;

/// A fully generated NPC. Built in one call and handed to the caller;
/// the engine keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    pub id: String,
    pub archetype: String,
    pub personal_name: String,
    pub name_meaning: String,
    pub full_name: String,
    pub gender: Gender,
    #[serde(flatten)]
    pub hierarchy: Hierarchy,
    pub base_rank: i32,
    pub rank: f64,
    pub recognition: f64,
    pub xp: u32,
    pub honor: f64,
    pub traits: Vec<String>,
    pub tags: Vec<String>,
    /// Archetype-specific values such as a monk's order.
    #[serde(flatten)]
    pub details: IndexMap<String, String>,
    pub public: String,
    pub private: String,
}

impl Character {
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }

    /// Flat attribute map for JSON responses.
    pub fn to_dict(&self) -> Result<Map<String, Value>, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}
