use serde::Deserialize;

use super::gender::Gender;
use super::hierarchy::{HierarchyPins, pinned};

/// Parameters for one generation call.
///
/// Every field is optional; archetypes decide which ones they honour and
/// what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    pub base_rank: Option<i32>,
    pub gender: Option<Gender>,
    #[serde(flatten)]
    pub pins: HierarchyPins,
    /// Monastic order, for monks.
    pub order: Option<String>,
    /// Legion company, for legionnaires.
    pub company: Option<String>,
}

impl GenerationRequest {
    pub fn new(base_rank: i32) -> Self {
        Self {
            base_rank: Some(base_rank),
            ..Self::default()
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn clan(mut self, clan: impl Into<String>) -> Self {
        self.pins.clan = Some(clan.into());
        self
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.pins.family = Some(family.into());
        self
    }

    pub fn house(mut self, house: impl Into<String>) -> Self {
        self.pins.house = Some(house.into());
        self
    }

    pub fn lineage(mut self, lineage: impl Into<String>) -> Self {
        self.pins.lineage = Some(lineage.into());
        self
    }

    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.pins.school = Some(school.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn pinned_order(&self) -> Option<&str> {
        pinned(&self.order)
    }

    pub fn pinned_company(&self) -> Option<&str> {
        pinned(&self.company)
    }
}
