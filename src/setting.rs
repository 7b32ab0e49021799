use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SettingError;
use crate::model::Gender;
use crate::procgen::names::NamePool;
use crate::procgen::traits::{TraitTable, trait_members};

/// Relative weight of one option in a [`WeightTable`].
pub type Weight = f64;

/// Options with relative weights, in configuration order.
pub type WeightTable = IndexMap<String, Weight>;

/// Values keyed by the rank at which they start to apply.
pub type RankTable<T> = BTreeMap<i32, T>;

const SAMPLE_SETTING: &str = include_str!("../data/setting.json");

/// Default number of draws the name allocator makes before giving up.
pub const DEFAULT_NAME_RETRY_BUDGET: usize = 1000;

/// Configuration tables describing a campaign setting.
///
/// Loaded and validated once, then shared read-only by every generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Setting {
    pub clans: WeightTable,
    /// clan → families
    pub families: IndexMap<String, WeightTable>,
    /// family → houses
    pub houses: IndexMap<String, WeightTable>,
    /// house → lineages
    pub lineages: IndexMap<String, WeightTable>,
    /// clan → schools
    pub schools: IndexMap<String, WeightTable>,
    /// Schools for clans without their own table.
    pub default_schools: WeightTable,
    /// The clan whose tag is not suffixed with " Clan".
    pub imperial_clan: Option<String>,
    pub orders: WeightTable,
    pub companies: WeightTable,
    /// archetype → rank threshold → base XP
    pub rank_xp_bases: IndexMap<String, RankTable<u32>>,
    /// archetype → rank threshold → title
    pub rank_titles: IndexMap<String, RankTable<String>>,
    pub traits: TraitTable,
    pub gender_traits: IndexMap<Gender, TraitTable>,
    pub names: NamePool,
    pub ministries: Vec<String>,
    pub ministry_titles: RankTable<String>,
    pub name_retry_budget: usize,
    /// Directory whose `*.txt` files override the built-in templates.
    pub template_dir: Option<PathBuf>,
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            clans: WeightTable::new(),
            families: IndexMap::new(),
            houses: IndexMap::new(),
            lineages: IndexMap::new(),
            schools: IndexMap::new(),
            default_schools: WeightTable::new(),
            imperial_clan: None,
            orders: WeightTable::new(),
            companies: WeightTable::new(),
            rank_xp_bases: IndexMap::new(),
            rank_titles: IndexMap::new(),
            traits: TraitTable::new(),
            gender_traits: IndexMap::new(),
            names: NamePool::new(),
            ministries: Vec::new(),
            ministry_titles: RankTable::new(),
            name_retry_budget: DEFAULT_NAME_RETRY_BUDGET,
            template_dir: None,
        }
    }
}

impl Setting {
    /// Parse and validate a setting from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SettingError> {
        let setting: Setting = serde_json::from_str(json)?;
        setting.validate()?;
        Ok(setting)
    }

    /// Read, parse and validate a setting file.
    pub fn from_path(path: &Path) -> Result<Self, SettingError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The bundled Rokugan sample setting.
    pub fn sample() -> Result<Self, SettingError> {
        Self::from_json_str(SAMPLE_SETTING)
    }

    pub fn validate(&self) -> Result<(), SettingError> {
        if self.name_retry_budget == 0 {
            return Err(SettingError::InvalidRetryBudget);
        }

        check_weights("clans", &self.clans)?;
        check_weights("default_schools", &self.default_schools)?;
        check_weights("orders", &self.orders)?;
        check_weights("companies", &self.companies)?;
        for (label, nested) in [
            ("families", &self.families),
            ("houses", &self.houses),
            ("lineages", &self.lineages),
            ("schools", &self.schools),
        ] {
            for (parent, table) in nested {
                check_weights(&format!("{label}.{parent}"), table)?;
            }
        }

        check_traits(&self.traits)?;
        for table in self.gender_traits.values() {
            check_traits(table)?;
        }
        Ok(())
    }

    pub fn families_of(&self, clan: &str) -> Option<&WeightTable> {
        self.families.get(clan)
    }

    pub fn houses_of(&self, family: &str) -> Option<&WeightTable> {
        self.houses.get(family)
    }

    pub fn lineages_of(&self, house: &str) -> Option<&WeightTable> {
        self.lineages.get(house)
    }

    /// The clan's own school table, or the default table.
    pub fn schools_of(&self, clan: &str) -> &WeightTable {
        self.schools.get(clan).unwrap_or(&self.default_schools)
    }

    pub fn is_imperial(&self, clan: &str) -> bool {
        self.imperial_clan.as_deref() == Some(clan)
    }

    /// Every configured house name, in configuration order.
    pub fn house_names(&self) -> impl Iterator<Item = &str> {
        self.houses
            .values()
            .flat_map(|houses| houses.keys())
            .map(String::as_str)
    }
}

fn check_weights(table: &str, weights: &WeightTable) -> Result<(), SettingError> {
    for (option, &weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SettingError::InvalidWeight {
                table: table.to_string(),
                option: option.clone(),
                weight,
            });
        }
    }
    Ok(())
}

fn check_traits(table: &TraitTable) -> Result<(), SettingError> {
    for (key, chance) in table {
        let members = trait_members(key).count();
        let probabilities = chance.probabilities();
        if members != probabilities.len() {
            return Err(SettingError::TraitArity {
                key: key.clone(),
                members,
                probabilities: probabilities.len(),
            });
        }
        if let Some(&probability) = probabilities
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            return Err(SettingError::InvalidProbability {
                key: key.clone(),
                probability,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_setting_loads() {
        let setting = Setting::sample().unwrap();
        assert!(setting.clans.contains_key("Crab"));
        assert_eq!(setting.imperial_clan.as_deref(), Some("Imperial"));
        assert_eq!(setting.names[&Gender::Male].len(), 40);
        assert_eq!(setting.names[&Gender::Female].len(), 40);
        assert_eq!(setting.ministries.len(), 6);
        assert_eq!(setting.name_retry_budget, DEFAULT_NAME_RETRY_BUDGET);
    }

    #[test]
    fn sample_tables_keep_configuration_order() {
        let setting = Setting::sample().unwrap();
        let first: Vec<&str> = setting.clans.keys().take(3).map(String::as_str).collect();
        assert_eq!(first, vec!["Crab", "Crane", "Dragon"]);
    }

    #[test]
    fn rank_tables_parse_numeric_keys() {
        let setting = Setting::sample().unwrap();
        let samurai = &setting.rank_xp_bases["samurai"];
        assert_eq!(samurai.get(&1), Some(&100));
        assert_eq!(samurai.get(&10), Some(&350));
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let setting = Setting::from_json_str("{}").unwrap();
        assert!(setting.clans.is_empty());
        assert!(setting.schools_of("Crab").is_empty());
        assert!(setting.families_of("Crab").is_none());
    }

    #[test]
    fn clan_without_schools_uses_default() {
        let setting = Setting::sample().unwrap();
        assert!(setting.schools_of("Fox").contains_key("Bushi"));
        assert!(setting.schools_of("Crab").contains_key("Hida Bushi"));
    }

    #[test]
    fn rejects_negative_weight() {
        let err = Setting::from_json_str(r#"{"families": {"Crab": {"Hida": -1}}}"#).unwrap_err();
        assert!(matches!(err, SettingError::InvalidWeight { ref table, .. } if table == "families.Crab"));
    }

    #[test]
    fn rejects_group_arity_mismatch() {
        let err = Setting::from_json_str(r#"{"traits": {"thin / fat": [0.1]}}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingError::TraitArity { members: 2, probabilities: 1, .. }
        ));
    }

    #[test]
    fn rejects_probability_above_one() {
        let err = Setting::from_json_str(r#"{"traits": {"scarred": 1.5}}"#).unwrap_err();
        assert!(matches!(err, SettingError::InvalidProbability { .. }));
    }

    #[test]
    fn rejects_zero_retry_budget() {
        let err = Setting::from_json_str(r#"{"name_retry_budget": 0}"#).unwrap_err();
        assert!(matches!(err, SettingError::InvalidRetryBudget));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Setting::from_json_str("{ clans: ").unwrap_err();
        assert!(matches!(err, SettingError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setting.json");
        std::fs::write(&path, r#"{"clans": {"Crab": 1}}"#).unwrap();
        let setting = Setting::from_path(&path).unwrap();
        assert_eq!(setting.clans.len(), 1);

        let missing = Setting::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, SettingError::Io { .. }));
    }

    #[test]
    fn house_names_cover_all_families() {
        let setting = Setting::sample().unwrap();
        let houses: Vec<&str> = setting.house_names().collect();
        assert!(houses.contains(&"Osaku"));
        assert!(houses.contains(&"Kamiyo"));
        assert!(houses.contains(&"Tsuruchi"));
    }
}
