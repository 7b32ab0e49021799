use serde::{Deserialize, Serialize};

/// A character's place in the clan → family → house → lineage structure,
/// plus the school they trained in. Empty strings mean "no such level".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub clan: String,
    pub family: String,
    pub house: String,
    pub lineage: String,
    pub school: String,
}

/// Caller-supplied values that short-circuit hierarchy resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HierarchyPins {
    pub clan: Option<String>,
    pub family: Option<String>,
    pub house: Option<String>,
    pub lineage: Option<String>,
    pub school: Option<String>,
}

impl HierarchyPins {
    pub fn clan(&self) -> Option<&str> {
        pinned(&self.clan)
    }

    pub fn family(&self) -> Option<&str> {
        pinned(&self.family)
    }

    pub fn house(&self) -> Option<&str> {
        pinned(&self.house)
    }

    pub fn lineage(&self) -> Option<&str> {
        pinned(&self.lineage)
    }

    pub fn school(&self) -> Option<&str> {
        pinned(&self.school)
    }
}

/// Blank pins count as unset, the same as an empty form field.
pub(crate) fn pinned(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
