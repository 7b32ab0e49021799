use dashmap::DashSet;

/// Personal names already in use in the campaign.
///
/// Shared by every generation and by the roster refresher for the life of
/// the process. Names are only ever added. [`claim`](Self::claim) is an
/// atomic insert-if-absent, so two concurrent generations can never both
/// receive the same name.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: DashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Self::new();
        for name in names {
            registry.used.insert(name.into());
        }
        registry
    }

    /// Mark `name` as used. Returns `false` if someone already holds it.
    pub fn claim(&self, name: &str) -> bool {
        if self.used.contains(name) {
            return false;
        }
        self.used.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Union in names found elsewhere, e.g. on the campaign roster.
    ///
    /// Only the last word of each name is tracked ("Matsu Gohei" → "Gohei").
    /// Returns how many names were new.
    pub fn refresh<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| personal_name(name.as_ref()).map(str::to_string))
            .filter(|name| self.used.insert(name.clone()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Sorted copy of every used name.
    pub fn snapshot(&self) -> Vec<String> {
        let mut names: Vec<String> = self.used.iter().map(|name| name.key().clone()).collect();
        names.sort();
        names
    }
}

/// Last whitespace-separated word of a full name.
pub fn personal_name(full_name: &str) -> Option<&str> {
    full_name.split_whitespace().last()
}
