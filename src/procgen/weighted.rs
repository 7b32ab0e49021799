use indexmap::IndexMap;
use rand::{Rng, RngCore};

/// Sum of every weight in the table.
pub fn total_weight<K>(table: &IndexMap<K, f64>) -> f64 {
    table.values().sum()
}

/// Return the first option whose cumulative weight interval contains `roll`.
///
/// `roll` is expected in `[0, total_weight)`; anything outside yields `None`.
pub fn pick_weighted<K>(table: &IndexMap<K, f64>, roll: f64) -> Option<&K> {
    let mut cumulative = 0.0;
    for (option, &weight) in table {
        cumulative += weight;
        if roll < cumulative {
            return Some(option);
        }
    }
    None
}

/// Draw one option proportionally to its weight.
///
/// Empty tables, and tables whose weights sum to zero, select nothing.
pub fn weighted_choice<'a, K>(table: &'a IndexMap<K, f64>, rng: &mut dyn RngCore) -> Option<&'a K> {
    let total = total_weight(table);
    if !(total > 0.0) {
        return None;
    }
    let roll = rng.random_range(0.0..total);
    pick_weighted(table, roll)
}

/// Like [`weighted_choice`] over string options, with the empty string for "nothing".
pub fn choose_or_empty(table: Option<&IndexMap<String, f64>>, rng: &mut dyn RngCore) -> String {
    table
        .and_then(|t| weighted_choice(t, rng))
        .cloned()
        .unwrap_or_default()
}
