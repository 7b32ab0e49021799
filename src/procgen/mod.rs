//! Stochastic building blocks shared by every archetype.

pub mod hierarchy;
pub mod names;
pub mod stats;
pub mod tags;
pub mod traits;
pub mod weighted;

pub use hierarchy::resolve_hierarchy;
pub use names::{AllocatedName, NamePool, unclaimed_name};
pub use stats::{HonorProfile, RankLookup, rounded};
pub use tags::hierarchy_tags;
pub use traits::{TraitChance, TraitTable, select_traits};
pub use weighted::{pick_weighted, weighted_choice};
