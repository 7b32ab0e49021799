//! Procedural NPC generation for tabletop campaigns.
//!
//! A [`Generator`] holds the setting tables, templates and the shared
//! [`NameRegistry`], and produces [`Character`]s for any registered
//! [`Archetype`].

pub mod archetype;
pub mod error;
pub mod generator;
pub mod ministry;
pub mod model;
pub mod procgen;
pub mod registry;
pub mod roster;
pub mod setting;
pub mod template;

pub use archetype::{Archetype, Legionnaire, Monk, Peasant, Placement, Samurai};
pub use error::{GenerationError, RenderError, RosterError, SettingError};
pub use generator::Generator;
pub use ministry::{Minister, generate_minister, generate_ministry_roster};
pub use model::{Character, Gender, GenerationRequest, Hierarchy, HierarchyPins};
pub use registry::NameRegistry;
pub use roster::{RosterRefresher, RosterSource};
pub use setting::Setting;
pub use template::{RenderContext, TemplateSet};
