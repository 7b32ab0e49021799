use rand::RngCore;

use crate::error::{GenerationError, RenderError};
use crate::model::{Character, GenerationRequest, Hierarchy};
use crate::procgen::hierarchy::resolve_clan;
use crate::procgen::stats;
use crate::setting::Setting;
use crate::template::{RenderContext, TemplateSet, render_source, without_lines};

use super::{Archetype, Placement};

pub const PEASANT: &str = "peasant";

/// Commoners: they live on a clan's lands but hold no family, school or rank
/// worth printing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Peasant;

impl Archetype for Peasant {
    fn name(&self) -> &'static str {
        PEASANT
    }

    fn base_rank(&self, requested: Option<i32>) -> Result<i32, GenerationError> {
        Ok(requested.unwrap_or(0))
    }

    fn resolve_placement(
        &self,
        setting: &Setting,
        request: &GenerationRequest,
        rng: &mut dyn RngCore,
    ) -> Placement {
        Hierarchy {
            clan: resolve_clan(setting, &request.pins, rng),
            ..Hierarchy::default()
        }
        .into()
    }

    fn generate_rank(&self, base_rank: i32, _rng: &mut dyn RngCore) -> f64 {
        f64::from(base_rank)
    }

    fn generate_recognition(&self, rank: f64, rng: &mut dyn RngCore) -> f64 {
        stats::generate_recognition(rank + 2.0, 1.0, rng)
    }

    fn generate_tags(&self, _setting: &Setting, _character: &Character) -> Vec<String> {
        vec![PEASANT.to_string()]
    }

    fn render(
        &self,
        templates: &TemplateSet,
        template: &str,
        context: &RenderContext,
    ) -> Result<String, RenderError> {
        let source = without_lines(templates.source(template)?, "Rank:");
        render_source(template, &source, context)
    }
}
