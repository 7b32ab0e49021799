use std::sync::Arc;

use indexmap::IndexMap;
use rand::{Rng, RngCore};

use crate::archetype::{self, Archetype};
use crate::error::{GenerationError, SettingError};
use crate::model::{Character, GenerationRequest};
use crate::procgen::unclaimed_name;
use crate::registry::NameRegistry;
use crate::setting::Setting;
use crate::template::{PRIVATE_TEMPLATE, PUBLIC_TEMPLATE, RenderContext, TemplateSet};

/// The generation engine: setting tables, templates, the shared name
/// registry, and the archetypes that can be requested by name.
///
/// `Send + Sync`; share one generator across request handlers.
pub struct Generator {
    setting: Setting,
    templates: TemplateSet,
    names: Arc<NameRegistry>,
    archetypes: IndexMap<&'static str, Box<dyn Archetype>>,
}

impl Generator {
    /// Validate `setting`, load its templates and start with a fresh registry.
    pub fn new(setting: Setting) -> Result<Self, SettingError> {
        Self::with_registry(setting, Arc::new(NameRegistry::new()))
    }

    /// Like [`new`](Self::new) but sharing an existing name registry.
    ///
    /// Every configured house name is reserved so no personal name repeats one.
    pub fn with_registry(setting: Setting, names: Arc<NameRegistry>) -> Result<Self, SettingError> {
        setting.validate()?;
        let templates = match &setting.template_dir {
            Some(dir) => TemplateSet::from_dir(dir)?,
            None => TemplateSet::builtin(),
        };
        let reserved = names.refresh(setting.house_names());
        tracing::debug!(reserved, "reserved house names");

        let mut generator = Self {
            setting,
            templates,
            names,
            archetypes: IndexMap::new(),
        };
        for archetype in archetype::builtin() {
            generator.register_boxed(archetype);
        }
        Ok(generator)
    }

    /// Add or replace an archetype under its [`Archetype::name`].
    pub fn register(&mut self, archetype: impl Archetype + 'static) {
        self.register_boxed(Box::new(archetype));
    }

    pub fn register_boxed(&mut self, archetype: Box<dyn Archetype>) {
        self.archetypes.insert(archetype.name(), archetype);
    }

    /// Registered archetype names, in registration order.
    pub fn archetypes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.archetypes.keys().copied()
    }

    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn names(&self) -> &Arc<NameRegistry> {
        &self.names
    }

    /// Additively merge names found outside this process.
    pub fn refresh_used_names<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.refresh(names)
    }

    /// Generate a character using the thread-local RNG.
    pub fn generate(
        &self,
        archetype: &str,
        request: &GenerationRequest,
    ) -> Result<Character, GenerationError> {
        self.generate_with_rng(archetype, request, &mut rand::rng())
    }

    pub fn generate_with_rng(
        &self,
        archetype: &str,
        request: &GenerationRequest,
        rng: &mut dyn RngCore,
    ) -> Result<Character, GenerationError> {
        let kind = self
            .archetypes
            .get(archetype)
            .ok_or_else(|| GenerationError::UnknownArchetype(archetype.to_string()))?;

        let base_rank = kind.base_rank(request.base_rank)?;
        let placement = kind.resolve_placement(&self.setting, request, rng);
        let rank = kind.generate_rank(base_rank, rng);
        let recognition = kind.generate_recognition(rank, rng);

        let mut name = unclaimed_name(
            &self.setting.names,
            &self.names,
            request.gender,
            rng,
            self.setting.name_retry_budget,
        )?;

        let xp = kind.generate_xp(&self.setting, rank, rng);
        let honor = kind.generate_honor(rank, rng);
        let traits = kind.generate_traits(&self.setting, name.gender, rng);

        let mut character = Character {
            id: rng.random_range(0..1_000_000_000u64).to_string(),
            archetype: kind.name().to_string(),
            personal_name: String::new(),
            name_meaning: String::new(),
            full_name: String::new(),
            gender: name.gender,
            hierarchy: placement.hierarchy,
            base_rank,
            rank,
            recognition,
            xp,
            honor,
            traits,
            tags: Vec::new(),
            details: placement.details,
            public: String::new(),
            private: String::new(),
        };

        // The name is claimed only once the character has rendered, so a
        // failed generation leaves the registry untouched.
        loop {
            character.full_name = kind.full_name(&character.hierarchy, &name.personal_name);
            character.personal_name = name.personal_name;
            character.name_meaning = name.meaning;
            character.tags = kind.generate_tags(&self.setting, &character);

            let context = RenderContext::from_character(&character);
            character.public = kind.render(&self.templates, PUBLIC_TEMPLATE, &context)?;
            character.private = kind.render(&self.templates, PRIVATE_TEMPLATE, &context)?;

            if self.names.claim(&character.personal_name) {
                break;
            }
            tracing::trace!(name = character.personal_name, "name claimed concurrently, redrawing");
            name = unclaimed_name(
                &self.setting.names,
                &self.names,
                Some(character.gender),
                rng,
                self.setting.name_retry_budget,
            )?;
        }

        tracing::debug!(
            archetype = character.archetype,
            id = character.id,
            name = character.full_name,
            rank = character.rank,
            "generated character"
        );
        Ok(character)
    }
}
