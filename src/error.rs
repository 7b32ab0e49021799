use std::path::PathBuf;

use thiserror::Error;

use crate::model::Gender;

/// Errors surfaced by a generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No archetype is registered under the requested name.
    #[error("unknown character type '{0}'")]
    UnknownArchetype(String),

    /// The archetype has no default rank and the request did not supply one.
    #[error("character type '{archetype}' requires a base rank")]
    MissingBaseRank { archetype: String },

    /// Every name in the gender's pool is taken, or the retry budget ran out.
    #[error("no unused {gender} names left after {attempts} attempts")]
    NamesExhausted { gender: Gender, attempts: usize },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Template and record disagree, or a template could not be read.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no template named '{0}'")]
    UnknownTemplate(String),

    #[error("template '{template}' references unknown field '{field}'")]
    MissingField { template: String, field: String },

    #[error("template '{template}' has an unterminated placeholder")]
    Unterminated { template: String },

    #[error("failed to read templates from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems loading or validating the setting tables.
#[derive(Debug, Error)]
pub enum SettingError {
    #[error("failed to read setting from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse setting: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("table '{table}' gives '{option}' an invalid weight {weight}")]
    InvalidWeight {
        table: String,
        option: String,
        weight: f64,
    },

    #[error("trait '{key}' has {members} members but {probabilities} probabilities")]
    TraitArity {
        key: String,
        members: usize,
        probabilities: usize,
    },

    #[error("trait '{key}' has probability {probability} outside [0, 1]")]
    InvalidProbability { key: String, probability: f64 },

    #[error("name retry budget must be at least 1")]
    InvalidRetryBudget,

    #[error(transparent)]
    Templates(#[from] RenderError),
}

/// The external roster could not be read.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster unavailable: {0}")]
    Unavailable(String),
}
