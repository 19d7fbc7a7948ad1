//! Persistent entities managed by the administrative layer.
//!
//! `DataSource`, `ModuleRecord`, and `QuestionPattern` are created and
//! edited out of process; this crate only reads them. `Match` values (see
//! [`crate::parser`]) are the transient counterpart, built per question and
//! discarded after rendering.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::error::{ModelError, Result};
use crate::normalize::pattern_to_autocomplete_key;

/// Lifecycle status shared by the persistent entities.
///
/// Only one state exists today; disabled/archived states are expected later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    None,
}

/// A datasource, such as an external API.
#[derive(Debug, Clone, Serialize)]
pub struct DataSource {
    pub name: String,
    pub url: Url,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub status: EntityStatus,
}

impl DataSource {
    /// Create a datasource, validating that `url` is an absolute URL.
    pub fn new(name: impl Into<String>, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|source| ModelError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.into(),
            url,
            description: None,
            created: Utc::now(),
            status: EntityStatus::None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A module responsible for answering a single category of question.
///
/// `implementation_id` names the parser binding resolved through
/// [`crate::registry::ParserRegistry`] at dispatch time.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRecord {
    pub name: String,
    pub notes: Option<String>,
    pub implementation_id: String,
    /// Names of the `DataSource` records this module draws on
    pub data_sources: Vec<String>,
    pub status: EntityStatus,
    pub created: DateTime<Utc>,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>, implementation_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: None,
            implementation_id: implementation_id.into(),
            data_sources: Vec::new(),
            status: EntityStatus::None,
            created: Utc::now(),
        }
    }

    pub fn with_data_source(mut self, name: impl Into<String>) -> Self {
        self.data_sources.push(name.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A stored madlib template that matches typed questions to a module.
///
/// `pattern_str` is the madlib string, with variable placeholders:
/// `"is {person} a werewolf?"`. The autocomplete key is derived from it and
/// kept private so the two can never drift: every write path recomputes it.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPattern {
    /// Name of the owning `ModuleRecord`
    pub module: String,
    pattern_str: String,
    autocomplete_str: String,
}

impl QuestionPattern {
    pub fn new(module: impl Into<String>, pattern_str: impl Into<String>) -> Self {
        let pattern_str = pattern_str.into();
        let autocomplete_str = pattern_to_autocomplete_key(&pattern_str);
        Self {
            module: module.into(),
            pattern_str,
            autocomplete_str,
        }
    }

    pub fn pattern_str(&self) -> &str {
        &self.pattern_str
    }

    pub fn autocomplete_str(&self) -> &str {
        &self.autocomplete_str
    }

    /// Replace the madlib template, recomputing the autocomplete key.
    pub fn set_pattern(&mut self, pattern_str: impl Into<String>) {
        self.pattern_str = pattern_str.into();
        self.autocomplete_str = pattern_to_autocomplete_key(&self.pattern_str);
    }

    /// Whether a typed, normalized prefix matches this pattern's key.
    pub fn matches_prefix(&self, typed: &str) -> bool {
        self.autocomplete_str
            .starts_with(&pattern_to_autocomplete_key(typed))
    }
}
