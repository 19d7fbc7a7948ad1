//! Parser trait and match types.
//!
//! A parser is the capability set a module implementation must provide:
//! free-text search, direct madlib answering, and rendering. Parsers are
//! registered under their implementation id in
//! [`crate::registry::ParserRegistry`] and resolved at dispatch time.

mod census;

pub use census::{CensusPopulationParser, CENSUS_POPULATION_PARSER};

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::census::{Place, TableRow};
use crate::error::Result;

/// A single candidate answer produced by a parser for one query.
///
/// Transient: built per incoming question, discarded after rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    /// Survey table the answer came from, e.g. "B03001"
    pub table: String,
    /// Field id inside the table, e.g. "b03001007"
    pub field: String,
    /// Resolved geographic entity
    pub place: Place,
    /// Human-readable label for the field, e.g. "Dominican (Dominican Republic)"
    pub label: String,
    /// Parsed count for (field, place)
    pub population: i64,
    /// Full table row for the place, available to templates
    pub row: TableRow,
    /// Template used for HTML rendering
    pub template: String,
}

/// Capability set every module implementation provides.
#[async_trait]
pub trait Parser: Send + Sync {
    /// Attempt to recognize and answer a free-text question.
    ///
    /// Returns `Ok(None)` when the text does not match this module's
    /// domain, or when it matches but no places resolve; both are normal
    /// negatives. `Ok(Some(..))` is a non-empty, ranked sequence capped at
    /// the configured maximum. `Err` means the attempt itself failed
    /// (network, malformed payload) and is handled at the module boundary
    /// by the dispatcher.
    async fn search(&self, question: &str) -> Result<Option<Vec<Match>>>;

    /// Answer a stored madlib template directly, bypassing free-text
    /// search. Used when a `QuestionPattern` was already selected, for
    /// example from autocomplete.
    async fn answer_pattern(
        &self,
        pattern_str: &str,
        args: &HashMap<String, String>,
    ) -> Result<Option<Match>>;

    /// Render a single answer to an HTML fragment.
    fn render_answer_html(&self, m: &Match) -> Result<String>;

    /// Render a single answer as a JSON payload.
    fn render_answer_json(&self, m: &Match) -> Result<String>;
}
