//! Question dispatch across registered modules.
//!
//! The dispatcher is the explicit context object tying module records to
//! their parsers: build the registry, build the dispatcher, ask questions.
//! A failure inside one module's attempt never aborts the others; the
//! aggregate holds only what succeeded.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::model::{ModuleRecord, QuestionPattern};
use crate::parser::Match;
use crate::registry::ParserRegistry;

/// A match tagged with the module that produced it.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Name of the owning `ModuleRecord`
    pub module: String,
    pub matched: Match,
}

/// Routes questions to every registered module and aggregates answers.
pub struct Dispatcher {
    registry: Arc<ParserRegistry>,
    modules: Vec<ModuleRecord>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ParserRegistry>, modules: Vec<ModuleRecord>) -> Self {
        Self { registry, modules }
    }

    pub fn modules(&self) -> &[ModuleRecord] {
        &self.modules
    }

    /// Try every module's parser against a free-text question.
    ///
    /// Per-module failures (network errors, registry misses) are logged
    /// and contribute nothing. An empty result means no module recognized
    /// the question, indistinguishable from every module answering `None`.
    pub async fn ask(&self, question: &str) -> Vec<Answer> {
        let mut answers = Vec::new();
        for module in &self.modules {
            let parser = match self.registry.get(&module.implementation_id) {
                Some(parser) => parser,
                None => {
                    tracing::warn!(
                        module = %module.name,
                        implementation_id = %module.implementation_id,
                        "no parser registered, skipping module"
                    );
                    continue;
                }
            };

            match parser.search(question).await {
                Ok(Some(matches)) => {
                    tracing::debug!(
                        module = %module.name,
                        count = matches.len(),
                        "module produced matches"
                    );
                    answers.extend(matches.into_iter().map(|matched| Answer {
                        module: module.name.clone(),
                        matched,
                    }));
                }
                Ok(None) => {
                    tracing::debug!(module = %module.name, "module did not match");
                }
                Err(e) => {
                    tracing::warn!(
                        module = %module.name,
                        error = %e,
                        "module search failed, continuing with other modules"
                    );
                }
            }
        }
        answers
    }

    /// Answer a pre-selected question pattern directly, e.g. one chosen
    /// from autocomplete.
    pub async fn answer_pattern(
        &self,
        pattern: &QuestionPattern,
        args: &HashMap<String, String>,
    ) -> Result<Option<Answer>> {
        let (module, parser) = self.module_and_parser(&pattern.module)?;
        let matched = parser.answer_pattern(pattern.pattern_str(), args).await?;
        Ok(matched.map(|matched| Answer {
            module: module.name.clone(),
            matched,
        }))
    }

    /// Render an answer as HTML through its owning module's parser.
    pub fn render_answer_html(&self, answer: &Answer) -> Result<String> {
        let (_, parser) = self.module_and_parser(&answer.module)?;
        parser.render_answer_html(&answer.matched)
    }

    /// Render an answer as JSON through its owning module's parser.
    pub fn render_answer_json(&self, answer: &Answer) -> Result<String> {
        let (_, parser) = self.module_and_parser(&answer.module)?;
        parser.render_answer_json(&answer.matched)
    }

    /// Resolve a module record and its bound parser by module name.
    fn module_and_parser(
        &self,
        module_name: &str,
    ) -> Result<(&ModuleRecord, Arc<dyn crate::parser::Parser>)> {
        let module = self
            .modules
            .iter()
            .find(|m| m.name == module_name)
            .ok_or_else(|| crate::error::RegistryError::UnknownModule(module_name.to_string()))?;
        let parser = self.registry.resolve(&module.implementation_id)?;
        Ok((module, parser))
    }

    /// Question patterns whose autocomplete key extends the typed prefix.
    pub fn autocomplete<'a>(
        &self,
        patterns: &'a [QuestionPattern],
        typed: &str,
    ) -> Vec<&'a QuestionPattern> {
        patterns.iter().filter(|p| p.matches_prefix(typed)).collect()
    }
}
