//! Civiq: natural-language civic-data question answering.
//!
//! Civiq accepts a free-text question, matches it against a registry of
//! pattern-based modules, and answers by querying the Census Reporter
//! APIs, ranking candidate answers and rendering them to HTML or JSON.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use civiq::{
//!     CensusPopulationParser, Config, Dispatcher, HttpCensusClient,
//!     ModuleRecord, ParserRegistry, Renderer, CENSUS_POPULATION_PARSER,
//! };
//!
//! let config = Config::load()?;
//! let api = Arc::new(HttpCensusClient::from_config(&config.api)?);
//! let renderer = Arc::new(Renderer::new()?);
//!
//! let mut registry = ParserRegistry::new();
//! registry.register(
//!     CENSUS_POPULATION_PARSER,
//!     Arc::new(CensusPopulationParser::new(api, renderer, &config.answers)?),
//! );
//!
//! let modules = vec![ModuleRecord::new("census", CENSUS_POPULATION_PARSER)];
//! let dispatcher = Dispatcher::new(Arc::new(registry), modules);
//!
//! let answers = dispatcher.ask("how many dominicans live in new york?").await;
//! for answer in &answers {
//!     println!("{}", dispatcher.render_answer_html(answer)?);
//! }
//! ```

pub mod census;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod render;

pub use census::{CensusApi, HttpCensusClient, Place, TableData, TableRow};
pub use config::{AnswerConfig, CensusApiConfig, Config};
pub use dispatch::{Answer, Dispatcher};
pub use error::{ApiError, CiviqError, RegistryError, Result, TableError};
pub use model::{DataSource, EntityStatus, ModuleRecord, QuestionPattern};
pub use normalize::pattern_to_autocomplete_key;
pub use parser::{CensusPopulationParser, Match, Parser, CENSUS_POPULATION_PARSER};
pub use registry::ParserRegistry;
pub use render::Renderer;
