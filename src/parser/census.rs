//! Census population parser.
//!
//! Answers questions of the shape "how many/which <noun> live in/are in
//! <place>?" from three ACS survey tables: Hispanic-origin breakdowns
//! (B03001), Asian-origin breakdowns (B02006), and broad race categories
//! (B02001).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

use crate::census::{parse_count, CensusApi, Place, TableRow};
use crate::config::AnswerConfig;
use crate::error::{ApiError, Result, TableError};
use crate::render::{Renderer, TEMPLATE_ASIAN_ORIGIN, TEMPLATE_HISPANIC_ORIGIN, TEMPLATE_RACE};

use super::{Match, Parser};

/// Implementation id this parser registers under.
pub const CENSUS_POPULATION_PARSER: &str = "census_population";

static QUESTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:how many|how much|which are|which)(?P<noun>.+?)\s+(?:live in|are in|in)\s+(?P<place>[\w\s]+)\??",
    )
    .expect("Invalid regex")
});

// The B02006 total row duplicates what the B02001 race pattern for
// "asian(s)" already answers; it is skipped for that noun.
static ASIAN_NOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^asians?").expect("Invalid regex"));
const ASIAN_TOTAL_FIELD: &str = "b02006001";

/// Specific Hispanic-or-Latino origins, ACS table B03001.
const HISPANIC_ORIGIN_FIELDS: &[(&str, &str)] = &[
    ("b03001001", "Total:"),
    ("b03001003", "Hispanic or Latino"), // cumulative
    ("b03001004", "Mexican"),
    ("b03001005", "Puerto Rican"),
    ("b03001006", "Cuban"),
    ("b03001007", "Dominican (Dominican Republic)"),
    ("b03001008", "Central American:"),
    ("b03001009", "Costa Rican"),
    ("b03001010", "Guatemalan"),
    ("b03001011", "Honduran"),
    ("b03001012", "Nicaraguan"),
    ("b03001013", "Panamanian"),
    ("b03001014", "Salvadoran"),
    ("b03001015", "Other Central American"),
    ("b03001016", "South American"), // cumulative
    ("b03001017", "Argentinean"),
    ("b03001018", "Bolivian"),
    ("b03001019", "Chilean"),
    ("b03001020", "Colombian"),
    ("b03001021", "Ecuadorian"),
    ("b03001022", "Paraguayan"),
    ("b03001023", "Peruvian"),
    ("b03001024", "Uruguayan"),
    ("b03001025", "Venezuelan"),
    ("b03001026", "Other South American"),
    ("b03001027", "Other Hispanic or Latino"), // cumulative
    ("b03001028", "Spaniard"),
    ("b03001029", "Spanish"),
    ("b03001030", "Spanish American"),
    ("b03001031", "All other Hispanic or Latino"),
];

/// Specific Asian origins, ACS table B02006.
const ASIAN_ORIGIN_FIELDS: &[(&str, &str)] = &[
    ("b02006001", "Asian"), // table total
    ("b02006002", "Indian (Asian)"),
    ("b02006003", "Bangladeshi"),
    ("b02006004", "Cambodian"),
    ("b02006005", "Chinese , except Taiwanese"),
    ("b02006006", "Filipino"),
    ("b02006007", "Hmong"),
    ("b02006008", "Indonesian"),
    ("b02006009", "Japanese"),
    ("b02006010", "Korean"),
    ("b02006011", "Laotian"),
    ("b02006012", "Malaysian"),
    ("b02006013", "Pakistani"),
    ("b02006014", "Sri Lankan"),
    ("b02006015", "Taiwanese"),
    ("b02006016", "Thai"),
    ("b02006017", "Vietnamese"),
    ("b02006018", "Other Asian"),
    ("b02006019", "Other Asian, not specified"),
];

/// Broad race categories, ACS table B02001: (noun pattern, field, label).
const RACE_FIELDS: &[(&str, &str, &str)] = &[
    (
        r"black( people|s|folks?)?|(african|afro)[-\s]?american|african american|negro.*",
        "b02001003",
        "Black or African American alone",
    ),
    (r"white( people|s|folks?)?", "b02001002", "White alone"),
    (r"asian( people|s|folks?)?", "b02001005", "Asian alone"),
];

/// A validated label-to-field table for one ACS survey table.
///
/// Entries keep their declaration order; discovery order feeds the result
/// cap below.
struct OriginTable {
    table: &'static str,
    template: &'static str,
    entries: Vec<(&'static str, &'static str)>,
}

impl OriginTable {
    /// Build and validate a table. Malformed static data fails here, at
    /// parser construction, never during a request.
    fn build(
        table: &'static str,
        template: &'static str,
        fields: &[(&'static str, &'static str)],
    ) -> std::result::Result<Self, TableError> {
        let prefix = table.to_lowercase();
        let mut seen = std::collections::HashSet::new();
        for (field, label) in fields {
            if !seen.insert(*field) {
                return Err(TableError::DuplicateField {
                    table: table.to_string(),
                    field: field.to_string(),
                });
            }
            if label.trim().is_empty() {
                return Err(TableError::EmptyLabel {
                    table: table.to_string(),
                    field: field.to_string(),
                });
            }
            if !field.starts_with(&prefix) {
                return Err(TableError::ForeignField {
                    table: table.to_string(),
                    field: field.to_string(),
                });
            }
        }
        Ok(Self {
            table,
            template,
            entries: fields.to_vec(),
        })
    }
}

/// One broad race category with its compiled noun pattern.
struct RaceEntry {
    pattern: Regex,
    field: &'static str,
    label: &'static str,
}

impl RaceEntry {
    fn build(pattern: &str, field: &'static str, label: &'static str) -> Result<Self> {
        // Anchored: the noun must match from its first character.
        let pattern =
            Regex::new(&format!("^(?:{pattern})")).map_err(|source| TableError::InvalidPattern {
                pattern: pattern.to_string(),
                field: field.to_string(),
                source,
            })?;
        Ok(Self {
            pattern,
            field,
            label,
        })
    }
}

/// Parser for category/place population questions.
pub struct CensusPopulationParser {
    api: Arc<dyn CensusApi>,
    renderer: Arc<Renderer>,
    max_results: usize,
    hispanic_origin: OriginTable,
    asian_origin: OriginTable,
    race: Vec<RaceEntry>,
}

impl CensusPopulationParser {
    /// Build the parser, validating all static lookup tables up front.
    pub fn new(
        api: Arc<dyn CensusApi>,
        renderer: Arc<Renderer>,
        answers: &AnswerConfig,
    ) -> Result<Self> {
        let hispanic_origin =
            OriginTable::build("B03001", TEMPLATE_HISPANIC_ORIGIN, HISPANIC_ORIGIN_FIELDS)?;
        let asian_origin = OriginTable::build("B02006", TEMPLATE_ASIAN_ORIGIN, ASIAN_ORIGIN_FIELDS)?;
        let race = RACE_FIELDS
            .iter()
            .map(|(pattern, field, label)| RaceEntry::build(pattern, field, label))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            api,
            renderer,
            max_results: answers.max_results,
            hispanic_origin,
            asian_origin,
            race,
        })
    }

    /// Fetch the table row for one place and build a match from it.
    async fn build_match(
        &self,
        table: &str,
        template: &str,
        field: &str,
        label: &str,
        place: &Place,
    ) -> Result<Match> {
        let data = self.api.fetch_table(table, &[&place.full_geoid]).await?;
        let row = data
            .get(&place.full_geoid)
            .ok_or_else(|| ApiError::MissingGeography(place.full_geoid.clone()))?;
        let value = row.get(field).ok_or_else(|| ApiError::MissingField {
            geoid: place.full_geoid.clone(),
            field: field.to_string(),
        })?;
        let population = parse_count(value).ok_or_else(|| ApiError::NonNumeric {
            field: field.to_string(),
            value: value.to_string(),
        })?;

        Ok(Match {
            table: table.to_string(),
            field: field.to_string(),
            place: place.clone(),
            label: label.to_string(),
            population,
            row: row.clone(),
            template: template.to_string(),
        })
    }

    fn context<'a>(&'a self, m: &'a Match) -> MatchContext<'a> {
        // The Hispanic-origin template gets the whole field-label mapping
        // so it can show the surrounding breakdown.
        let field_labels = (m.table == self.hispanic_origin.table)
            .then(|| self.hispanic_origin.entries.iter().copied().collect());
        MatchContext {
            label: &m.label,
            place: &m.place,
            population: m.population,
            full_data: &m.row,
            field_labels,
        }
    }
}

/// Template/serialization context for one match.
#[derive(Serialize)]
struct MatchContext<'a> {
    label: &'a str,
    place: &'a Place,
    population: i64,
    full_data: &'a TableRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_labels: Option<BTreeMap<&'a str, &'a str>>,
}

#[async_trait]
impl Parser for CensusPopulationParser {
    async fn search(&self, question: &str) -> Result<Option<Vec<Match>>> {
        let Some(caps) = QUESTION_PATTERN.captures(question) else {
            return Ok(None);
        };

        let place_prefix = caps["place"].trim().to_string();
        let places = self.api.find_places(&place_prefix).await?;
        if places.is_empty() {
            tracing::debug!(place = %place_prefix, "no geographies resolved");
            return Ok(None);
        }

        let noun = singularize(&caps["noun"]);
        tracing::debug!(noun = %noun, places = places.len(), "matched population question");

        // Candidates are discovered table by table, place by place, and the
        // cap is applied during discovery: the returned matches are the
        // first `max_results` found, not the global top set. Ranking sorts
        // only that capped set. Kept identical to the original behavior;
        // pinned by tests.
        let mut results = Vec::new();
        for (field, label) in &self.hispanic_origin.entries {
            if label.to_lowercase().starts_with(&noun) {
                for place in &places {
                    if results.len() >= self.max_results {
                        break;
                    }
                    results.push(
                        self.build_match(
                            self.hispanic_origin.table,
                            self.hispanic_origin.template,
                            field,
                            label,
                            place,
                        )
                        .await?,
                    );
                }
            }
        }
        for (field, label) in &self.asian_origin.entries {
            if label.to_lowercase().starts_with(&noun)
                && !(*field == ASIAN_TOTAL_FIELD && ASIAN_NOUN.is_match(&noun))
            {
                for place in &places {
                    if results.len() >= self.max_results {
                        break;
                    }
                    results.push(
                        self.build_match(
                            self.asian_origin.table,
                            self.asian_origin.template,
                            field,
                            label,
                            place,
                        )
                        .await?,
                    );
                }
            }
        }
        for entry in &self.race {
            if entry.pattern.is_match(&noun) {
                for place in &places {
                    if results.len() >= self.max_results {
                        break;
                    }
                    results.push(
                        self.build_match(
                            "B02001",
                            TEMPLATE_RACE,
                            entry.field,
                            entry.label,
                            place,
                        )
                        .await?,
                    );
                }
            }
        }

        results.sort_by(|a, b| b.population.cmp(&a.population));

        if results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(results))
        }
    }

    async fn answer_pattern(
        &self,
        pattern_str: &str,
        args: &HashMap<String, String>,
    ) -> Result<Option<Match>> {
        let question = fill_pattern(pattern_str, args);
        let matches = self.search(&question).await?;
        Ok(matches.and_then(|mut m| {
            if m.is_empty() {
                None
            } else {
                Some(m.remove(0))
            }
        }))
    }

    fn render_answer_html(&self, m: &Match) -> Result<String> {
        self.renderer.render(&m.template, &self.context(m))
    }

    fn render_answer_json(&self, m: &Match) -> Result<String> {
        Ok(serde_json::to_string(&self.context(m))?)
    }
}

/// Lowercase and trim a noun, stripping a trailing plural "s".
fn singularize(noun: &str) -> String {
    let mut noun = noun.trim().to_lowercase();
    if noun.ends_with('s') {
        noun.pop();
    }
    noun
}

/// Substitute `{variable}` placeholders from extracted arguments.
///
/// Placeholders with no corresponding argument are left in place.
fn fill_pattern(pattern_str: &str, args: &HashMap<String, String>) -> String {
    static PLACEHOLDER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("Invalid regex"));
    PLACEHOLDER
        .replace_all(pattern_str, |caps: &regex::Captures<'_>| {
            match args.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
