//! Shared fixtures: an in-memory census backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use civiq::error::ApiError;
use civiq::{
    AnswerConfig, CensusApi, CensusPopulationParser, Place, Renderer, Result, TableData,
};

/// In-memory `CensusApi` with optional injected failure.
#[derive(Default)]
pub struct FakeCensusApi {
    pub places: Vec<Place>,
    pub tables: HashMap<String, TableData>,
    /// When true, every call fails like a broken upstream
    pub fail: bool,
}

impl FakeCensusApi {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CensusApi for FakeCensusApi {
    async fn find_places(&self, _prefix: &str) -> Result<Vec<Place>> {
        if self.fail {
            return Err(ApiError::MalformedPayload {
                url: "fake://geo/search".to_string(),
                reason: "injected failure".to_string(),
            }
            .into());
        }
        Ok(self.places.clone())
    }

    async fn fetch_table(&self, table: &str, geoids: &[&str]) -> Result<TableData> {
        if self.fail {
            return Err(ApiError::MalformedPayload {
                url: format!("fake://{table}"),
                reason: "injected failure".to_string(),
            }
            .into());
        }
        let all = self.tables.get(table).cloned().unwrap_or_default();
        Ok(all
            .into_iter()
            .filter(|(geoid, _)| geoids.contains(&geoid.as_str()))
            .collect())
    }
}

pub fn place(geoid: &str, name: &str) -> Place {
    Place {
        full_geoid: geoid.to_string(),
        display_name: name.to_string(),
        sumlevel: Some(160),
    }
}

/// Backend where `count` geographies resolve, each with the given
/// Dominican-origin (b03001007) population.
pub fn dominican_backend(populations: &[i64]) -> FakeCensusApi {
    let mut places = Vec::new();
    let mut rows = HashMap::new();
    for (i, population) in populations.iter().enumerate() {
        let geoid = format!("16000US00000{i:02}");
        places.push(place(&geoid, &format!("Place {i}")));
        rows.insert(
            geoid,
            HashMap::from([("b03001007".to_string(), json!(population.to_string()))]),
        );
    }
    FakeCensusApi {
        places,
        tables: HashMap::from([("B03001".to_string(), rows)]),
        fail: false,
    }
}

pub fn parser_over(api: FakeCensusApi) -> CensusPopulationParser {
    CensusPopulationParser::new(
        Arc::new(api),
        Arc::new(Renderer::new().unwrap()),
        &AnswerConfig::default(),
    )
    .unwrap()
}
