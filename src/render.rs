//! HTML rendering of answers.
//!
//! Each survey table has its own template, registered from embedded
//! strings when the renderer is built. Bad templates fail construction,
//! not the first request.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

/// Template for Hispanic-origin answers (table B03001).
pub const TEMPLATE_HISPANIC_ORIGIN: &str = "census/b03001";
/// Template for Asian-origin answers (table B02006).
pub const TEMPLATE_ASIAN_ORIGIN: &str = "census/b02006";
/// Template for broad race-category answers (table B02001).
pub const TEMPLATE_RACE: &str = "census/b02001";

const HISPANIC_ORIGIN_HTML: &str = r#"<div class="answer answer-census answer-hispanic-origin">
  <p><strong>{{population}}</strong> {{label}} people live in {{place.display_name}}.</p>
  <p class="answer-source">U.S. Census Bureau, table B03001 (Hispanic or Latino origin by specific origin).</p>
</div>"#;

const ASIAN_ORIGIN_HTML: &str = r#"<div class="answer answer-census answer-asian-origin">
  <p><strong>{{population}}</strong> {{label}} people live in {{place.display_name}}.</p>
  <p class="answer-source">U.S. Census Bureau, table B02006 (Asian alone by selected groups).</p>
</div>"#;

const RACE_HTML: &str = r#"<div class="answer answer-census answer-race">
  <p><strong>{{population}}</strong> people identifying as {{label}} live in {{place.display_name}}.</p>
  <p class="answer-source">U.S. Census Bureau, table B02001 (Race).</p>
</div>"#;

/// Template registry shared by every parser.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Build the renderer, registering all embedded templates.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(TEMPLATE_HISPANIC_ORIGIN, HISPANIC_ORIGIN_HTML)?;
        registry.register_template_string(TEMPLATE_ASIAN_ORIGIN, ASIAN_ORIGIN_HTML)?;
        registry.register_template_string(TEMPLATE_RACE, RACE_HTML)?;
        Ok(Self { registry })
    }

    /// Render a template with the given context.
    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        Ok(self.registry.render(template, context)?)
    }
}
