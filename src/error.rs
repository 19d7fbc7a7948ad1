//! Error types for civiq.

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, CiviqError>;

/// Main error type for civiq operations.
#[derive(Error, Debug)]
pub enum CiviqError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Census API error: {0}")]
    Api(#[from] ApiError),

    #[error("Lookup table error: {0}")]
    Table(#[from] TableError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors from the outbound Census Reporter API calls.
///
/// Every variant is a per-module failure: the dispatcher catches it at the
/// module boundary and keeps trying other modules.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed payload from {url}: {reason}")]
    MalformedPayload { url: String, reason: String },

    #[error("No table data returned for geography {0}")]
    MissingGeography(String),

    #[error("Field {field} missing from table row for geography {geoid}")]
    MissingField { geoid: String, field: String },

    #[error("Value for field {field} is not a count: {value}")]
    NonNumeric { field: String, value: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            ApiError::Http(e)
        }
    }
}

/// Static lookup table validation errors, raised at parser construction.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Duplicate field id {field} in table {table}")]
    DuplicateField { table: String, field: String },

    #[error("Empty label for field {field} in table {table}")]
    EmptyLabel { table: String, field: String },

    #[error("Field id {field} does not belong to table {table}")]
    ForeignField { table: String, field: String },

    #[error("Invalid pattern '{pattern}' for field {field}: {source}")]
    InvalidPattern {
        pattern: String,
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// Parser registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No parser registered for implementation id '{0}'")]
    UnknownImplementation(String),

    #[error("No module record named '{0}'")]
    UnknownModule(String),
}

/// Persistent-entity validation errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid data source URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
