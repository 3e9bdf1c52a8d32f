use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A single user search submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    /// Restricts the search to one core (or a comma-separated list of cores).
    /// `None` searches every core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_filter: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            core_filter: None,
        }
    }

    pub fn with_core_filter(mut self, core_filter: Option<String>) -> Self {
        self.core_filter = core_filter.filter(|c| !c.trim().is_empty());
        self
    }
}

// ---------------------------------------------------------------------------
// Cores
// ---------------------------------------------------------------------------

/// Document categories the client knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreType {
    Thesis,
}

impl CoreType {
    /// All recognized cores in display order.
    pub const ALL: &'static [CoreType] = &[CoreType::Thesis];

    /// Parse a backend core name. Unknown names are not an error; the caller
    /// decides what to do with them.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "thesis" => Some(CoreType::Thesis),
            _ => None,
        }
    }

    /// Name used on the wire (`type` field, `types` parameter).
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreType::Thesis => "thesis",
        }
    }

    /// Human-readable name for filter controls.
    pub fn label(&self) -> &'static str {
        match self {
            CoreType::Thesis => "Theses",
        }
    }
}

// ---------------------------------------------------------------------------
// Raw backend payload
// ---------------------------------------------------------------------------

/// Body of a `/search` response. The backend sends exactly one of the two
/// shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSearchResponse {
    Error(BackendErrorPayload),
    Data(SearchPayload),
}

/// Successful search body: one block per searched core, in backend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub data: Vec<CoreBlock>,
}

/// Explicit error body returned by the backend (usually with a 4xx/5xx status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendErrorPayload {
    #[serde(rename = "errorType")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

impl BackendErrorPayload {
    pub fn kind(&self) -> BackendErrorType {
        BackendErrorType::from_name(&self.error_type)
    }
}

/// Error names the search backend is known to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendErrorType {
    UnexpectedServerError,
    SolrConnectionError,
    SolrSearchError,
    InvalidSearchTerm,
    Other(String),
}

impl BackendErrorType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "UNEXPECTED_SERVER_ERROR" => BackendErrorType::UnexpectedServerError,
            "SOLR_CONNECTION_ERROR" => BackendErrorType::SolrConnectionError,
            "SOLR_SEARCH_ERROR" => BackendErrorType::SolrSearchError,
            "INVALID_SEARCH_TERM" => BackendErrorType::InvalidSearchTerm,
            other => BackendErrorType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BackendErrorType::UnexpectedServerError => "UNEXPECTED_SERVER_ERROR",
            BackendErrorType::SolrConnectionError => "SOLR_CONNECTION_ERROR",
            BackendErrorType::SolrSearchError => "SOLR_SEARCH_ERROR",
            BackendErrorType::InvalidSearchTerm => "INVALID_SEARCH_TERM",
            BackendErrorType::Other(name) => name,
        }
    }
}

/// Highlight snippets keyed by document id, then by field name.
pub type HighlightMap = HashMap<String, HashMap<String, Vec<String>>>;

/// Results for one core.
///
/// Only `type` is required. A `response` or `highlighting` of an unexpected
/// shape decodes as no docs or no highlights, so one odd block never fails
/// the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreBlock {
    #[serde(rename = "type")]
    pub core_type: String,
    #[serde(default, deserialize_with = "lenient_response")]
    pub response: CoreResponse,
    #[serde(default, deserialize_with = "lenient_highlighting")]
    pub highlighting: HighlightMap,
}

impl CoreBlock {
    /// First highlighted snippet for `field` of document `doc_id`, if the
    /// backend supplied one.
    pub fn snippet(&self, doc_id: &str, field: &str) -> Option<&str> {
        self.highlighting
            .get(doc_id)?
            .get(field)?
            .first()
            .map(String::as_str)
    }
}

/// The `response` object inside a core block.
///
/// Docs stay as raw JSON so one bad document can be dropped without failing
/// the whole block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoreResponse {
    #[serde(
        rename = "numFound",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count"
    )]
    pub num_found: Option<u64>,
    #[serde(default, deserialize_with = "lenient_docs")]
    pub docs: Vec<Value>,
}

fn lenient_response<'de, D>(deserializer: D) -> Result<CoreResponse, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

fn lenient_docs<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(docs) => docs,
        _ => Vec::new(),
    })
}

/// Keeps every `id -> field -> snippets` entry it can read. A field given as
/// a single string counts as one snippet; anything else is skipped.
fn lenient_highlighting<'de, D>(deserializer: D) -> Result<HighlightMap, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(docs) = Value::deserialize(deserializer)? else {
        return Ok(HighlightMap::new());
    };
    Ok(docs
        .into_iter()
        .filter_map(|(doc_id, fields)| match fields {
            Value::Object(fields) => Some((
                doc_id,
                fields
                    .into_iter()
                    .map(|(field, snippets)| (field, text_values(snippets)))
                    .filter(|(_, snippets)| !snippets.is_empty())
                    .collect(),
            )),
            _ => None,
        })
        .collect())
}

/// A thesis document as stored in the `thesis` core.
///
/// Solr may return any field as a single value or as a list of values;
/// scalar fields keep the first usable element. Only `id` is required:
/// every other field falls back to absent when its value cannot be read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThesisDoc {
    #[serde(deserialize_with = "required_first")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_first")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_first")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "optional_first")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub yearpub: Option<i32>,
    #[serde(default, deserialize_with = "optional_first")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "optional_first")]
    pub advisor: Option<String>,
    #[serde(default, deserialize_with = "optional_first")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "optional_first")]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "optional_first")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "all_values")]
    pub keywords: Vec<String>,
}

/// Text of a scalar value. Numbers and booleans are rendered as text.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A scalar gives one value, a list gives its scalar elements.
fn text_values(value: Value) -> Vec<String> {
    match value {
        Value::Array(values) => values.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

fn optional_first<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_values(Value::deserialize(deserializer)?).into_iter().next())
}

fn required_first<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_first(deserializer)?
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| D::Error::custom("document id is empty"))
}

fn all_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_values(Value::deserialize(deserializer)?)
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect())
}

fn year_of(value: Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|year| i32::try_from(year).ok()),
        Value::String(text) => {
            let text = text.trim();
            text.parse().ok().or_else(|| {
                // Dates such as "2019-05-01" carry the year up front.
                let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
                if digits.len() == 4 {
                    digits.parse().ok()
                } else {
                    None
                }
            })
        }
        Value::Array(values) => values.into_iter().next().and_then(year_of),
        _ => None,
    }
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(year_of(Value::deserialize(deserializer)?))
}

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

/// A normalized thesis result, ready for display.
///
/// `title` and `description` may contain emphasis markers when the backend
/// highlighted them; run them through [`crate::highlight::parse`] to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesisResult {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub uri: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One display-ready search result, discriminated by the core it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultRecord {
    Thesis(ThesisResult),
}

impl ResultRecord {
    pub fn core_type(&self) -> CoreType {
        match self {
            ResultRecord::Thesis(_) => CoreType::Thesis,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ResultRecord::Thesis(t) => &t.id,
        }
    }

    /// Identity across cores: ids are only unique within one core.
    pub fn key(&self) -> String {
        format!("{}:{}", self.core_type().as_str(), self.id())
    }

    pub fn uri(&self) -> &str {
        match self {
            ResultRecord::Thesis(t) => &t.uri,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ResultRecord::Thesis(t) => &t.title,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            ResultRecord::Thesis(t) => &t.author,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ResultRecord::Thesis(t) => t.description.as_deref(),
        }
    }
}
