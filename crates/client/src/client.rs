use serde::de::DeserializeOwned;
use shared_types::{ClientConfig, RawSearchResponse, SearchError};

use crate::error_convert::{JsonErrorExt, ReqwestErrorExt};

/// HTTP client for the multi-core search backend.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    rows: u32,
}

impl SearchClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8000/api`)
    /// with the default result window.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(&ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rows: config.rows,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of results requested per search.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Parameters for a `/search` request, in wire order.
    pub fn search_params(&self, query: &str, core_filter: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", query.to_string()), ("rows", self.rows.to_string())];
        if let Some(types) = core_filter.filter(|t| !t.trim().is_empty()) {
            params.push(("types", types.to_string()));
        }
        params
    }

    /// Full URL of the `/search` request for a query.
    pub fn search_url(&self, query: &str, core_filter: Option<&str>) -> String {
        self.url("/search", &self.search_params(query, core_filter))
    }

    /// Search the backend. With no `core_filter` every core is searched.
    ///
    /// Error payloads from the backend are returned as
    /// `RawSearchResponse::Error`, whatever the HTTP status; only a failed
    /// request or an unusable body is an `Err`.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn search(
        &self,
        query: &str,
        core_filter: Option<&str>,
    ) -> Result<RawSearchResponse, SearchError> {
        let params = self.search_params(query, core_filter);
        self.get("/search", &params).await
    }

    /// Names of the cores the backend can search.
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn cores(&self) -> Result<Vec<String>, SearchError> {
        self.get("/cores", &[]).await
    }

    fn url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        format!("{}{}{}", self.base_url, endpoint, string_params(params))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, SearchError> {
        let uri = self.url(endpoint, params);
        let response = self
            .http
            .get(&uri)
            .send()
            .await
            .map_err(|e| e.into_search_error())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.into_search_error())?;
        tracing::debug!(%status, bytes = body.len(), "search backend responded");

        serde_json::from_str(&body).map_err(|e| e.into_search_error())
    }
}

/// Serialize request parameters as a query string.
///
/// Pairs are joined with `&` in the given order and prefixed with `?`;
/// no parameters gives an empty string. Values are percent-encoded so
/// `&`, `=` and spaces in user text cannot split or corrupt the query.
pub fn string_params<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), urlencoding::encode(value.as_ref())))
        .collect();
    format!("?{}", pairs.join("&"))
}
