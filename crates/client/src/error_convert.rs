use shared_types::SearchError;

/// Convert a reqwest::Error into a transport SearchError.
pub fn reqwest_to_search_error(err: reqwest::Error) -> SearchError {
    if err.is_decode() {
        SearchError::transport(format!("response body is not a search payload: {err}"))
    } else if err.is_builder() {
        SearchError::transport(format!("invalid request: {err}"))
    } else {
        SearchError::transport(format!("request failed: {err}"))
    }
}

/// Convert a serde_json::Error from decoding a response body.
pub fn json_to_search_error(err: serde_json::Error) -> SearchError {
    if err.is_syntax() || err.is_eof() {
        SearchError::transport(format!("response body is not valid JSON: {err}"))
    } else {
        SearchError::transport(format!("response body is not a search payload: {err}"))
    }
}

/// Extension trait providing `.into_search_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_search_error(self) -> SearchError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_search_error(self) -> SearchError {
        reqwest_to_search_error(self)
    }
}

/// Extension trait providing `.into_search_error()` on serde_json::Error.
pub trait JsonErrorExt {
    fn into_search_error(self) -> SearchError;
}

impl JsonErrorExt for serde_json::Error {
    fn into_search_error(self) -> SearchError {
        json_to_search_error(self)
    }
}
