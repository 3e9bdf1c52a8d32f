use axum::{
    extract::{Query, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long the mock backend stalls on queries starting with `slow`.
pub const SLOW_DELAY: Duration = Duration::from_millis(300);

/// Raw query strings received by the mock backend, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// A mock search backend listening on an ephemeral local port.
pub struct TestBackend {
    pub base_url: String,
    pub requests: RequestLog,
}

impl TestBackend {
    pub fn client(&self) -> client::SearchClient {
        client::SearchClient::new(&self.base_url)
    }

    pub fn last_request(&self) -> Option<String> {
        self.requests.lock().unwrap().last().cloned()
    }
}

/// Start the mock backend.
///
/// `/api/search` answers by query text:
///   - `empty`: one thesis block with zero docs
///   - `error`: 400 with a backend error payload
///   - `garbage`: 200 with an HTML body
///   - `slow*`: waits `SLOW_DELAY`, then answers like any other query
///   - anything else: a thesis block with docs `{q}-1`, `{q}-2` (the first
///     one highlighted), one doc without an id, and an unknown `article` block
pub async fn spawn_backend() -> TestBackend {
    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/search", get(search))
        .route("/api/cores", get(cores))
        .with_state(requests.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });

    TestBackend {
        base_url: format!("http://{addr}/api"),
        requests,
    }
}

/// Base URL of a port with nothing listening on it.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{addr}/api")
}

async fn search(
    State(requests): State<RequestLog>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    requests.lock().unwrap().push(raw.unwrap_or_default());

    let q = params.get("q").cloned().unwrap_or_default();
    match q.as_str() {
        "empty" => Json(json!({
            "data": [{ "type": "thesis", "response": { "numFound": 0, "docs": [] }, "highlighting": {} }]
        }))
        .into_response(),
        "error" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errorType": "INVALID_SEARCH_TERM", "message": "Must supply a search term with the parameter \"q\"." })),
        )
            .into_response(),
        "garbage" => (
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body>502 Bad Gateway</body></html>",
        )
            .into_response(),
        _ => {
            if q.starts_with("slow") {
                tokio::time::sleep(SLOW_DELAY).await;
            }
            Json(thesis_payload(&q)).into_response()
        }
    }
}

async fn cores() -> Json<Value> {
    Json(json!(["thesis", "test"]))
}

fn thesis_payload(q: &str) -> Value {
    let first = format!("{q}-1");
    let second = format!("{q}-2");
    json!({
        "data": [
            {
                "type": "thesis",
                "response": {
                    "numFound": 3,
                    "docs": [
                        {
                            "id": first,
                            "title": [format!("{q} in the Mekong delta")],
                            "author": ["Nguyen Van A"],
                            "description": [format!("A thesis about {q}.")],
                            "yearpub": ["2017"],
                            "publisher": ["VNU"],
                            "uri": [format!("http://repository.vnu.edu.vn/handle/{first}")],
                            "keywords": [q, "agriculture"],
                        },
                        { "title": "document without an id" },
                        {
                            "id": second,
                            "title": format!("Second {q} thesis"),
                            "author": "Tran Thi B",
                            "uri": format!("http://repository.vnu.edu.vn/handle/{second}"),
                        },
                    ],
                },
                "highlighting": {
                    first.clone(): { "title": [format!("<em>{q}</em> in the Mekong delta")] },
                    second.clone(): {},
                },
            },
            { "type": "article", "response": { "docs": [{ "id": "article-1" }] }, "highlighting": {} },
        ]
    })
}
