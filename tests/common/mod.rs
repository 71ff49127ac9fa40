//! Fake pricing service shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// Region name that makes the fake service answer with HTTP 500.
pub const FAILING_REGION: &str = "Down";
/// Region name that makes the fake service answer without `results`.
pub const MALFORMED_REGION: &str = "Broken";

/// Published averages for one item: (data center, region).
pub type Quote = (Option<f64>, Option<f64>);

#[derive(Clone)]
struct FakeState {
    quotes: Arc<HashMap<u32, Quote>>,
    requests: Arc<Mutex<Vec<(String, Vec<u32>)>>>,
}

/// Handle to a running fake service.
pub struct FakeService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<(String, Vec<u32>)>>>,
}

impl FakeService {
    /// Regions and id lists of every request received so far.
    pub fn requests(&self) -> Vec<(String, Vec<u32>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_sizes(&self) -> Vec<usize> {
        self.requests().iter().map(|(_, ids)| ids.len()).collect()
    }
}

async fn aggregated_handler(
    State(state): State<FakeState>,
    Path((region, ids)): Path<(String, String)>,
) -> Response {
    let ids: Vec<u32> = ids
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect();
    state
        .requests
        .lock()
        .unwrap()
        .push((region.clone(), ids.clone()));

    if region == FAILING_REGION {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if region == MALFORMED_REGION {
        return Json(json!({ "error": "rate limited" })).into_response();
    }

    let mut results = Vec::new();
    let mut failed = Vec::new();
    for id in ids {
        match state.quotes.get(&id) {
            Some((dc, reg)) => {
                let mut average = serde_json::Map::new();
                average.insert("world".into(), json!({ "price": 1.0 }));
                if let Some(price) = dc {
                    average.insert("dc".into(), json!({ "price": price }));
                }
                if let Some(price) = reg {
                    average.insert("region".into(), json!({ "price": price }));
                }
                results.push(json!({
                    "itemId": id,
                    "nq": { "averageSalePrice": Value::Object(average) },
                    "hq": {}
                }));
            }
            None => failed.push(id),
        }
    }

    Json(json!({ "results": results, "failedItems": failed })).into_response()
}

/// Starts the fake service on an ephemeral local port.
pub async fn spawn_fake_service(quotes: HashMap<u32, Quote>) -> FakeService {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        quotes: Arc::new(quotes),
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/api/v2/aggregated/:region/:ids", get(aggregated_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeService {
        base_url: format!("http://{}/api/v2", addr),
        requests,
    }
}
