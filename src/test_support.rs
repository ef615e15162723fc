//! In-process stub backend for request tests

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;

use crate::ajax::AjaxClient;
use crate::model::config::Config;

/// Canned response for one method and path
#[derive(Debug, Clone)]
pub struct Route {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub body: String,
}

pub fn route(method: &str, path: &str, status: u16, body: &str) -> Route {
    Route {
        method: method.to_string(),
        path: path.to_string(),
        status,
        body: body.to_string(),
    }
}

/// Request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct StubState {
    routes: Arc<HashMap<(String, String), (u16, String)>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Backend on an ephemeral local port that records every request
pub struct StubBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    /// Start serving; unknown routes answer 404
    pub async fn start(routes: Vec<Route>) -> Self {
        let routes = routes
            .into_iter()
            .map(|r| ((r.method, r.path), (r.status, r.body)))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            routes: Arc::new(routes),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(handle).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Config pointing at this backend with a short redirect delay
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.app_url = self.base_url.clone();
        config.client_id = Some("test-client.apps.example.com".to_string());
        config.redirect_delay_ms = 20;
        config.request_timeout_secs = 5;
        config
    }

    pub fn client(&self) -> Arc<AjaxClient> {
        Arc::new(AjaxClient::new(&self.config()).unwrap())
    }
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let headers = headers
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    state.requests.lock().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body,
    });

    let key = (method.to_string(), uri.path().to_string());
    match state.routes.get(&key) {
        Some((status, body)) => {
            let status = StatusCode::from_u16(*status).unwrap();
            if body.is_empty() {
                status.into_response()
            } else {
                (status, [(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
            }
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
