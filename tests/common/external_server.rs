use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, extract::State, http::{HeaderMap, StatusCode, Uri}, response::IntoResponse};
use serde_json::Value;
use tokio::{sync::RwLock, task::JoinHandle};

pub const API_KEY: &str = "test-api-key";
pub const API_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";

#[derive(Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct AppState {
    pub responses: HashMap<String, CannedResponse>,
    pub calls: Vec<String>,
}

/// Stands in for the RapidAPI provider, answering canned bodies per path.
pub struct ExternalServer {
    port: u16,
    handles: Vec<JoinHandle<()>>,
    state: Arc<RwLock<AppState>>,
}

impl Drop for ExternalServer {
    fn drop(&mut self) {
        for e in &self.handles {
            e.abort();
        }
    }
}

impl ExternalServer {
    pub fn new(port: u16) -> ExternalServer {
        ExternalServer { port, handles: vec![], state: Arc::new(RwLock::new(AppState::default())) }
    }

    pub async fn start(&mut self) {
        let external_mock = {
            let port = self.port;
            let state = self.state.clone();
            tokio::spawn(async move { ExternalServer::serve_external_data(state, port).await })
        };
        self.handles.push(external_mock);
        tokio::time::sleep(Duration::from_millis(500)).await; // wait for mock to start
    }

    pub fn get_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub async fn add_json(&self, path: &str, body: &Value) {
        self.add_response(path, StatusCode::OK, &body.to_string(), None).await;
    }

    pub async fn add_response(&self, path: &str, status: StatusCode, body: &str, delay: Option<Duration>) {
        let response = CannedResponse { status, body: body.to_string(), delay };
        self.state.write().await.responses.insert(path.to_string(), response);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.state.read().await.calls.clone()
    }

    async fn serve_external_data(state: Arc<RwLock<AppState>>, port: u16) {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let app = Router::new()
            .fallback(ExternalServer::get_canned)
            .with_state(state);

        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await
            .unwrap();
    }

    async fn get_canned(uri: Uri, headers: HeaderMap, State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
        let path = uri.path().to_string();
        state.write().await.calls.push(path.clone());

        let key_ok = headers.get("x-rapidapi-key").map(|e| e == API_KEY).unwrap_or(false);
        let host_ok = headers.get("x-rapidapi-host").map(|e| e == API_HOST).unwrap_or(false);
        if !key_ok || !host_ok {
            return (StatusCode::UNAUTHORIZED, r#"{"message":"Invalid API key."}"#.to_string());
        }

        let canned = state.read().await.responses.get(&path).cloned();
        match canned {
            Some(canned) => {
                if let Some(delay) = canned.delay {
                    tokio::time::sleep(delay).await;
                }
                (canned.status, canned.body)
            },
            None => (StatusCode::NOT_FOUND, format!(r#"{{"message":"No route for {path}"}}"#)),
        }
    }
}
