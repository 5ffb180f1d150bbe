use std::any::Any;
use std::{net::SocketAddr, sync::Arc};

use axum::body::{Bytes, Full};
use axum::http::{header, HeaderValue, Response};
use axum::response::Html;
use axum::{Router, extract::{Path, State}, response::IntoResponse, Json};
use reqwest::StatusCode;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::log;

use crate::commentary_service::CommentaryService;
use crate::config_handler::Config;
use crate::error::ApiError;
use crate::live_match_service::LiveMatchService;
use crate::models::Endpoint;
use crate::models_api::error_body::ErrorBody;
use crate::render;
use crate::rest_client::RestClient;
use crate::scorecard_service::ScorecardService;
use crate::snapshot_store::{SnapshotStore, SnapshotWriter};

#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
    pub client: RestClient,
    pub snapshots: Arc<dyn SnapshotWriter>,
}

impl ApiState {
    pub fn new(config: Arc<Config>) -> ApiState {
        let snapshots = Arc::new(SnapshotStore::new(&config.data_dir));
        ApiState::with_snapshots(config, snapshots)
    }

    pub fn with_snapshots(config: Arc<Config>, snapshots: Arc<dyn SnapshotWriter>) -> ApiState {
        ApiState { client: RestClient::new(config.clone()), config, snapshots }
    }
}

pub struct Api;
impl Api {
    pub async fn serve(state: ApiState) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
        let app = Api::router(state);
        log::info!("[API] Listening on {}", addr);
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await?;
        Ok(())
    }

    pub fn router(state: ApiState) -> Router {
        Router::new()
            .route("/", axum::routing::get(Api::get_live_matches)
                .layer(CatchPanicLayer::custom(html_panic)))
            .route("/scorecard/:match_id", axum::routing::get(Api::get_scorecard)
                .layer(CatchPanicLayer::custom(json_panic)))
            .route("/commentary/:match_id", axum::routing::get(Api::get_commentary)
                .layer(CatchPanicLayer::custom(json_panic)))
            .with_state(state)
            .layer(ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
            )
    }

    async fn get_live_matches(State(state): State<ApiState>) -> impl IntoResponse {
        match LiveMatchService::update(&state.client, state.snapshots.as_ref()).await {
            Ok(matches) => (StatusCode::OK, Html(render::matches_page(&matches))),
            Err(e) => {
                log::error!("[API] / failed with {}: {e}", e.status());
                (e.status(), Html(render::error_page(e.status(), &e.to_string())))
            },
        }
    }

    async fn get_scorecard(Path(match_id): Path<String>, State(state): State<ApiState>) -> axum::response::Response {
        let result = match Endpoint::scorecard(&match_id) {
            Ok(endpoint) => ScorecardService::update(&state.client, state.snapshots.as_ref(), &endpoint).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(innings) => Json(innings).into_response(),
            Err(e) => json_error(e),
        }
    }

    async fn get_commentary(Path(match_id): Path<String>, State(state): State<ApiState>) -> axum::response::Response {
        let result = match Endpoint::commentary(&match_id) {
            Ok(endpoint) => CommentaryService::update(&state.client, state.snapshots.as_ref(), &endpoint).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(entries) => Json(entries).into_response(),
            Err(e) => json_error(e),
        }
    }
}

fn json_error(e: ApiError) -> axum::response::Response {
    log::error!("[API] Request failed with {}: {e}", e.status());
    (e.status(), Json(ErrorBody::new(e.to_string()))).into_response()
}

fn panic_detail(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

fn panic_response(body: String, content_type: &'static str) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::from(body));
    *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    res.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    res
}

fn html_panic(err: Box<dyn Any + Send + 'static>) -> Response<Full<Bytes>> {
    log::error!("[API] Unexpected error: {}", panic_detail(&*err));
    let page = render::error_page(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred while fetching matches.");
    panic_response(page, "text/html; charset=utf-8")
}

fn json_panic(err: Box<dyn Any + Send + 'static>) -> Response<Full<Bytes>> {
    log::error!("[API] Unexpected error: {}", panic_detail(&*err));
    let body = serde_json::to_string(&ErrorBody::new("An internal server error occurred."))
        .unwrap_or_default();
    panic_response(body, "application/json")
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::body::{Body, HttpBody};
    use axum::http::Request;
    use axum::response::Response;
    use axum::Router;
    use reqwest::StatusCode;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::{html_panic, json_panic, panic_detail, Api, ApiState};
    use crate::config_handler::Config;
    use crate::snapshot_store::{NoopSnapshots, SnapshotWriter};

    struct BrokenSnapshots;

    impl SnapshotWriter for BrokenSnapshots {
        fn save(&self, name: &str, _data: &Value) {
            panic!("disk exploded while saving {name}");
        }
    }

    /// Provider answering `{}` on every path.
    fn start_upstream() -> SocketAddr {
        let app = Router::new().fallback(|| async { "{}" });
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        addr
    }

    fn test_state(snapshots: Arc<dyn SnapshotWriter>) -> ApiState {
        let upstream = start_upstream();
        let config = Config { api_url: format!("http://{upstream}"), api_key: "key".to_string(), ..Default::default() };
        ApiState::with_snapshots(Arc::new(config), snapshots)
    }

    async fn get(state: &ApiState, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        Api::router(state.clone()).oneshot(req).await.unwrap()
    }

    async fn body_text(res: Response) -> String {
        let mut body = res.into_body();
        let mut bytes = Vec::new();
        while let Some(chunk) = body.data().await {
            bytes.extend_from_slice(&chunk.unwrap());
        }
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn routes_answer_with_noop_snapshots() {
        let state = test_state(Arc::new(NoopSnapshots));

        let res = get(&state, "/scorecard/1").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "[]");

        let res = get(&state, "/commentary/1").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "[]");

        let res = get(&state, "/").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains("No live matches"));

        let res = get(&state, "/commentary/1;2").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn panic_in_json_route_is_json_500() {
        let state = test_state(Arc::new(BrokenSnapshots));

        for uri in ["/scorecard/1", "/commentary/1"] {
            let res = get(&state, uri).await;
            assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(res.headers()["content-type"], "application/json");
            let body: Value = serde_json::from_str(&body_text(res).await).unwrap();
            assert_eq!(body, serde_json::json!({"error": "An internal server error occurred."}));
        }
    }

    #[tokio::test]
    async fn panic_in_match_list_is_html_500() {
        let state = test_state(Arc::new(BrokenSnapshots));

        let res = get(&state, "/").await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");
        let page = body_text(res).await;
        assert!(page.contains("Error 500: An unexpected error occurred while fetching matches."));
    }

    #[test]
    fn panic_payloads() {
        assert_eq!(panic_detail(&"boom"), "boom");
        assert_eq!(panic_detail(&"boom".to_string()), "boom");
        assert_eq!(panic_detail(&42u8), "unknown panic");
    }

    #[test]
    fn panic_responses_are_500() {
        let html = html_panic(Box::new("index exploded"));
        assert_eq!(html.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(html.headers()["content-type"], "text/html; charset=utf-8");
        let json = json_panic(Box::new("scorecard exploded".to_string()));
        assert_eq!(json.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.headers()["content-type"], "application/json");
    }
}
