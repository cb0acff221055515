use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::routing::get;
use axum::{Json, Router};
use ferrocart_commands::{Platform, PlatformError};
use ferrocart_core::{CommandInfo, CoreError, DispatchError, Parameters, ProviderInfo};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use crate::error::ApiError;

pub const API_PREFIX: &str = "/api/v1";

/// Command paths that would shadow the service routes under [`API_PREFIX`].
const RESERVED_PATHS: [&str; 2] = ["/commands", "/providers"];

type AppState = Arc<Platform>;

#[derive(Debug, Clone, Serialize)]
pub struct CommandDoc {
    pub path: String,
    pub endpoint: String,
    pub model: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub requires_provider: bool,
}

impl CommandDoc {
    fn from_info(info: &CommandInfo) -> Self {
        Self {
            path: info.path().to_owned(),
            endpoint: format!("{API_PREFIX}{}", info.path()),
            model: info.model().map(str::to_owned),
            description: info.description().to_owned(),
            tags: info.group_tags(),
            requires_provider: info.requires_provider(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderDoc {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub models: Vec<String>,
    pub credentials: Vec<String>,
    pub missing_credentials: Vec<String>,
}

impl ProviderDoc {
    fn from_info(info: &ProviderInfo) -> Self {
        Self {
            name: info.name().to_owned(),
            description: info.description().to_owned(),
            website: info.website().map(str::to_owned),
            models: info.models(),
            credentials: info.credentials().to_vec(),
            missing_credentials: info.missing_credentials(|name| std::env::var(name).ok()),
        }
    }
}

/// Builds the application: service routes, one GET route per command, a
/// JSON 404 fallback and permissive CORS.
pub fn app(platform: Platform) -> Router {
    let state: AppState = Arc::new(platform);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(index))
        .route("/api/v1/commands", get(list_commands))
        .route("/api/v1/providers", get(list_providers));

    for path in servable_paths(state.runner().list_commands()) {
        let endpoint = format!("{API_PREFIX}{path}");
        router = router.route(
            &endpoint,
            get(
                move |State(state): State<AppState>,
                      Query(query): Query<BTreeMap<String, String>>| {
                    run_command(state, path.clone(), query)
                },
            ),
        );
    }

    router.fallback(fallback).with_state(state).layer(cors)
}

fn servable_paths(paths: Vec<String>) -> Vec<String> {
    paths
        .into_iter()
        .filter(|path| {
            let reserved = RESERVED_PATHS.contains(&path.as_str());
            if reserved {
                warn!(command = %path, "command path collides with a service route, not served");
            }
            !reserved
        })
        .collect()
}

async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": "ferrocart",
        "version": env!("CARGO_PKG_VERSION"),
        "default_provider": state.default_provider(),
        "docs": "/api/v1/commands",
        "commands": state.runner().list_commands(),
    }))
}

async fn list_commands(State(state): State<AppState>) -> Json<Vec<CommandDoc>> {
    Json(state.runner().commands().iter().map(CommandDoc::from_info).collect())
}

async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderDoc>> {
    Json(state.runner().registry().providers().map(ProviderDoc::from_info).collect())
}

async fn run_command(
    state: AppState,
    path: String,
    mut query: BTreeMap<String, String>,
) -> Result<Json<Value>, ApiError> {
    let provider = query.remove("provider");
    let params = query
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect::<Parameters>();
    debug!(command = %path, provider = ?provider, "http request");

    let envelope = state
        .execute(&path, provider.as_deref(), params)
        .await
        .map_err(|error| {
            let code = error.code();
            let message = error.to_string();
            let error = ApiError::from(error);
            warn!(
                command = %path,
                status = %error.status(),
                code,
                error = %message,
                "command failed"
            );
            error
        })?;

    let body = serde_json::to_value(&envelope).map_err(CoreError::from)?;
    Ok(Json(body))
}

async fn fallback(State(state): State<AppState>, uri: Uri) -> ApiError {
    match uri.path().strip_prefix(API_PREFIX) {
        Some(path) if path.starts_with('/') => ApiError::from(PlatformError::from(
            DispatchError::CommandNotFound {
                path: path.to_owned(),
                available: state.runner().list_commands(),
            },
        )),
        _ => ApiError::not_found(format!("no route for {}", uri.path())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use ferrocart_commands::PlatformConfig;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Platform::assemble(PlatformConfig::default()))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn index_lists_commands() {
        let (status, body) = get_json("/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "ferrocart");
        assert!(body["commands"]
            .as_array()
            .expect("commands")
            .contains(&json!("/orders/summary")));
    }

    #[tokio::test]
    async fn command_endpoint_returns_envelope() {
        let (status, body) = get_json("/api/v1/orders/summary?provider=demo&days=7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "demo");
        assert_eq!(body["model"], "OrderSummary");
        assert_eq!(body["command"], "/orders/summary");
        assert_eq!(body["results"].as_array().map(Vec::len), Some(7));
        assert!(body["extra"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn unknown_command_is_404_with_alternatives() {
        let (status, body) = get_json("/api/v1/does/not/exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["code"], "dispatch.command_not_found");
        assert!(!body["error"]["available"].as_array().expect("available").is_empty());
    }

    #[tokio::test]
    async fn unknown_provider_is_500() {
        let (status, body) = get_json("/api/v1/orders/summary?provider=nope").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "dispatch.provider_not_found");
        assert_eq!(body["error"]["available"], json!(["demo"]));
    }

    #[tokio::test]
    async fn invalid_params_are_500_with_message() {
        let (status, body) = get_json("/api/v1/orders/summary?days=soon").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "fetch.invalid_params");
        assert!(body["error"]["message"].as_str().expect("message").contains("days"));
    }

    #[tokio::test]
    async fn providers_endpoint_describes_demo() {
        let (status, body) = get_json("/api/v1/providers").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "demo");
        assert_eq!(body[0]["models"].as_array().map(Vec::len), Some(24));
    }

    #[test]
    fn paths_shadowing_service_routes_are_not_served() {
        let paths = vec![
            String::from("/commands"),
            String::from("/orders/summary"),
            String::from("/providers"),
            String::from("/providers/list"),
        ];

        assert_eq!(
            servable_paths(paths),
            vec![String::from("/orders/summary"), String::from("/providers/list")]
        );
    }

    #[tokio::test]
    async fn commands_endpoint_documents_every_path() {
        let (_, body) = get_json("/api/v1/commands").await;
        let docs = body.as_array().expect("array");

        assert_eq!(docs.len(), 36);
        let status = docs
            .iter()
            .find(|doc| doc["path"] == "/system/status")
            .expect("system status documented");
        assert_eq!(status["requires_provider"], false);
        assert_eq!(status["endpoint"], "/api/v1/system/status");
    }
}
