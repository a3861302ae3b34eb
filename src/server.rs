//! HTTP endpoints serving the API description.
//!
//! Two read-only endpoints are mounted under the configured mount path:
//!
//! - `GET {mount_path}` returns the index document of every resource
//! - `GET {mount_path}/:name` returns the document of one resource, or 404
//!
//! Both also answer with a `.json` suffix, the `{format}` form the documentation routes
//! advertise. Both responses allow cross-origin reads from any origin.

use crate::config::{DocConfig, RequestContext};
use crate::document::DocumentAssembler;
use crate::error::Error;
use crate::grouper::RouteIndex;
use crate::route::RouteDescriptor;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{debug, info};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

const CORS_HEADERS: [(header::HeaderName, &str); 2] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_REQUEST_METHOD, "*"),
];

/// Shared, read-only state of the documentation endpoints
#[derive(Clone)]
pub struct DocState {
    config: Arc<DocConfig>,
    index: Arc<RouteIndex>,
}

impl DocState {
    /// Freeze the configuration and the route table, including the documentation routes
    pub fn new(config: DocConfig, routes: Vec<RouteDescriptor>) -> Self {
        let index = RouteIndex::new(routes).with_documentation_routes(&config);
        Self {
            config: Arc::new(config),
            index: Arc::new(index),
        }
    }
}

/// Build the router serving both documentation endpoints
///
/// Fails with [`Error::InvalidArgument`] when the mount path cannot be routed.
pub fn router(config: DocConfig, routes: Vec<RouteDescriptor>) -> Result<Router, Error> {
    config.validate()?;
    let mount_path = config.mount_path().trim_end_matches('/').to_string();
    let state = DocState::new(config, routes);

    info!("Mounting API description at {}", mount_path);

    let app = Router::new()
        .route(&mount_path, get(list_resources))
        .route(&format!("{}.json", mount_path), get(list_resources))
        .route(&format!("{}/:name", mount_path), get(show_resource))
        .with_state(state);
    Ok(app)
}

/// Serve the documentation endpoints until the process is stopped
pub async fn serve(addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving API description on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn list_resources(State(state): State<DocState>, headers: HeaderMap) -> Response {
    let request = request_context(&headers);
    let groups = state.index.groups();
    let document = DocumentAssembler::new(&state.config).build_index(&groups, &request);

    (CORS_HEADERS, Json(document)).into_response()
}

async fn show_resource(
    State(state): State<DocState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    let request = request_context(&headers);
    let resource = name.strip_suffix(".json").unwrap_or(&name);
    let routes = state
        .index
        .resource(resource)
        .ok_or_else(|| Error::ResourceNotFound(name.clone()))?;
    let document = DocumentAssembler::new(&state.config).build_resource(&routes, &request);

    Ok((CORS_HEADERS, Json(document)).into_response())
}

/// The base URL a request was addressed to, from its `Host` and `X-Forwarded-Proto` headers
fn request_context(headers: &HeaderMap) -> RequestContext {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    let base_url = format!("{}://{}", scheme, host);
    debug!("Request base URL: {}", base_url);
    RequestContext::new(base_url)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::ResourceNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = json!({
            "error": error_type,
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
