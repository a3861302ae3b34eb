//! In-process tests of the HTTP documentation endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use swagger_from_routes::{
    config::{BasePath, DocConfig},
    route::{HttpMethod, ParamSpec, RouteDescriptor},
    server::router,
};
use tower::ServiceExt;

fn routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new(HttpMethod::Get, "/users(.:format)").with_description("List users"),
        RouteDescriptor::new(HttpMethod::Get, "/users/:id(.:format)")
            .with_param("id", ParamSpec::new().data_type("Integer").required(true))
            .with_http_code(404, "Not found"),
    ]
}

async fn get(app: Router, uri: &str) -> (StatusCode, header::HeaderMap, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::HOST, "api.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap();
    (status, headers, json)
}

#[tokio::test]
async fn index_lists_every_route() {
    let app = router(DocConfig::new(), routes()).unwrap();

    let (status, headers, json) = get(app, "/3scale_doc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_REQUEST_METHOD], "*");
    assert_eq!(json["swaggerVersion"], "1.1");
    assert_eq!(json["basePath"], "http://api.example.com");
    assert_eq!(json["operations"], serde_json::json!([]));

    // Two host routes plus the two documentation routes
    let apis = json["apis"].as_array().unwrap();
    assert_eq!(apis.len(), 4);
    assert_eq!(apis[0]["operations"][0]["group"], "users");
    assert_eq!(apis[2]["operations"][0]["group"], "3scale_doc");
}

#[tokio::test]
async fn index_hides_documentation_routes() {
    let config = DocConfig::new().with_hide_documentation_path(true);
    let app = router(config, routes()).unwrap();

    let (_, _, json) = get(app, "/3scale_doc").await;

    assert_eq!(json["apis"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn show_resource_document() {
    let config = DocConfig::new()
        .with_mount_path("/docs")
        .with_base_path(BasePath::resolver(|req| Some(format!("{}/api", req.base_url))));
    let app = router(config, routes()).unwrap();

    let (status, headers, json) = get(app, "/docs/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(json["basePath"], "http://api.example.com/api");
    assert_eq!(json["resourcePath"], "");

    let apis = json["apis"].as_array().unwrap();
    assert_eq!(apis.len(), 2);
    assert_eq!(apis[1]["path"], "/users/{id}{format}");

    let operation = &apis[1]["operations"][0];
    assert!(operation.get("group").is_none());
    assert_eq!(operation["nickname"], "GET-users-id-format");
    assert_eq!(operation["parameters"][0]["paramType"], "path");
    assert_eq!(operation["errorResponses"][0]["code"], 404);
    assert!(apis[0]["operations"][0].get("errorResponses").is_none());
}

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let app = router(DocConfig::new(), routes()).unwrap();

    let (status, _, json) = get(app, "/3scale_doc/ghosts").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn advertised_format_suffix_is_served() {
    let app = router(DocConfig::new(), routes()).unwrap();

    let (status, _, index) = get(app.clone(), "/3scale_doc.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(index["apis"][2]["path"], "/3scale_doc{format}");

    let (status, headers, json) = get(app, "/3scale_doc/users.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(json["apis"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn nested_mount_path_hides_documentation_routes() {
    let config = DocConfig::new()
        .with_mount_path("/docs/v1")
        .with_hide_documentation_path(true);
    let app = router(config, routes()).unwrap();

    let (status, _, json) = get(app, "/docs/v1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["apis"].as_array().unwrap().len(), 2);
}

#[test]
fn relative_mount_path_is_rejected() {
    assert!(router(DocConfig::new().with_mount_path("docs"), routes()).is_err());
}
