use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use utoipa::OpenApi;

use produtos_api::app::docs::{openapi, ApiDoc};
use produtos_api::app::{OPENAPI_JSON_PATH, SWAGGER_PATH};
use produtos_api::infrastructure::MemoryStore;
use produtos_api::{create_app, AppState};

#[test]
fn test_openapi_info() {
    let doc = ApiDoc::openapi();
    assert_eq!(doc.info.title, "Exemplo de API");
    assert_eq!(doc.info.version, "1.0.0");
}

#[test]
fn test_all_routes_documented() {
    let doc = ApiDoc::openapi();
    let paths: Vec<&String> = doc.paths.paths.keys().collect();

    for path in [
        "/v1/produtos",
        "/v1/produtos/{id}",
        "/v2/produtos",
        "/v2/produtos/{id}",
    ] {
        assert!(
            paths.contains(&&path.to_string()),
            "{} not documented",
            path
        );
    }
}

#[test]
fn test_server_url_uses_port() {
    let doc = openapi(8080);
    let servers = doc.servers.unwrap();
    assert_eq!(servers[0].url, "http://localhost:8080");
}

#[tokio::test]
async fn test_openapi_json_is_served() {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let server = TestServer::new(create_app(state, 3000)).unwrap();

    let response = server.get(OPENAPI_JSON_PATH).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["paths"]["/v2/produtos/{id}"]["put"].is_object());
    assert!(body["components"]["schemas"]["Link"].is_object());
    assert_eq!(body["servers"][0]["url"], "http://localhost:3000");
}

#[tokio::test]
async fn test_swagger_ui_is_served() {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let server = TestServer::new(create_app(state, 3000)).unwrap();

    let response = server.get(SWAGGER_PATH).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/swagger/");

    let response = server.get("/swagger/").await;
    response.assert_status_ok();
    let content_type = response.header(header::CONTENT_TYPE);
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    assert!(response.text().to_lowercase().contains("<html"));
}
