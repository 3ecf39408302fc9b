//! API integration tests against a server bound to an ephemeral port

use catalog_server::{api, config::AppConfig, AppState};
use reqwest::Client;
use serde_json::{json, Value};

/// Start a server with the default configuration and return its base URL
async fn spawn_server(config: AppConfig) -> String {
    let app = api::create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn post_graphql(client: &Client, url: &str, query: &str) -> Value {
    let response = client
        .post(url)
        .json(&json!({ "query": query }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_store_sizes() {
    let base = spawn_server(AppConfig::default()).await;
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/ready", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["status"], "ready");
    assert_eq!(body["books"], 3);
    assert_eq!(body["products"], 3);
}

#[tokio::test]
async fn test_library_endpoint() {
    let base = spawn_server(AppConfig::default()).await;
    let client = Client::new();
    let url = format!("{}/graphql", base);

    let body = post_graphql(&client, &url, "{ books { id title author available } }").await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 3);
    assert!(body.get("errors").is_none());

    let body = post_graphql(
        &client,
        &url,
        r#"mutation { borrowBook(userId: "1", bookId: "1") { id title available } }"#,
    )
    .await;
    assert_eq!(body["data"]["borrowBook"]["available"], false);
}

#[tokio::test]
async fn test_error_envelope() {
    let base = spawn_server(AppConfig::default()).await;
    let client = Client::new();
    let url = format!("{}/graphql", base);

    let body = post_graphql(
        &client,
        &url,
        r#"mutation { borrowBook(userId: "1", bookId: "2") { id } }"#,
    )
    .await;

    let error = &body["errors"][0];
    assert_eq!(error["message"], "Book \"To Kill a Mockingbird\" is not available");
    assert_eq!(error["path"], json!(["borrowBook"]));
    assert!(error["locations"].is_array());
    assert_eq!(error["extensions"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_entities_endpoint() {
    let base = spawn_server(AppConfig::default()).await;
    let client = Client::new();
    let url = format!("{}/entities/graphql", base);

    let body = post_graphql(&client, &url, r#"{ searchProducts(name: "Lap") { id name } }"#).await;
    assert_eq!(
        body["data"]["searchProducts"],
        json!([{ "id": "1", "name": "Laptop" }])
    );
}

#[tokio::test]
async fn test_graphiql_toggle() {
    let client = Client::new();

    let base = spawn_server(AppConfig::default()).await;
    let response = client
        .get(format!("{}/graphql", base))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let page = response.text().await.expect("Failed to read body");
    assert!(page.contains("graphiql"));

    let mut config = AppConfig::default();
    config.graphql.graphiql = false;
    let base = spawn_server(config).await;
    let response = client
        .get(format!("{}/graphql", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn test_introspection_can_be_disabled() {
    let client = Client::new();
    let query = "{ __schema { queryType { name } } }";

    let base = spawn_server(AppConfig::default()).await;
    let body = post_graphql(&client, &format!("{}/graphql", base), query).await;
    assert_eq!(body["data"]["__schema"]["queryType"]["name"], "Query");

    let mut config = AppConfig::default();
    config.graphql.introspection = false;
    let base = spawn_server(config).await;
    let body = post_graphql(&client, &format!("{}/graphql", base), query).await;
    assert!(body.get("errors").is_some() || body["data"]["__schema"].is_null());
}
