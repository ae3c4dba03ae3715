use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    server::app(engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_then_list() {
    let app = test_app().await;

    let body = json!({"name": "Rent", "amount": 1200, "icon": "", "tags": ["housing"]}).to_string();
    let (status, created) = send(&app, "POST", "/api/flows", Some(&body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert!(created["icon"].as_str().unwrap().starts_with("data:image/svg+xml;base64,"));
    assert_eq!(created["tags"], json!(["housing"]));

    let (status, listed) = send(&app, "GET", "/api/flows", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn list_sorts_and_always_has_tags() {
    let app = test_app().await;
    for (name, amount) in [("B", 5), ("A", 5), ("C", 10)] {
        let body = json!({"name": name, "amount": amount}).to_string();
        send(&app, "POST", "/api/flows", Some(&body)).await;
    }

    let (_, listed) = send(&app, "GET", "/api/flows", None).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|flow| flow["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert!(listed.as_array().unwrap().iter().all(|flow| flow["tags"] == json!([])));
}

#[tokio::test]
async fn create_without_amount_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/flows", Some(r#"{"name":"Rent"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Please provide name and amount"}));
}

#[tokio::test]
async fn null_fields_are_treated_as_missing() {
    let app = test_app().await;

    let body = r#"{"name":"Rent","amount":5,"description":null,"icon":null,"tags":null}"#;
    let (status, created) = send(&app, "POST", "/api/flows", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["description"], json!(""));
    assert_eq!(created["tags"], json!([]));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/flows", Some(r#"{"name":"Rent","amount":"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Wrong data format"}));
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = test_app().await;
    let body = json!({"name": "Rent", "amount": 1200, "tags": ["housing"]}).to_string();
    let (_, created) = send(&app, "POST", "/api/flows", Some(&body)).await;
    let id = created["id"].as_str().unwrap();

    let patch = json!({
        "id": "ignored",
        "name": "Rent",
        "description": "flat",
        "amount": 1300.5,
        "icon": "data:image/png;base64,aG91c2U=",
        "tags": ["fixed"]
    })
    .to_string();
    let (status, updated) = send(&app, "PATCH", &format!("/api/flows/{id}"), Some(&patch)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["description"], json!("flat"));
    assert_eq!(updated["amount"], json!(1300.5));
    assert_eq!(updated["icon"], json!("data:image/png;base64,aG91c2U="));
    assert_eq!(updated["tags"], json!(["fixed"]));

    let (status, fetched) = send(&app, "GET", &format!("/api/flows/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_to_zero_amount_is_rejected() {
    let app = test_app().await;
    let body = json!({"name": "Rent", "amount": 1200}).to_string();
    let (_, created) = send(&app, "POST", "/api/flows", Some(&body)).await;
    let id = created["id"].as_str().unwrap();

    let patch = json!({"name": "Rent", "amount": 0}).to_string();
    let (status, error) = send(&app, "PATCH", &format!("/api/flows/{id}"), Some(&patch)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, json!({"error": "Please provide name and amount"}));
    let (_, fetched) = send(&app, "GET", &format!("/api/flows/{id}"), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_unknown_flow_fails() {
    let app = test_app().await;

    let patch = json!({"name": "Rent", "amount": 1}).to_string();
    let (status, error) = send(&app, "PATCH", "/api/flows/missing", Some(&patch)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, json!({"error": "Flow with given ID does not exist"}));
}

#[tokio::test]
async fn delete_acknowledges_then_fails_on_repeat() {
    let app = test_app().await;
    let body = json!({"name": "Rent", "amount": 1200}).to_string();
    let (_, created) = send(&app, "POST", "/api/flows", Some(&body)).await;
    let uri = format!("/api/flows/{}", created["id"].as_str().unwrap());

    let (status, ack) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({"ok": "Flow deleted"}));

    let (status, error) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, json!({"error": "Flow with given ID does not exist"}));

    let (_, listed) = send(&app, "GET", "/api/flows", None).await;
    assert_eq!(listed, json!([]));
}
