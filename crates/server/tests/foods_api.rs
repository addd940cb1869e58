use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::foods::{FoodRecord, InMemoryFoodStore};
use tower::ServiceExt;

use server::routes::{self, AppState};
use server::startup::build_cors;

fn build_app(records: Vec<FoodRecord>) -> Router {
    let store = InMemoryFoodStore::from_records(records);
    routes::build_router(AppState::new(Arc::new(store)), build_cors())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &'static str) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder().method(method).uri(uri).body(Body::from(body))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn index_returns_greeting() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let resp = app.clone().oneshot(Request::builder().uri("/").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"Hello world!");
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn full_crud_scenario() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let record = json!({"netid": "abc123", "food": "pizza"});

    let (status, body) = send(&app, "POST", "/foods/", Some(record.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, record);

    let (status, body) = send(&app, "GET", "/foods/abc123/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, record);

    let (status, body) = send(&app, "POST", "/foods/", Some(record.clone())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "NetID already exists"}));

    let (status, body) = send(&app, "POST", "/foods/abc123/", Some(json!({"food": "sushi"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"netid": "abc123", "food": "sushi"}));

    let (status, body) = send(&app, "DELETE", "/foods/abc123/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"netid": "abc123", "food": "sushi"}));

    let (status, body) = send(&app, "GET", "/foods/abc123/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "NetID not found"}));
    Ok(())
}

#[tokio::test]
async fn list_returns_seeded_records() -> anyhow::Result<()> {
    let app = build_app(vec![FoodRecord::new("b2", "tacos"), FoodRecord::new("a1", "ramen")]);
    let (status, body) = send(&app, "GET", "/foods/", None).await?;
    assert_eq!(status, StatusCode::OK);
    let foods = body["foods"].as_array().cloned().unwrap_or_default();
    assert_eq!(foods.len(), 2);
    assert!(foods.contains(&json!({"netid": "a1", "food": "ramen"})));
    assert!(foods.contains(&json!({"netid": "b2", "food": "tacos"})));
    Ok(())
}

#[tokio::test]
async fn empty_store_lists_empty_array() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let (status, body) = send(&app, "GET", "/foods/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"foods": []}));
    Ok(())
}

#[tokio::test]
async fn unknown_netid_is_not_found_everywhere() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    for (method, body) in [("GET", None), ("DELETE", None), ("POST", Some(json!({"food": "x"})))] {
        let (status, resp) = send(&app, method, "/foods/ghost/", body).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(resp, json!({"error": "NetID not found"}));
    }
    // update must not have created the record
    let (status, _) = send(&app, "GET", "/foods/ghost/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_netid_is_404_even_with_bad_body() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let (status, _) = send_raw(&app, "POST", "/foods/ghost/", "not json").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_payloads_are_bad_requests() -> anyhow::Result<()> {
    let app = build_app(vec![FoodRecord::new("abc123", "pizza")]);

    let (status, body) = send(&app, "POST", "/foods/", Some(json!({"netid": "n1"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("food"));

    let (status, _) = send(&app, "POST", "/foods/", Some(json!({"food": "pizza"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/foods/", Some(json!({"netid": 7, "food": "pizza"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_raw(&app, "POST", "/foods/", "{broken").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/foods/abc123/", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/foods/abc123/", Some(json!({"food": ""}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "food must not be empty"}));

    // nothing above changed the stored value
    let (_, body) = send(&app, "GET", "/foods/abc123/", None).await?;
    assert_eq!(body, json!({"netid": "abc123", "food": "pizza"}));
    Ok(())
}

#[tokio::test]
async fn whitespace_values_are_valid_records() -> anyhow::Result<()> {
    let app = build_app(vec![]);

    let (status, body) = send(&app, "POST", "/foods/", Some(json!({"netid": "ws1", "food": "   "}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"netid": "ws1", "food": "   "}));

    let (status, body) = send(&app, "POST", "/foods/", Some(json!({"netid": " ", "food": "pizza"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"netid": " ", "food": "pizza"}));

    let (status, body) = send(&app, "GET", "/foods/ws1/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"netid": "ws1", "food": "   "}));

    let (status, body) = send(&app, "POST", "/foods/ws1/", Some(json!({"food": "\t"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"netid": "ws1", "food": "\t"}));
    Ok(())
}

#[tokio::test]
async fn body_without_content_type_is_accepted() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let (status, body) = send_raw(&app, "POST", "/foods/", r#"{"netid":"raw1","food":"dumplings"}"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"netid": "raw1", "food": "dumplings"}));
    Ok(())
}

#[tokio::test]
async fn cors_allows_any_origin() -> anyhow::Result<()> {
    let app = build_app(vec![]);
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/foods/")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert!(resp.status().is_success());
    let allow = resp.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok());
    assert_eq!(allow, Some("http://example.com"));
    Ok(())
}
