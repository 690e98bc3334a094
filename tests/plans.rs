//! Subscription plan management through the HTTP API.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_writes_require_admin_token() {
    let app = common::test_app();
    let draft = json!({ "name": "Monthly", "duration_days": 30, "base_price": 100 });

    let (status, _) = common::send(&app, Method::POST, "/plans", Some(draft.clone()), &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/plans",
        Some(draft),
        &[("authorization", "Bearer wrong")],
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Reads stay public.
    let (status, body) = common::get(&app, "/plans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_plan_lifecycle() {
    let app = common::test_app();
    let auth = common::bearer();
    let headers = [("authorization", auth.as_str())];

    let (status, plan) = common::send(
        &app,
        Method::POST,
        "/plans",
        Some(json!({
            "name": "Explorer",
            "duration_days": 30,
            "base_price": 1000,
            "discount_type": "PERCENTAGE",
            "discount_value": 10
        })),
        &headers,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(plan["final_price"], 900.0);
    let id = plan["id"].as_str().unwrap().to_string();

    let (status, updated) = common::send(
        &app,
        Method::PATCH,
        &format!("/plans/{}", id),
        Some(json!({ "discount_type": "FLAT", "discount_value": 50 })),
        &headers,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["final_price"], 950.0);

    let (status, fetched) = common::get(&app, &format!("/plans/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["discount_type"], "FLAT");

    let (status, _) =
        common::send(&app, Method::DELETE, &format!("/plans/{}", id), None, &headers).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, &format!("/plans/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_price_blocks_save() {
    let app = common::test_app();
    let auth = common::bearer();

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/plans",
        Some(json!({
            "name": "Too generous",
            "duration_days": 30,
            "base_price": 100,
            "discount_type": "FLAT",
            "discount_value": 150
        })),
        &[("authorization", auth.as_str())],
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "discount_value");

    let (_, plans) = common::get(&app, "/plans").await;
    assert_eq!(plans, json!([]));
}

#[tokio::test]
async fn test_create_from_form_fields() {
    let app = common::test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/plans/form")
        .header(header::AUTHORIZATION, common::bearer())
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Weekend&duration_days=3&base_price=500&discount_type=FLAT&discount_value=50",
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/plans/form")
        .header(header::AUTHORIZATION, common::bearer())
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Weekend&duration_days=3&base_price=abc&discount_type=&discount_value=",
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (_, plans) = common::get(&app, "/plans").await;
    assert_eq!(plans.as_array().unwrap().len(), 1);
    assert_eq!(plans[0]["final_price"], 450.0);
}

#[tokio::test]
async fn test_unknown_plan_update() {
    let app = common::test_app();
    let auth = common::bearer();
    let (status, _) = common::send(
        &app,
        Method::PATCH,
        &format!("/plans/{}", uuid::Uuid::new_v4()),
        Some(json!({ "base_price": 10 })),
        &[("authorization", auth.as_str())],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_plan_id_names_the_field() {
    let app = common::test_app();

    let (status, body) = common::get(&app, "/plans/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");
    assert!(body["error"].is_string());

    let auth = common::bearer();
    let (status, body) = common::send(
        &app,
        Method::DELETE,
        "/plans/not-a-uuid",
        None,
        &[("authorization", auth.as_str())],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");
}

#[tokio::test]
async fn test_mistyped_plan_body_names_the_field() {
    let app = common::test_app();
    let auth = common::bearer();

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/plans",
        Some(json!({ "name": "Monthly", "duration_days": "thirty", "base_price": 100 })),
        &[("authorization", auth.as_str())],
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "duration_days");
}
