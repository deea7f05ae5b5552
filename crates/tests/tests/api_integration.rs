use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pizza_api::{build_app, ApiConfig};
use pizza_core::Catalog;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let config = ApiConfig {
        rng_seed: Some(7),
        ..ApiConfig::default()
    };
    build_app(&config)
}

fn generate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn reply_text(app: Router, body: Value) -> String {
    let response = app.oneshot(generate_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Value = serde_json::from_slice(&bytes).unwrap();
    let object = parsed.as_object().expect("response should be an object");
    assert_eq!(object.len(), 1, "only the response field is returned");
    object["response"]
        .as_str()
        .expect("response should be a string")
        .to_string()
}

#[tokio::test]
async fn health_is_public() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn menu_lists_offerings_and_offers() {
    let response = app()
        .oneshot(Request::builder().uri("/menu").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["offerings"].as_array().map(Vec::len), Some(5));
    assert_eq!(parsed["offers"].as_array().map(Vec::len), Some(3));
    assert_eq!(parsed["offerings"][3]["name"], "BBQ Chicken");
    assert_eq!(parsed["offerings"][3]["sizes"][0]["size"], "Medium");
    assert_eq!(parsed["offerings"][3]["sizes"][0]["price"], 14);
    assert_eq!(parsed["offerings"][3]["sizes"][1]["size"], "Large");
    assert_eq!(parsed["offerings"][3]["sizes"][1]["price"], 18);
    assert_eq!(parsed["offerings"][2]["vegetarian"], true);
    assert!(parsed["offerings"][0].get("prices").is_none());
}

#[tokio::test]
async fn missing_or_blank_input_gets_welcome() {
    let names = Catalog::default_menu()
        .list_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    for body in [
        json!({}),
        json!({ "input": "" }),
        json!({ "input": "   " }),
        json!({ "input": null }),
        json!({ "input": 3 }),
    ] {
        let text = reply_text(app(), body).await;
        assert!(text.starts_with("Welcome to Pizza Today!"));
        for name in &names {
            assert!(text.contains(name.as_str()));
        }
    }
}

#[tokio::test]
async fn exact_pizza_name_returns_details() {
    let text = reply_text(app(), json!({ "input": "Margherita" })).await;
    assert_eq!(
        text,
        "Our Margherita pizza is available in sizes: Small, Medium, Large. Prices are: Small: $8, Medium: $12, Large: $16."
    );
}

#[tokio::test]
async fn greeting_wins_over_offer() {
    let text = reply_text(app(), json!({ "input": "hi, any offers?" })).await;
    assert_eq!(
        text,
        "Hello! Welcome to Pizza Today! How can I assist you with your pizza cravings today?"
    );
}

#[tokio::test]
async fn order_mention_asks_for_type_and_size() {
    let text = reply_text(app(), json!({ "input": "I want to order a large Pepperoni" })).await;
    assert_eq!(
        text,
        "Great! What pizza would you like to order? Please specify the type and size."
    );
}

#[tokio::test]
async fn confirmation_and_cancellation() {
    let text = reply_text(app(), json!({ "input": "yes, small hawaiian" })).await;
    assert_eq!(text, "Your order for Small Hawaiian pizza has been placed! Thank you!");

    let text = reply_text(app(), json!({ "input": "cancel the large veggie" })).await;
    assert_eq!(
        text,
        "Your order has been canceled. Let me know if you'd like to order something else!"
    );
}

#[tokio::test]
async fn unknown_text_gets_help() {
    let text = reply_text(app(), json!({ "input": "what time is it" })).await;
    assert_eq!(
        text,
        "I'm here to help! You can ask me about our pizzas, offers, sizes, or even customize your order."
    );
}

#[tokio::test]
async fn broken_json_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn generate_is_rate_limited_per_ip() {
    let config = ApiConfig {
        rng_seed: Some(7),
        rate_limit_max: 2,
        ..ApiConfig::default()
    };
    let app = build_app(&config);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(generate_request(json!({ "input": "hello" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(generate_request(json!({ "input": "hello" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let health = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}
