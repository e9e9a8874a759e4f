//! Integration tests for `ProductClient::fetch_product`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_client::{ClientError, ProductClient, DEFAULT_THEME};

fn test_client(server: &MockServer) -> ProductClient {
    ProductClient::new(&server.uri(), Duration::from_secs(5)).expect("failed to build test client")
}

fn product_json() -> serde_json::Value {
    json!({
        "id": "p1",
        "slug": "Sneakers12",
        "name": "Sneakers",
        "description": "Comfortable",
        "price": 120,
        "sale_price": "99.50",
        "thumb": "/thumb.jpg",
        "images": [],
        "variations": [
            {"id": "ax1", "name": "color", "type": "image", "props": [
                {"id": "o1", "name": "Red", "value": "https://cdn/red.jpg"}
            ]},
            {"id": "ax2", "name": "size", "type": "button", "props": [
                {"id": "o2", "name": "M", "value": null}
            ]}
        ],
        "variants": [
            {"id": "v1", "price": 120, "sale_price": 99.5, "quantity": 2,
             "variation_props": [
                {"variation": "color", "variation_prop": "red"},
                {"variation": "size", "variation_prop": "M"}
             ]}
        ],
        "reviews": [
            {"id": "r1", "customer_name": "Sam", "rating": 5, "comment": "Great",
             "created_at": "2024-05-01T10:00:00Z"}
        ]
    })
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_decodes_document_with_reviews() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/slug/clear-theme/Sneakers12"))
        .and(query_param("join", "reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server)
        .fetch_product("Sneakers12", DEFAULT_THEME, true)
        .await
        .expect("expected Ok");

    assert_eq!(product.id, "p1");
    assert_eq!(product.sale_price.cents(), 9950);
    assert_eq!(product.axes.len(), 2);
    assert_eq!(product.variants[0].tags.len(), 2);
    assert_eq!(product.reviews.len(), 1);
    assert!(product.reviews[0].created_at.is_some());
}

#[tokio::test]
async fn fetch_product_without_reviews_omits_join_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/slug/dark/Sneakers12"))
        .respond_with(move |req: &wiremock::Request| {
            if req.url.query().is_some() {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(product_json())
            }
        })
        .mount(&server)
        .await;

    let result = test_client(&server)
        .fetch_product("Sneakers12", "dark", false)
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product("missing", DEFAULT_THEME, true)
        .await
        .unwrap_err();

    match err {
        ClientError::NotFound { url } => assert!(url.contains("/products/slug/clear-theme/missing")),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_product_maps_500_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product("Sneakers12", DEFAULT_THEME, true)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn fetch_product_maps_bad_body_to_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product("Sneakers12", DEFAULT_THEME, true)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ClientError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
    assert!(!err.is_transient());
}

#[tokio::test]
async fn fetch_product_maps_connection_failure_to_http() {
    // Port 1 is privileged and unassigned; the connect is refused.
    let client =
        ProductClient::new("http://127.0.0.1:1", Duration::from_secs(2)).expect("client");
    let err = client
        .fetch_product("Sneakers12", DEFAULT_THEME, true)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Http(_)), "expected Http, got: {err:?}");
}
