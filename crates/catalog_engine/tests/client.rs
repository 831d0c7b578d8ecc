use std::time::Duration;

use catalog_core::{CatalogError, ProductDraft, ProductPatch};
use catalog_engine::{CatalogClient, ClientSettings, ReqwestCatalogClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestCatalogClient {
    ReqwestCatalogClient::new(ClientSettings {
        base_url: format!("{}/api/v1", server.uri()),
        ..ClientSettings::default()
    })
    .expect("client")
}

fn draft() -> ProductDraft {
    ProductDraft {
        title: "Trail Shoe".to_string(),
        price: 59.5,
        description: "Lightweight shoe for rough trails".to_string(),
        category_id: 4,
        images: vec!["https://img.example.com/a.png".to_string()],
    }
}

#[tokio::test]
async fn fetch_all_decodes_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "title": "Classic Shirt",
                "price": 30,
                "description": "Soft cotton shirt",
                "category": {"id": 1, "name": "Clothes", "slug": "clothes"},
                "images": ["[\"https://i.imgur.com/a.jpeg\"", "https://i.imgur.com/b.jpeg\"]"],
                "creationAt": "2024-01-01T00:00:00.000Z"
            },
            {"id": 2, "title": "Bare", "price": 12.5}
        ])))
        .mount(&server)
        .await;

    let products = client_for(&server).fetch_all().await.expect("fetch ok");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].category_name(), Some("Clothes"));
    assert_eq!(products[0].price, 30.0);
    assert_eq!(products[1].description, "No description");
    assert!(products[1].images.is_empty());
    assert_eq!(products[1].category, None);
}

#[tokio::test]
async fn fetch_all_tolerates_null_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Shirt", "price": 3, "description": null, "images": null, "category": null},
            {"id": 2, "title": "Hat", "price": 8, "description": "Wide brim hat", "images": ["https://img.example.com/hat.png"]}
        ])))
        .mount(&server)
        .await;

    let products = client_for(&server).fetch_all().await.expect("fetch ok");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].description, "No description");
    assert!(products[0].images.is_empty());
    assert_eq!(products[0].category, None);
    assert_eq!(products[1].images, vec!["https://img.example.com/hat.png".to_string()]);
}

#[tokio::test]
async fn fetch_all_accepts_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let products = client_for(&server).fetch_all().await.expect("fetch ok");

    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_all_rejects_non_array_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_all().await.unwrap_err();

    assert!(matches!(err, CatalogError::Protocol { .. }), "{err:?}");
}

#[tokio::test]
async fn fetch_all_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_all().await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::Service {
            status: 500,
            message: None
        }
    );
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let client = ReqwestCatalogClient::new(ClientSettings {
        base_url: format!("http://127.0.0.1:{port}/api/v1"),
        connect_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    })
    .unwrap();

    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, CatalogError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn slow_service_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let client = ReqwestCatalogClient::new(ClientSettings {
        base_url: format!("{}/api/v1", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn oversized_response_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1,2,3,4,5,6,7,8,9]"))
        .mount(&server)
        .await;

    let client = ReqwestCatalogClient::new(ClientSettings {
        base_url: format!("{}/api/v1", server.uri()),
        max_bytes: 8,
        ..ClientSettings::default()
    })
    .unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, CatalogError::Protocol { .. }), "{err:?}");
}

#[tokio::test]
async fn create_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/products"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "title": "Trail Shoe",
            "price": 59.5,
            "description": "Lightweight shoe for rough trails",
            "categoryId": 4,
            "images": ["https://img.example.com/a.png"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 210,
            "title": "Trail Shoe",
            "price": 59.5,
            "description": "Lightweight shoe for rough trails",
            "category": {"id": 4, "name": "Shoes"},
            "images": ["https://img.example.com/a.png"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = client_for(&server).create(&draft()).await.expect("create ok");

    assert_eq!(product.id, 210);
    assert_eq!(product.category_name(), Some("Shoes"));
}

#[tokio::test]
async fn create_failure_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": ["categoryId must be a positive number"],
            "error": "Bad Request",
            "statusCode": 400
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).create(&draft()).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::Service {
            status: 400,
            message: Some("categoryId must be a positive number".to_string())
        }
    );
}

#[tokio::test]
async fn update_puts_full_replacement_and_accepts_partial_reply() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/products/7"))
        .and(body_json(json!({
            "title": "Renamed",
            "price": 42.0,
            "description": "No description",
            "categoryId": 1,
            "images": ["https://placehold.co/600x400"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "price": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProductPatch {
        title: "Renamed".to_string(),
        price: 42.0,
        description: "No description".to_string(),
        category_id: 1,
        images: vec!["https://placehold.co/600x400".to_string()],
    };
    let fields = client_for(&server).update(7, &patch).await.expect("update ok");

    assert_eq!(fields.id, Some(7));
    assert_eq!(fields.price, Some(42.0));
    assert_eq!(fields.title, None);
}

#[tokio::test]
async fn update_rejection_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/products/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Could not find any entity of type \"Product\"",
            "statusCode": 404
        })))
        .mount(&server)
        .await;

    let patch = ProductPatch {
        title: "Anything".to_string(),
        price: 3.0,
        description: "No description".to_string(),
        category_id: 1,
        images: vec!["https://placehold.co/600x400".to_string()],
    };
    let err = client_for(&server).update(9, &patch).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::Service {
            status: 404,
            message: Some("Could not find any entity of type \"Product\"".to_string())
        }
    );
}
