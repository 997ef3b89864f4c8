//! Integration tests for `RestBackend` against a mocked PostgREST endpoint.

use rust_decimal::Decimal;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{bearer_token, body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::models::{NewOrder, NewWishlistItem, OrderStatus, ProductUpdate, Session};
use storefront::backend::ProductFilter;
use storefront::{AppError, Backend, BackendError, ErrorCode, RestBackend};

const ANON_KEY: &str = "anon-key";

fn backend(server: &MockServer) -> RestBackend {
    RestBackend::new(&server.uri(), ANON_KEY, Duration::from_secs(5)).unwrap()
}

fn session() -> Session {
    Session::new(
        Uuid::parse_str("6a2f41a3-c54c-4fce-8d2d-0324e1c32e22").unwrap(),
        "user-token",
    )
}

fn product_json(id: i64, name: &str, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "price": price,
        "image_url": "",
        "category": "Floral",
        "stock": 3,
        "featured": true,
        "created_at": "2025-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn list_products_pushes_filters_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("featured", "eq.true"))
        .and(query_param("limit", "4"))
        .and(header("apikey", ANON_KEY))
        .and(bearer_token(ANON_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(1, "Rose Noir", 89.5)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filter = ProductFilter {
        featured: Some(true),
        limit: Some(4),
        ..Default::default()
    };
    let rows = backend(&server).list_products(&filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("Rose Noir"));
    assert_eq!(rows[0].price, Some(89.5));
}

#[tokio::test]
async fn get_product_missing_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(backend(&server).get_product(42).await.unwrap().is_none());
}

#[tokio::test]
async fn is_admin_uses_session_token() {
    let server = MockServer::start().await;
    let session = session();

    Mock::given(method("GET"))
        .and(path("/rest/v1/admin_users"))
        .and(query_param("user_id", format!("eq.{}", session.user_id)))
        .and(bearer_token("user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .mount(&server)
        .await;

    assert!(backend(&server).is_admin(&session).await.unwrap());
}

#[tokio::test]
async fn insert_order_requests_representation() {
    let server = MockServer::start().await;
    let session = session();

    Mock::given(method("POST"))
        .and(path("/rest/v1/orders"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "status": "processing",
            "total": 85.0,
            "special_offer_applied": "15% Off"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 7,
            "user_id": session.user_id,
            "status": "processing",
            "total": 85,
            "special_offer_applied": "15% Off",
            "created_at": "2025-03-01T10:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let order = NewOrder {
        user_id: session.user_id,
        status: OrderStatus::Processing,
        total: Decimal::from(85),
        special_offer_applied: Some("15% Off".into()),
    };
    let record = backend(&server).insert_order(&session, &order).await.unwrap();
    assert_eq!(record.id, 7);
    assert_eq!(record.total, Decimal::from(85));
}

#[tokio::test]
async fn wishlist_insert_and_delete_are_scoped_to_user() {
    let server = MockServer::start().await;
    let session = session();

    Mock::given(method("POST"))
        .and(path("/rest/v1/wishlist_items"))
        .and(body_json(json!({ "user_id": session.user_id, "product_id": 3 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 11,
            "user_id": session.user_id,
            "product_id": 3
        }])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/wishlist_items"))
        .and(query_param("id", "eq.11"))
        .and(query_param("user_id", format!("eq.{}", session.user_id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let rest = backend(&server);
    let item = rest
        .insert_wishlist_item(
            &session,
            &NewWishlistItem {
                user_id: session.user_id,
                product_id: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(item.id, 11);
    assert!(item.product.is_none());
    rest.delete_wishlist_item(&session, 11).await.unwrap();
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "PGRST301",
            "message": "JWT expired",
            "hint": null
        })))
        .mount(&server)
        .await;

    let err = backend(&server).list_orders(&session()).await.unwrap_err();
    match &err {
        BackendError::Status { status, message } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "JWT expired");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::NotAuthenticated);
}

#[tokio::test]
async fn update_without_matching_row_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.9"))
        .and(body_json(json!({ "featured": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let update = ProductUpdate {
        featured: Some(false),
        ..Default::default()
    };
    let err = backend(&server)
        .update_product(&session(), 9, &update)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = backend(&server)
        .list_products(&ProductFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::DatabaseError);
}
