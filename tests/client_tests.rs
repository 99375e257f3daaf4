//! End-to-end tests for the typed request pipeline against a mock server.
//!
//! The central scenario: register an extended field, splice its fragment into
//! a query, execute through the client, and read the captured extension value
//! back out of the store.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vendure_api::auth::{AuthError, TokenManager};
use vendure_api::config::{EndpointUrl, VendureConfig};
use vendure_api::custom_fields::CustomFieldSpec;
use vendure_api::types::{Asset, Product};
use vendure_api::{GraphqlClientError, VendureClient};

async fn mock_config(server: &MockServer) -> VendureConfig {
    VendureConfig::builder()
        .endpoint(EndpointUrl::new(format!("{}/shop-api", server.uri())).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Extended Field Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_query_entity_captures_extended_asset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .and(body_string_contains(
            "mainUsdzAsset { id name type mimeType source preview }",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "product": {
                    "id": "p1",
                    "name": "Armchair",
                    "mainUsdzAsset": {
                        "id": "a1",
                        "name": "armchair-model",
                        "type": "BINARY",
                        "mimeType": "model/usd",
                        "source": "https://cdn.example.com/a1.usdz",
                        "preview": "https://cdn.example.com/a1.png"
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = VendureClient::new(mock_config(&server).await);
    client
        .registry()
        .add(CustomFieldSpec::extended_asset("mainUsdzAsset", ["Product"]));

    let query = format!(
        "query GetProduct($id: ID!) {{ product(id: $id) {{ id name {} }} }}",
        client.inject_fields("Product"),
    );
    let product: Product = client
        .query_entity(&query, Some(json!({ "id": "p1" })), "product")
        .await
        .unwrap();

    assert_eq!(product.id, "p1");
    assert_eq!(product.name.as_deref(), Some("Armchair"));

    // The extension value was captured at decode time.
    let asset: Asset = client
        .extensions()
        .get("Product", "p1", "mainUsdzAsset")
        .unwrap();
    assert_eq!(asset.id, "a1");
    assert_eq!(asset.mime_type.as_deref(), Some("model/usd"));
}

#[tokio::test]
async fn test_query_entities_populates_extensions_per_element() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "search": {
                    "items": [
                        { "id": "p1", "calculatedScore": 8.5 },
                        { "id": "p2", "calculatedScore": 3.0 },
                        { "id": "p3" }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let client = VendureClient::new(mock_config(&server).await);
    client
        .registry()
        .add(CustomFieldSpec::extended_scalar("calculatedScore", ["Product"]));

    let products: Vec<Product> = client
        .query_entities(
            "query { search { items { id calculatedScore } } }",
            None,
            "search.items",
        )
        .await
        .unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(client.extensions().get::<f64>("Product", "p1", "calculatedScore"), Some(8.5));
    assert_eq!(client.extensions().get::<f64>("Product", "p2", "calculatedScore"), Some(3.0));
    assert_eq!(client.extensions().get::<f64>("Product", "p3", "calculatedScore"), None);
}

// ============================================================================
// Path Navigation Tests
// ============================================================================

#[tokio::test]
async fn test_absent_expected_path_surfaces_as_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": { "id": "p1" } }
        })))
        .mount(&server)
        .await;

    let client = VendureClient::new(mock_config(&server).await);
    let error = client
        .query::<Product>("query { product { id } }", None, "order")
        .await
        .unwrap_err();

    match error {
        GraphqlClientError::NoData { path } => assert_eq!(path, "order"),
        other => panic!("expected NoData error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_data_prefixed_path_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": { "id": "p1" } }
        })))
        .mount(&server)
        .await;

    let client = VendureClient::new(mock_config(&server).await);
    let product: Product = client
        .query("query { product { id } }", None, "data.product")
        .await
        .unwrap();

    assert_eq!(product.id, "p1");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_scheme_sends_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "me": { "id": "u1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = VendureClient::with_token_manager(
        mock_config(&server).await,
        TokenManager::from_token("session-token", None),
    );

    let data = client
        .execute_raw("query { me { id } }", None, None)
        .await
        .unwrap();
    assert_eq!(data["me"]["id"], "u1");
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(0)
        .mount(&server)
        .await;

    // Seeded token with no fetcher: invalidation leaves nothing to refresh with.
    let client = VendureClient::with_token_manager(
        mock_config(&server).await,
        TokenManager::from_token("stale", None),
    );
    client.invalidate_session();

    let error = client
        .execute_raw("query { me { id } }", None, None)
        .await
        .unwrap_err();

    assert!(matches!(error, GraphqlClientError::Auth(AuthError::Missing)));
}

#[tokio::test]
async fn test_guest_client_sends_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let client = VendureClient::new(mock_config(&server).await);
    client
        .execute_raw("query { activeOrder { id } }", None, None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0]
        .headers
        .iter()
        .any(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization")));
}

// ============================================================================
// Envelope Error Propagation Tests
// ============================================================================

#[tokio::test]
async fn test_graphql_errors_propagate_through_typed_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shop-api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": { "id": "p1" } },
            "errors": [{ "message": "You are not currently authorized" }]
        })))
        .mount(&server)
        .await;

    let client = VendureClient::new(mock_config(&server).await);
    let error = client
        .query::<Product>("query { product { id } }", None, "product")
        .await
        .unwrap_err();

    match error {
        GraphqlClientError::Graphql { messages } => {
            assert_eq!(messages, vec!["You are not currently authorized"]);
        }
        other => panic!("expected Graphql error, got {other:?}"),
    }
}
