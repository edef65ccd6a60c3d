//! Integration tests for the OAuth2 token lifecycle
//!
//! **Coverage:**
//! - Code exchange populates a full credential (token pair + scopes +
//!   resolved identity)
//! - Refresh replays the stored scopes, never the live constant
//! - Identity resolution caches on the credential; refresh re-fetches
//!   on purpose
//! - Connection self-test treats exactly HTTP 200 as success
//!
//! **Infrastructure:** WireMock standing in for the token endpoint and
//! the Graph identity endpoint.

use mailbridge_common::{AuthManager, AuthSettings, OAUTH_SCOPES};
use mailbridge_domain::{BridgeError, Credential};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager_for(server: &MockServer) -> AuthManager {
    let settings = AuthSettings::new("1234", "abcd")
        .with_auth_base_url(server.uri())
        .with_api_base_url(server.uri());
    AuthManager::new(settings)
}

fn stored_credential(user_principal_name: Option<&str>) -> Credential {
    Credential::new(
        "stored-access".to_string(),
        "stored-refresh".to_string(),
        "offline_access user.read".to_string(),
        user_principal_name.map(str::to_string),
    )
}

async fn mount_identity(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "userPrincipalName": "u@x.com" })),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn acquire_token_returns_fully_populated_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=the-code"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "A", "refresh_token": "R" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_identity(&server, 1).await;

    let manager = manager_for(&server);
    let credential = manager.acquire_token("the-code", "http://example.com/").await.unwrap();

    assert_eq!(credential.access_token, "A");
    assert_eq!(credential.refresh_token, "R");
    assert_eq!(credential.scopes, OAUTH_SCOPES);
    assert_eq!(credential.user_principal_name.as_deref(), Some("u@x.com"));
}

#[tokio::test]
async fn acquire_token_failure_raises_token_exchange_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({ "error": "invalid_grant", "error_description": "code expired" }),
        ))
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let err = manager.acquire_token("bad-code", "http://example.com/").await.unwrap_err();

    match err {
        BridgeError::TokenExchange { message } => {
            assert!(message.starts_with("Unable to fetch access token"));
            assert!(message.contains("invalid_grant"));
        }
        other => panic!("expected TokenExchange, got {other:?}"),
    }
}

#[tokio::test]
async fn acquire_token_malformed_body_raises_token_exchange_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let err = manager.acquire_token("the-code", "http://example.com/").await.unwrap_err();

    match err {
        BridgeError::TokenExchange { message } => {
            assert!(message.contains("malformed response"));
        }
        other => panic!("expected TokenExchange, got {other:?}"),
    }
}

#[tokio::test]
async fn refresh_replays_stored_scopes_not_the_live_constant() {
    let server = MockServer::start().await;

    // The stored credential was granted a narrower scope set than the
    // current OAUTH_SCOPES constant; the refresh body must carry the
    // stored set. Form encoding turns spaces into '+'.
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=stored-refresh"))
        .and(body_string_contains("scope=offline_access+user.read"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "A2", "refresh_token": "R2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_identity(&server, 1).await;

    let manager = manager_for(&server);
    let current = stored_credential(Some("u@x.com"));
    let refreshed = manager.refresh_token(&current).await.unwrap();

    assert_eq!(refreshed.access_token, "A2");
    assert_eq!(refreshed.refresh_token, "R2");
    // Output scopes equal input scopes exactly.
    assert_eq!(refreshed.scopes, current.scopes);
    assert_ne!(refreshed.scopes, OAUTH_SCOPES);
}

#[tokio::test]
async fn refresh_refetches_identity_even_when_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "A2", "refresh_token": "R2" })),
        )
        .mount(&server)
        .await;
    // The identity endpoint must be hit despite the cached value.
    mount_identity(&server, 1).await;

    let manager = manager_for(&server);
    let current = stored_credential(Some("cached@x.com"));
    let refreshed = manager.refresh_token(&current).await.unwrap();

    assert_eq!(refreshed.user_principal_name.as_deref(), Some("u@x.com"));
}

#[tokio::test]
async fn resolve_identity_uses_cache_without_a_network_call() {
    let server = MockServer::start().await;
    // No /me mock at all: a network call would 404 and fail the test
    // through the fixed identity error.
    let manager = manager_for(&server);

    let mut credential = stored_credential(Some("cached@x.com"));
    let identity = manager.resolve_identity(&mut credential).await.unwrap();

    assert_eq!(identity, "cached@x.com");
}

#[tokio::test]
async fn resolve_identity_fetches_once_and_caches() {
    let server = MockServer::start().await;
    mount_identity(&server, 1).await;

    let manager = manager_for(&server);
    let mut credential = stored_credential(None);

    let first = manager.resolve_identity(&mut credential).await.unwrap();
    assert_eq!(first, "u@x.com");
    assert_eq!(credential.user_principal_name.as_deref(), Some("u@x.com"));

    // Second call is served from the credential; the expect(1) above
    // fails the test if the endpoint is hit again.
    let second = manager.resolve_identity(&mut credential).await.unwrap();
    assert_eq!(second, "u@x.com");
}

#[tokio::test]
async fn resolve_identity_missing_field_raises_fixed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })))
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let mut credential = stored_credential(None);
    let err = manager.resolve_identity(&mut credential).await.unwrap_err();

    match err {
        BridgeError::RecoverableUser { message } => {
            assert!(message.contains("Please try reconnecting your account"));
        }
        other => panic!("expected RecoverableUser, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_succeeds_only_on_exactly_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "userPrincipalName": "u@x.com" })),
        )
        .mount(&server)
        .await;

    let manager = manager_for(&server);
    let info = manager.test_connection(&stored_credential(None)).await.unwrap();
    assert_eq!(info.user_principal_name, "u@x.com");
}

#[tokio::test]
async fn test_connection_rejects_other_statuses_with_reconnect_error() {
    for status in [204_u16, 301, 401, 500] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let manager = manager_for(&server);
        let err = manager.test_connection(&stored_credential(None)).await.unwrap_err();

        match err {
            BridgeError::RecoverableUser { message } => {
                assert!(message.contains("reconnect your account"), "status {status}");
            }
            other => panic!("expected RecoverableUser for status {status}, got {other:?}"),
        }
    }
}
