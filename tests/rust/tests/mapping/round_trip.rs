//! Round-trip properties of the three mappers

use grantstore_core::domain::{
    AccessToken, AccessTokenType, AttributeMap, AttributeValue, Authorization,
    AuthorizationGrantType, ClientSettings, OpenEnum, Token, TokenSettings,
};
use grantstore_core::mapping::{
    AttributeCodec, AuthorizationRowMapper, ClientRowMapper, ConsentRowMapper,
};
use pretty_assertions::assert_eq;
use tests::fixtures;
use tests::mocks::MockClientResolver;

fn resolver() -> MockClientResolver {
    MockClientResolver::new().with_client(fixtures::test_client("client-1"))
}

#[test]
fn attribute_maps_round_trip_with_nested_values() {
    let mut request = AttributeMap::new();
    request.insert("response_type".into(), "code".into());
    request.insert("redirect_uri".into(), "https://app.example.com/cb".into());
    request.insert("scopes".into(), vec!["openid", "read"].into());
    request.insert("max_age".into(), 3600i64.into());

    let mut attributes = AttributeMap::new();
    attributes.insert("authorization_request".into(), request.into());
    attributes.insert("principal".into(), "alice".into());
    attributes.insert("acr".into(), AttributeValue::Null);
    attributes.insert("weight".into(), 0.5f64.into());

    let encoded = AttributeCodec::encode("attributes", &attributes).unwrap();
    let decoded = AttributeCodec::decode("attributes", Some(&encoded)).unwrap();
    assert_eq!(decoded, attributes);
}

#[test]
fn registered_client_round_trips() {
    let client = fixtures::test_client("client-1")
        .with_post_logout_redirect_uri("https://client-1.example.com/logout")
        .with_grant_type(AuthorizationGrantType::resolve("urn:custom:thing"))
        .with_client_settings(
            ClientSettings::default()
                .with_require_authorization_consent(true)
                .with_setting("custom.flag", "on"),
        )
        .with_token_settings(
            TokenSettings::default()
                .with_access_token_time_to_live(chrono::Duration::minutes(15))
                .with_reuse_refresh_tokens(false),
        );

    let row = ClientRowMapper::to_row(&client).unwrap();
    let restored = ClientRowMapper::from_row(row).unwrap();

    assert_eq!(restored, client);
    assert!(restored.client_settings.require_authorization_consent());
    assert_eq!(
        restored.token_settings.access_token_time_to_live(),
        Some(chrono::Duration::minutes(15))
    );
    assert!(!restored.token_settings.reuse_refresh_tokens());
}

#[tokio::test]
async fn authorization_round_trips_for_every_slot_subset() {
    let full = fixtures::fully_issued_authorization("auth-1", "client-1");
    let resolver = resolver();

    // each bit keeps one of the six slots
    for mask in 0u8..64 {
        let mut auth = full.clone();
        if mask & 1 == 0 {
            auth.authorization_code = None;
        }
        if mask & 2 == 0 {
            auth.access_token = None;
        }
        if mask & 4 == 0 {
            auth.refresh_token = None;
        }
        if mask & 8 == 0 {
            auth.id_token = None;
        }
        if mask & 16 == 0 {
            auth.user_code = None;
        }
        if mask & 32 == 0 {
            auth.device_code = None;
        }

        let row = AuthorizationRowMapper::to_row(&auth).unwrap();
        let restored = AuthorizationRowMapper::from_row(row, &resolver).await.unwrap();
        assert_eq!(restored, auth, "slot mask {mask:06b}");
    }
}

#[tokio::test]
async fn access_token_scenario_round_trips() {
    let auth = Authorization::with_id(
        "auth-1",
        "client-1",
        "alice",
        AuthorizationGrantType::AuthorizationCode,
    )
    .with_state("xyz")
    .with_access_token(
        AccessToken::bearer(Token::new("AT-1", None, None).with_metadata("k", "v"))
            .with_scopes(["read", "write"]),
    );

    let row = AuthorizationRowMapper::to_row(&auth).unwrap();
    assert_eq!(row.state.as_deref(), Some("xyz"));

    let restored = AuthorizationRowMapper::from_row(row, &resolver()).await.unwrap();
    let access = restored.access_token.as_ref().unwrap();
    assert_eq!(
        access.scopes.iter().cloned().collect::<Vec<_>>(),
        vec!["read".to_string(), "write".to_string()]
    );
    assert_eq!(access.token.metadata.get("k").and_then(AttributeValue::as_str), Some("v"));
    assert_eq!(access.token_type, AccessTokenType::Bearer);
    assert_eq!(restored.attributes.get("state"), Some(&AttributeValue::from("xyz")));
}

#[tokio::test]
async fn dpop_access_token_type_is_kept() {
    let auth = fixtures::test_authorization("auth-1", "client-1").with_access_token(
        AccessToken::bearer(fixtures::token("AT-1", 5)).with_token_type(AccessTokenType::DPoP),
    );
    let row = AuthorizationRowMapper::to_row(&auth).unwrap();
    assert_eq!(row.access_token_type.as_deref(), Some("DPoP"));

    let restored = AuthorizationRowMapper::from_row(row, &resolver()).await.unwrap();
    assert_eq!(restored.access_token.unwrap().token_type, AccessTokenType::DPoP);
}

#[tokio::test]
async fn consent_round_trips() {
    let consent = fixtures::test_consent("client-1", &["read", "write"]).with_authority("ROLE_USER");
    let row = ConsentRowMapper::to_row(&consent);
    assert_eq!(row.authorities, "SCOPE_read,SCOPE_write,ROLE_USER");

    let restored = ConsentRowMapper::from_row(row, &resolver()).await.unwrap();
    assert_eq!(restored, consent);
    assert_eq!(restored.scopes(), vec!["read", "write"]);
}

#[test]
fn custom_enum_values_are_equal_by_string() {
    let first = AuthorizationGrantType::resolve("urn:custom:thing");
    let second = AuthorizationGrantType::resolve("urn:custom:thing");
    assert!(first.is_custom());
    assert_eq!(first.as_str(), "urn:custom:thing");
    assert_eq!(first, second);
    assert!(matches!(
        AuthorizationGrantType::resolve("authorization_code"),
        AuthorizationGrantType::AuthorizationCode
    ));
}
