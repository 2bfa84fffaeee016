//! Token lookup against SQLite, where the store answers with one OR query

use grantstore_core::domain::TokenKind;
use grantstore_core::MappingError;
use pretty_assertions::assert_eq;
use tests::db::TestDatabase;
use tests::{fixtures, AccessToken, ServiceHarness, Token};

#[tokio::test]
async fn every_token_value_finds_its_authorization() {
    let (db, _dir) = TestDatabase::new().into_shared();
    let svc = ServiceHarness::with_database(db);
    svc.clients.save(&fixtures::test_client("client-1")).await.unwrap();

    let first = fixtures::fully_issued_authorization("auth-1", "client-1");
    let second = fixtures::fully_issued_authorization("auth-2", "client-1");
    svc.authorizations.save(&first).await.unwrap();
    svc.authorizations.save(&second).await.unwrap();

    for value in first.token_values() {
        let found = svc.authorizations.find_by_token(value, None).await.unwrap();
        assert_eq!(found.as_ref().map(|a| a.id.as_str()), Some("auth-1"), "token {value}");
    }

    let found = svc
        .authorizations
        .find_by_token("auth-2-device", Some(&TokenKind::DeviceCode))
        .await
        .unwrap();
    assert_eq!(found, Some(second));
}

#[tokio::test]
async fn duplicate_value_across_rows_is_ambiguous() {
    tests::init_tracing();
    let (db, _dir) = TestDatabase::new().into_shared();
    let svc = ServiceHarness::with_database(db);
    svc.clients.save(&fixtures::test_client("client-1")).await.unwrap();

    svc.authorizations
        .save(
            &fixtures::test_authorization("auth-1", "client-1")
                .with_access_token(AccessToken::bearer(Token::new("DUP", None, None))),
        )
        .await
        .unwrap();
    svc.authorizations
        .save(
            &fixtures::test_authorization("auth-2", "client-1")
                .with_user_code(Token::new("DUP", None, None)),
        )
        .await
        .unwrap();

    let err = svc.authorizations.find_by_token("DUP", None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MappingError>(),
        Some(MappingError::AmbiguousTokenLookup { matches: 2 })
    ));

    // a hint narrows the search to one row
    let found = svc
        .authorizations
        .find_by_token("DUP", Some(&TokenKind::UserCode))
        .await
        .unwrap();
    assert_eq!(found.map(|a| a.id), Some("auth-2".to_string()));
}
