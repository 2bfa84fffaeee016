//! Aggregates saved through the services survive a SQLite round-trip

use grantstore_core::MappingError;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::db::TestDatabase;
use tests::{fixtures, ServiceHarness};
use tokio::sync::Mutex;

#[tokio::test]
async fn client_authorization_and_consent_persist() {
    let (db, _dir) = TestDatabase::new().into_shared();
    let svc = ServiceHarness::with_database(db);

    let client = fixtures::test_client("client-1");
    let auth = fixtures::fully_issued_authorization("auth-1", "client-1");
    let consent = fixtures::test_consent("client-1", &["read", "write"]);

    svc.clients.save(&client).await.unwrap();
    svc.authorizations.save(&auth).await.unwrap();
    svc.consents.save(&consent).await.unwrap();

    assert_eq!(svc.clients.find_by_id("client-1").await.unwrap(), Some(client.clone()));
    assert_eq!(
        svc.clients.find_by_client_id("client-1-app").await.unwrap(),
        Some(client)
    );
    assert_eq!(svc.authorizations.find_by_id("auth-1").await.unwrap(), Some(auth));
    assert_eq!(
        svc.consents.find_by_id("client-1", "alice").await.unwrap(),
        Some(consent)
    );
}

#[tokio::test]
async fn data_survives_reopen() {
    let test_db = TestDatabase::new();
    let reopened = test_db.reopen();
    let (db, _dir) = test_db.into_shared();

    {
        let svc = ServiceHarness::with_database(db);
        svc.clients.save(&fixtures::test_client("client-1")).await.unwrap();
        svc.authorizations
            .save(&fixtures::test_authorization("auth-1", "client-1"))
            .await
            .unwrap();
    }

    let svc = ServiceHarness::with_database(Arc::new(Mutex::new(reopened)));
    let auth = svc.authorizations.find_by_id("auth-1").await.unwrap().unwrap();
    assert_eq!(auth.state(), Some("state-auth-1"));
    assert_eq!(auth.principal_name, "alice");
}

#[tokio::test]
async fn removals_are_persisted() {
    let (db, _dir) = TestDatabase::new().into_shared();
    let svc = ServiceHarness::with_database(db);
    let auth = fixtures::test_authorization("auth-1", "client-1");
    let consent = fixtures::test_consent("client-1", &["read"]);

    svc.clients.save(&fixtures::test_client("client-1")).await.unwrap();
    svc.authorizations.save(&auth).await.unwrap();
    svc.consents.save(&consent).await.unwrap();

    svc.authorizations.remove(&auth).await.unwrap();
    svc.consents.remove(&consent).await.unwrap();
    svc.clients.remove("client-1").await.unwrap();

    assert_eq!(svc.authorizations.find_by_id("auth-1").await.unwrap(), None);
    assert_eq!(svc.consents.find_by_id("client-1", "alice").await.unwrap(), None);
    assert_eq!(svc.clients.find_by_id("client-1").await.unwrap(), None);
}

#[tokio::test]
async fn corrupted_settings_column_surfaces_data_format_error() {
    let (db, _dir) = TestDatabase::new().into_shared();
    let svc = ServiceHarness::with_database(db.clone());
    svc.clients.save(&fixtures::test_client("client-1")).await.unwrap();

    db.lock()
        .await
        .connection()
        .execute(
            "UPDATE registered_clients SET token_settings = '{broken' WHERE id = 'client-1'",
            [],
        )
        .unwrap();

    let err = svc.clients.find_by_id("client-1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MappingError>(),
        Some(MappingError::DataFormat { column: "token_settings", .. })
    ));
}
