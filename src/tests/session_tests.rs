use std::sync::Arc;

use super::*;

use crate::jobs::{Call, Reply};
use crate::store::{LocalStore, MemoryCredentials};
use crate::test_support::{FakeGateway, gist, rejected};

fn run(gateway: &FakeGateway, store: &dyn CredentialStore, env: Option<&str>) -> BootstrapOutcome {
    Bootstrap {
        gateway,
        store,
        env_token: env.map(str::to_string),
        settle_delay: Duration::ZERO,
    }
    .run()
}

#[test]
fn unavailable_store_waits_for_a_token() {
    let gw = FakeGateway::new();
    let outcome = run(&gw, &LocalStore::detached(), Some("env-token"));

    assert_eq!(outcome.mode, SessionMode::AwaitingCredential);
    assert!(outcome.error.is_none());
    assert!(gw.calls().is_empty());
}

#[test]
fn valid_stored_token_authenticates() {
    let records = vec![gist("a", "first", &[("a.txt", None)])];
    let gw = FakeGateway::new().reply(Ok(Reply::Records(records.clone())));
    let store = MemoryCredentials::with_token("stored");

    let outcome = run(&gw, &store, None);

    assert_eq!(outcome.mode, SessionMode::Authenticated);
    assert_eq!(outcome.token, "stored");
    assert_eq!(outcome.records, records);
    assert_eq!(outcome.source, Some(CredentialSource::Stored));
    assert_eq!(
        gw.calls(),
        vec![Call::List {
            token: "stored".to_string()
        }]
    );
}

#[test]
fn invalid_stored_token_is_cleared() {
    let gw = FakeGateway::new().reply(Err(rejected(401)));
    let store = MemoryCredentials::with_token("stale");

    let outcome = run(&gw, &store, None);

    assert_eq!(outcome.mode, SessionMode::CredentialInvalid);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Failed to fetch gists. Please check your token.")
    );
    assert!(outcome.token.is_empty());
    assert!(outcome.records.is_empty());
    assert_eq!(store.clear_count(), 1);
    assert_eq!(store.read(), "");
}

#[test]
fn stored_token_wins_over_environment() {
    let gw = FakeGateway::new().reply(Err(rejected(401)));
    let store = MemoryCredentials::with_token("stale");

    let outcome = run(&gw, &store, Some("fresh"));

    assert_eq!(outcome.mode, SessionMode::CredentialInvalid);
    assert_eq!(gw.calls().len(), 1);
}

#[test]
fn environment_token_is_used_and_saved() {
    let gw = FakeGateway::new().reply(Ok(Reply::Records(vec![])));
    let store = Arc::new(MemoryCredentials::new());

    let outcome = run(&gw, store.as_ref(), Some("  env  "));

    assert_eq!(outcome.mode, SessionMode::Authenticated);
    assert_eq!(outcome.token, "env");
    assert_eq!(outcome.source, Some(CredentialSource::Environment));
    assert_eq!(store.read(), "env");
    assert_eq!(store.save_count(), 1);
}

#[test]
fn rejected_environment_token_is_not_cleared_from_store() {
    let gw = FakeGateway::new().reply(Err(rejected(401)));
    let store = MemoryCredentials::new();

    let outcome = run(&gw, &store, Some("env"));

    assert_eq!(outcome.mode, SessionMode::CredentialInvalid);
    assert!(outcome.error.unwrap().contains(TOKEN_ENV));
    assert_eq!(store.clear_count(), 0);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn blank_environment_token_is_ignored() {
    let gw = FakeGateway::new();
    let outcome = run(&gw, &MemoryCredentials::new(), Some("   "));

    assert_eq!(outcome.mode, SessionMode::AwaitingCredential);
    assert!(gw.calls().is_empty());
}

#[test]
fn landing_modes_need_a_credential() {
    assert!(SessionMode::AwaitingCredential.needs_credential());
    assert!(SessionMode::CredentialInvalid.needs_credential());
    assert!(!SessionMode::Initializing.needs_credential());
    assert!(!SessionMode::Authenticated.needs_credential());
}
