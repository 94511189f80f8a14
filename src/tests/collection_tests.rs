use super::*;

use crate::session::CredentialSource;
use crate::store::MemoryCredentials;
use crate::test_support::{FakeGateway, gist, rejected};

fn signed_in(records: Vec<Gist>) -> (CollectionState, Arc<MemoryCredentials>) {
    let store = Arc::new(MemoryCredentials::with_token("tok"));
    let mut state = CollectionState::new(store.clone());
    state.apply_bootstrap(BootstrapOutcome {
        mode: SessionMode::Authenticated,
        token: "tok".to_string(),
        records,
        error: None,
        source: Some(CredentialSource::Stored),
    });
    (state, store)
}

fn three() -> Vec<Gist> {
    vec![
        gist("a", "Alpha notes", &[("alpha.md", None)]),
        gist("b", "", &[("build.sh", None)]),
        gist("c", "Shell tricks", &[("tricks.sh", None)]),
    ]
}

#[test]
fn bootstrap_selects_first_record() {
    let (state, _) = signed_in(three());
    assert_eq!(state.mode(), SessionMode::Authenticated);
    assert_eq!(state.selected_id(), Some("a"));
}

#[test]
fn submitted_token_is_saved_on_success() {
    let store = Arc::new(MemoryCredentials::new());
    let mut state = CollectionState::new(store.clone());
    let gw = FakeGateway::new().reply(Ok(Reply::Records(three())));

    state.submit_credential(&gw, "  ghp_new ").unwrap();

    assert_eq!(state.mode(), SessionMode::Authenticated);
    assert_eq!(state.token(), "ghp_new");
    assert_eq!(state.records().len(), 3);
    assert_eq!(store.read(), "ghp_new");
    assert!(!state.is_loading());
}

#[test]
fn rejected_token_is_cleared() {
    let store = Arc::new(MemoryCredentials::new());
    let mut state = CollectionState::new(store.clone());
    let gw = FakeGateway::new().reply(Err(rejected(401)));

    let err = state.submit_credential(&gw, "bad").unwrap_err();

    assert_eq!(err, GistError::CredentialInvalid);
    assert_eq!(state.mode(), SessionMode::CredentialInvalid);
    assert_eq!(
        state.error(),
        Some("Failed to fetch gists. Please check your token.")
    );
    assert_eq!(state.token(), "");
    assert_eq!(store.clear_count(), 1);
}

#[test]
fn blank_token_makes_no_call() {
    let mut state = CollectionState::new(Arc::new(MemoryCredentials::new()));
    assert!(state.begin_submit_credential("   ").is_none());
    assert!(!state.is_loading());
}

#[test]
fn description_update_swaps_the_record() {
    let (mut state, _) = signed_in(three());
    let before = Arc::clone(state.find("a").unwrap());
    let gw = FakeGateway::new().reply(Ok(Reply::Record(gist("a", "Renamed", &[]))));

    state.update_description(&gw, "a", "Renamed").unwrap();

    let after = state.find("a").unwrap();
    assert_eq!(after.description, "Renamed");
    assert!(!Arc::ptr_eq(&before, after));
    // Files come from the list record, not the reply.
    assert_eq!(after.files.len(), 1);
    assert!(!state.is_pending("a"));
    assert_eq!(
        gw.calls(),
        vec![Call::Update {
            token: "tok".to_string(),
            id: "a".to_string(),
            patch: GistPatch::description("Renamed"),
        }]
    );
}

#[test]
fn failed_description_update_leaves_list_untouched() {
    let (mut state, _) = signed_in(three());
    let before = Arc::clone(state.find("a").unwrap());
    let gw = FakeGateway::new().reply(Err(GistError::Permission));

    let err = state.update_description(&gw, "a", "Renamed").unwrap_err();

    assert_eq!(err, GistError::Permission);
    assert!(Arc::ptr_eq(&before, state.find("a").unwrap()));
    assert_eq!(state.error(), Some(MSG_UPDATE_FAILED));
    assert!(!state.is_pending("a"));
}

#[test]
fn one_update_per_record_at_a_time() {
    let (mut state, _) = signed_in(three());
    assert!(state.begin_update_description("a", "x").is_some());
    assert!(state.is_pending("a"));
    assert!(state.begin_update_description("a", "y").is_none());
    assert!(state.begin_delete("a").is_none());
    assert!(state.begin_delete("b").is_some());
}

#[test]
fn delete_removes_record_and_moves_selection() {
    let (mut state, _) = signed_in(three());
    let gw = FakeGateway::new().reply(Ok(Reply::Deleted));

    state.delete_record(&gw, "a").unwrap();

    let ids: Vec<&str> = state.records().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert_eq!(state.selected_id(), Some("b"));
}

#[test]
fn failed_delete_keeps_record() {
    let (mut state, _) = signed_in(three());
    let gw = FakeGateway::new().reply(Err(rejected(500)));

    assert!(state.delete_record(&gw, "a").is_err());

    assert_eq!(state.records().len(), 3);
    assert_eq!(state.error(), Some(MSG_DELETE_FAILED));
}

#[test]
fn empty_draft_is_rejected_without_a_call() {
    let (mut state, _) = signed_in(three());
    let gw = FakeGateway::new();
    let draft = CreateDraft {
        description: "nothing".to_string(),
        public: true,
        files: vec![DraftFile::new("named.txt", ""), DraftFile::new("", "orphan")],
    };

    let err = state.create_record(&gw, &draft).unwrap_err();

    assert_eq!(err, GistError::Validation(draft::MSG_NO_VALID_FILES.to_string()));
    assert_eq!(state.error(), Some(draft::MSG_NO_VALID_FILES));
    assert!(gw.calls().is_empty());
    assert!(!state.is_creating());
}

#[test]
fn create_sends_only_complete_rows_and_prepends() {
    let (mut state, _) = signed_in(three());
    let created = gist("new", "Fresh", &[("main.rs", Some("fn main() {}"))]);
    let gw = FakeGateway::new().reply(Ok(Reply::Record(created.clone())));
    let draft = CreateDraft {
        description: "Fresh".to_string(),
        public: false,
        files: vec![
            DraftFile::new("main.rs", "fn main() {}"),
            DraftFile::new("", "dropped"),
        ],
    };

    let got = state.create_record(&gw, &draft).unwrap();

    assert_eq!(got.as_ref(), &created);
    assert_eq!(state.records()[0].id, "new");
    assert_eq!(state.records().len(), 4);
    let calls = gw.calls();
    let Call::Create { gist: body, .. } = &calls[0] else {
        panic!("expected a create call");
    };
    assert_eq!(body.files.len(), 1);
    assert_eq!(body.files["main.rs"].content, "fn main() {}");
    assert!(!body.public);
}

#[test]
fn failed_create_keeps_list() {
    let (mut state, _) = signed_in(three());
    let gw = FakeGateway::new().reply(Err(rejected(422)));
    let draft = CreateDraft {
        files: vec![DraftFile::new("a.txt", "x")],
        ..CreateDraft::default()
    };

    assert!(state.create_record(&gw, &draft).is_err());
    assert_eq!(state.records().len(), 3);
    assert_eq!(state.error(), Some(MSG_CREATE_FAILED));
    assert!(!state.is_creating());
}

#[test]
fn refresh_replaces_records() {
    let (mut state, _) = signed_in(three());
    let gw = FakeGateway::new().reply(Ok(Reply::Records(vec![gist("z", "", &[])])));

    state.refresh(&gw).unwrap();

    assert_eq!(state.records().len(), 1);
    assert_eq!(state.selected_id(), Some("z"));
}

#[test]
fn search_matches_description_and_filenames() {
    let (mut state, _) = signed_in(three());

    state.set_search("SH");
    let ids: Vec<&str> = state.visible().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert_eq!(state.selected_id(), Some("b"));

    state.set_search("nomatch");
    assert!(state.visible().is_empty());
    assert_eq!(state.selected_id(), None);

    state.set_search("");
    assert_eq!(state.visible().len(), 3);
}

#[test]
fn selection_clamps_at_the_ends() {
    let (mut state, _) = signed_in(three());
    state.select_offset(-5);
    assert_eq!(state.selected_id(), Some("a"));
    state.select_offset(10);
    assert_eq!(state.selected_id(), Some("c"));
    assert!(!state.select("missing"));
}

#[test]
fn logout_clears_session_and_store() {
    let (mut state, store) = signed_in(three());
    state.logout();

    assert_eq!(state.mode(), SessionMode::AwaitingCredential);
    assert!(state.records().is_empty());
    assert_eq!(state.token(), "");
    assert_eq!(store.read(), "");
    assert!(state.begin_refresh().is_none());
}

#[test]
fn replace_record_ignores_unknown_ids() {
    let (mut state, _) = signed_in(three());
    state.replace_record(Arc::new(gist("zz", "", &[])));
    assert!(state.find("zz").is_none());

    state.replace_record(Arc::new(gist("b", "Now named", &[])));
    assert_eq!(state.find("b").unwrap().description, "Now named");
}
