use super::*;
use crate::caller::FakeTable;
use crate::git::FakeConfig;
use crate::prompt::FakePrompt;
use crate::store::MemoryStore;

fn trusted_table() -> FakeTable {
    FakeTable::with_ancestors(&[(4242, "git")])
}

fn untrusted_table() -> FakeTable {
    FakeTable::with_ancestors(&[(4242, "bash"), (4243, "sshd")])
}

#[test]
fn first_username_request_prompts_twice_and_creates_one_entry() {
    let mut table = trusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::new();
    let mut prompt = FakePrompt::scripted(&["alice", "p1"]);

    let username = get_username(&mut table, &config, &mut store, &mut prompt).unwrap();

    assert_eq!(username, "alice");
    assert_eq!(prompt.labels_seen, ["Username", "Password"]);
    assert_eq!(store.creates, 1);

    // The entry landed under the normalized URL, with both fields.
    let stored = store.find("https://host/", true).unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    assert_eq!(stored.password.as_deref(), Some("p1"));
}

#[test]
fn stored_username_is_returned_without_prompting_or_secret_reads() {
    let mut table = trusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::seeded("https://host/", "alice", "p1");
    let mut prompt = FakePrompt::scripted(&[]);

    let username = get_username(&mut table, &config, &mut store, &mut prompt).unwrap();

    assert_eq!(username, "alice");
    assert!(prompt.labels_seen.is_empty());
    assert_eq!(store.secret_reads, 0);
}

#[test]
fn stored_password_is_returned_with_zero_prompts() {
    let mut table = trusted_table();
    let config = FakeConfig("git@host:org/repo.git".to_string());
    let mut store = MemoryStore::seeded("git@host:org/", "alice", "p1");
    let mut prompt = FakePrompt::scripted(&[]);

    let password = get_password(&mut table, &config, &mut store, &mut prompt).unwrap();

    assert_eq!(password, "p1");
    assert!(prompt.labels_seen.is_empty());
}

#[test]
fn password_miss_prompts_once_and_stores_an_empty_username() {
    let mut table = trusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::new();
    let mut prompt = FakePrompt::scripted(&["s3cret"]);

    let password = get_password(&mut table, &config, &mut store, &mut prompt).unwrap();

    assert_eq!(password, "s3cret");
    assert_eq!(prompt.labels_seen, ["Password"]);

    let stored = store.find("https://host/", true).unwrap().unwrap();
    assert_eq!(stored.username, "");
    assert_eq!(stored.password.as_deref(), Some("s3cret"));
}

#[test]
fn empty_prompt_input_is_a_legal_credential() {
    let mut table = trusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::new();
    let mut prompt = FakePrompt::scripted(&["", ""]);

    let username = get_username(&mut table, &config, &mut store, &mut prompt).unwrap();

    assert_eq!(username, "");
    assert_eq!(store.creates, 1);
}

#[test]
fn untrusted_caller_blocks_get_username_before_any_side_effect() {
    let mut table = untrusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::new();
    let mut prompt = FakePrompt::scripted(&["alice", "p1"]);

    let err = get_username(&mut table, &config, &mut store, &mut prompt).unwrap_err();

    assert!(matches!(err, Fatal::Untrusted));
    assert_eq!(store.finds, 0);
    assert_eq!(store.creates, 0);
    assert!(prompt.labels_seen.is_empty());
}

#[test]
fn untrusted_caller_blocks_get_password_before_any_side_effect() {
    let mut table = untrusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::seeded("https://host/", "alice", "p1");
    let mut prompt = FakePrompt::scripted(&[]);

    let err = get_password(&mut table, &config, &mut store, &mut prompt).unwrap_err();

    assert!(matches!(err, Fatal::Untrusted));
    assert_eq!(store.finds, 0);
}

#[test]
fn unreadable_process_table_is_an_environment_error() {
    let mut table = trusted_table();
    table.fail = true;
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::new();
    let mut prompt = FakePrompt::scripted(&[]);

    let err = get_username(&mut table, &config, &mut store, &mut prompt).unwrap_err();

    assert!(matches!(err, Fatal::Environment(_)));
    assert_eq!(store.finds, 0);
}

#[test]
fn store_failure_aborts_with_the_store_text() {
    let mut table = trusted_table();
    let config = FakeConfig("https://host/org/repo.git".to_string());
    let mut store = MemoryStore::new();
    store.fail_with = Some("vault is locked".to_string());
    let mut prompt = FakePrompt::scripted(&[]);

    let err = get_password(&mut table, &config, &mut store, &mut prompt).unwrap_err();

    match err {
        Fatal::Store(message) => assert_eq!(message, "vault is locked"),
        other => panic!("expected a store error, got {other:?}"),
    }
    assert!(prompt.labels_seen.is_empty());
}

#[test]
fn unset_remote_url_still_reaches_the_create_path() {
    let mut table = trusted_table();
    let config = FakeConfig(String::new());
    let mut store = MemoryStore::new();
    let mut prompt = FakePrompt::scripted(&["bob", "pw"]);

    let username = get_username(&mut table, &config, &mut store, &mut prompt).unwrap();

    assert_eq!(username, "bob");
    let stored = store.find("", false).unwrap().unwrap();
    assert_eq!(stored.username, "bob");
}
