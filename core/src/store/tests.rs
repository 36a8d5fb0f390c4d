use super::*;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonConfigStore {
    JsonConfigStore::in_dir(dir.path())
}

#[test]
fn missing_file_is_seeded_and_persisted() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    let config = store.load();

    assert_eq!(config, default_config());
    assert!(store.path().exists());
    assert_eq!(store.read().unwrap(), default_config());
}

#[test]
fn missing_parent_directory_is_created() {
    let temp = TempDir::new().unwrap();
    let store = JsonConfigStore::in_dir(&temp.path().join("nested").join("dir"));

    store.load();

    assert!(store.path().exists());
}

#[test]
fn save_then_load_preserves_order() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let config = RootConfig::new(vec![
        SnippetGroup::new("B", vec![Snippet::new("two", "2"), Snippet::new("one", "1")]),
        SnippetGroup::new("A", vec![]),
    ]);

    store.save(&config).unwrap();

    assert_eq!(store.load(), config);
}

#[test]
fn invalid_json_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(store.path(), "{ not json").unwrap();

    let config = store.load();

    assert_eq!(config, RootConfig::default());
    // The broken file is left for the user to fix.
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
}

#[test]
fn read_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(store.path(), "[1, 2").unwrap();

    assert!(matches!(store.read(), Err(StoreError::Parse(_))));
}

#[test]
fn pascal_case_keys_are_accepted() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(
        store.path(),
        r#"{ "Groups": [ { "Name": "Work", "Snippets": [ { "Title": "Hi", "Content": "Hi there" } ] } ] }"#,
    )
    .unwrap();

    let config = store.load();

    assert_eq!(
        config,
        RootConfig::new(vec![SnippetGroup::new(
            "Work",
            vec![Snippet::new("Hi", "Hi there")]
        )])
    );
}

#[test]
fn missing_fields_default() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(store.path(), r#"{ "groups": [ { "snippets": [ {} ] } ] }"#).unwrap();

    let config = store.load();

    assert_eq!(config.groups.len(), 1);
    assert_eq!(config.groups[0].name, "");
    assert_eq!(config.groups[0].snippets, vec![Snippet::default()]);
}

#[test]
fn absent_title_is_not_written() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let config = RootConfig::new(vec![SnippetGroup::new(
        "G",
        vec![Snippet::untitled("body")],
    )]);

    store.save(&config).unwrap();

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(!written.contains("title"));
    assert!(written.contains("\"content\": \"body\""));
}

#[test]
fn null_members_keep_valid_groups() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(
        store.path(),
        r#"{"Groups":[{"Name":"Work","Snippets":[{"Title":"Hi","Content":"hello"}]},{"Name":"Later","Snippets":null},{"Name":"X","Snippets":[{"Title":"t","Content":null},null]},null]}"#,
    )
    .unwrap();

    let config = store.load();

    assert_eq!(config.group_count(), 3);
    assert_eq!(config.groups[0].snippets, vec![Snippet::new("Hi", "hello")]);
    assert!(config.groups[1].snippets.is_empty());
    assert_eq!(
        config.groups[2].snippets,
        vec![Snippet::new("t", ""), Snippet::default()]
    );
}

#[test]
fn member_names_ignore_case() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    std::fs::write(
        store.path(),
        r#"{"GROUPS":[{"name":"Work","SNIPPETS":[{"tItLe":"Hi","CONTENT":"hello"}]}]}"#,
    )
    .unwrap();

    assert_eq!(
        store.read().unwrap(),
        RootConfig::new(vec![SnippetGroup::new(
            "Work",
            vec![Snippet::new("Hi", "hello")]
        )])
    );
}
