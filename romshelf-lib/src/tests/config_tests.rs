use super::*;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[library]
root = "/srv/library"

[resources]
root = "/srv/resources"

[exclude]
platforms = ["bios"]

[exclude.single]
names = ["gamelist.xml"]
patterns = ["*.txt"]
regex = ["_\\."]
extensions = ["db"]

[exclude.multi]
names = ["Manuals"]

[system.platforms]
gc = "ngc"
"#;

#[test]
fn parse_full_config() {
    let config = ShelfConfig::parse(SAMPLE).unwrap();
    assert_eq!(config.library.root, Some(PathBuf::from("/srv/library")));
    assert_eq!(config.resources.root, Some(PathBuf::from("/srv/resources")));
    assert_eq!(config.exclude.platforms, vec!["bios"]);
    assert_eq!(config.exclude.single.rules.names, vec!["gamelist.xml"]);
    assert_eq!(config.exclude.single.rules.patterns, vec!["*.txt"]);
    assert_eq!(config.exclude.single.rules.regex, vec!["_\\."]);
    assert_eq!(config.exclude.single.extensions, vec!["db"]);
    assert_eq!(config.exclude.multi.names, vec!["Manuals"]);
    assert!(config.exclude.resource.names.is_empty());
    assert_eq!(config.bindings().get("gc").map(String::as_str), Some("ngc"));
}

#[test]
fn empty_config_is_default() {
    let config = ShelfConfig::parse("").unwrap();
    assert_eq!(config, ShelfConfig::default());
}

#[test]
fn malformed_config_is_a_config_error() {
    let err = ShelfConfig::parse("[exclude\nplatforms = 3").unwrap_err();
    assert!(matches!(err, ShelfError::Config(_)), "got {err:?}");
}

#[test]
fn missing_file_loads_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = ShelfConfig::load(&tmp.path().join("nope.toml")).unwrap();
    assert_eq!(config, ShelfConfig::default());
}

#[test]
fn library_root_priority_chain() {
    let config = ShelfConfig::parse(SAMPLE).unwrap();
    assert_eq!(
        config.resolve_library_root(Some(PathBuf::from("/cli"))),
        PathBuf::from("/cli")
    );
    assert_eq!(config.resolve_library_root(None), PathBuf::from("/srv/library"));

    let empty = ShelfConfig::default();
    assert_eq!(
        empty.resolve_library_root(None),
        std::env::current_dir().unwrap()
    );
}

#[test]
fn resources_root_priority_chain() {
    let config = ShelfConfig::parse(SAMPLE).unwrap();
    assert_eq!(
        config.resolve_resources_root(Some(PathBuf::from("/cli"))),
        PathBuf::from("/cli")
    );
    assert_eq!(config.resolve_resources_root(None), PathBuf::from("/srv/resources"));
    assert!(
        ShelfConfig::default()
            .resolve_resources_root(None)
            .ends_with("romshelf/resources")
    );
}

#[test]
fn config_round_trips_through_toml() {
    let config = ShelfConfig::parse(SAMPLE).unwrap();
    let rendered = config.to_toml_string().unwrap();
    assert_eq!(ShelfConfig::parse(&rendered).unwrap(), config);
}

#[test]
fn bindings_are_added_and_removed_in_place() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("romshelf").join("config.toml");

    add_binding(&path, "gc", "ngc").unwrap();
    add_binding(&path, "psx", "ps").unwrap();
    let config = ShelfConfig::load(&path).unwrap();
    assert_eq!(config.bindings().len(), 2);
    assert_eq!(config.bindings()["psx"], "ps");

    remove_binding(&path, "gc").unwrap();
    remove_binding(&path, "not-bound").unwrap();
    let config = ShelfConfig::load(&path).unwrap();
    assert_eq!(config.bindings().len(), 1);
    assert!(!config.bindings().contains_key("gc"));
}

#[test]
fn binding_update_preserves_other_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        "[library]\nroot = \"/lib\"\n\n[future]\nflag = true\n",
    )
    .unwrap();

    add_binding(&path, "gc", "ngc").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("flag = true"));
    let config = ShelfConfig::load(&path).unwrap();
    assert_eq!(config.library.root, Some(PathBuf::from("/lib")));
    assert_eq!(config.bindings()["gc"], "ngc");
}
