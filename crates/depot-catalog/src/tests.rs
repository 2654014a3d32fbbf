use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use depot_core::{PackageRecord, PackageSource, PackageVersion};

use super::*;

fn test_root(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "depot-catalog-tests-{label}-{}-{}",
        std::process::id(),
        nanos
    ))
}

fn version(raw: &str) -> PackageVersion {
    raw.parse().expect("version must parse")
}

fn record(name: &str, raw_version: &str, file: Option<&str>, deps: &[&str]) -> PackageRecord {
    PackageRecord {
        name: name.to_string(),
        version: version(raw_version),
        file: file.map(ToOwned::to_owned),
        dependencies: deps.iter().map(|dep| dep.to_string()).collect(),
    }
}

fn write_catalog(root: &Path, index: &str) {
    fs::create_dir_all(root).expect("must create catalog root");
    fs::write(root.join("index.ini"), index).expect("must write catalog index");
}

#[test]
fn load_fails_when_root_is_missing() {
    let root = test_root("no-root");

    let err = Catalog::load("main", &root).expect_err("must fail without root");
    assert!(matches!(err, CatalogError::CatalogUnavailable { .. }));
}

#[test]
fn load_fails_when_index_is_missing() {
    let root = test_root("no-index");
    fs::create_dir_all(&root).expect("must create catalog root");

    let err = Catalog::load("main", &root).expect_err("must fail without index");
    assert!(matches!(err, CatalogError::IndexMissing { .. }));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn load_fails_on_malformed_index() {
    let root = test_root("bad-index");
    write_catalog(&root, "[foo\nversion = \"1\"\n");

    let err = Catalog::load("main", &root).expect_err("must fail on malformed index");
    assert!(matches!(err, CatalogError::IndexInvalid { .. }));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn catalog_answers_the_read_contract() {
    let root = test_root("read");
    write_catalog(
        &root,
        "[foo]\nversion = \"1.0\"\nfile = \"foo.zip\"\ndependences = \"bar\"\n\n[bar]\nversion = \"2.0\"\n",
    );

    let catalog = Catalog::load("main", &root).expect("catalog must load");
    assert_eq!(catalog.name(), "main");

    let listed = catalog.list();
    assert_eq!(
        listed,
        vec![
            ("bar".to_string(), version("2.0")),
            ("foo".to_string(), version("1.0")),
        ]
    );

    assert_eq!(catalog.dependencies_of("foo"), vec!["bar"]);
    assert!(catalog.dependencies_of("bar").is_empty());
    assert!(catalog.dependencies_of("missing").is_empty());

    let foo = catalog.find("foo").expect("foo must be present");
    assert_eq!(
        catalog.archive_path(foo),
        Some(root.join("foo.zip"))
    );
    let bar = catalog.find("bar").expect("bar must be present");
    assert_eq!(catalog.archive_path(bar), None);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn ledger_open_creates_directory_and_empty_index() {
    let root = test_root("ledger-create");

    let ledger = Ledger::open(&root).expect("ledger must open");
    assert!(ledger.index_path().is_file());
    assert!(ledger.list().is_empty());

    // Second open must be a no-op.
    let reopened = Ledger::open(&root).expect("ledger must reopen");
    assert!(reopened.list().is_empty());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn record_install_copies_source_fields() {
    let root = test_root("ledger-install");
    let mut ledger = Ledger::open(&root).expect("ledger must open");

    ledger.record_install("foo", &record("foo", "1.0", Some("foo.zip"), &["bar"]));

    let entry = ledger.find("foo").expect("foo must be installed");
    assert_eq!(entry.version, version("1.0"));
    assert_eq!(entry.file.as_deref(), Some("foo.zip"));
    assert_eq!(entry.dependencies, vec!["bar"]);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn record_update_clears_fields_the_source_lacks() {
    let root = test_root("ledger-update");
    let mut ledger = Ledger::open(&root).expect("ledger must open");

    ledger.record_install("foo", &record("foo", "1.0", Some("foo.zip"), &["bar"]));
    ledger.record_update("foo", &record("foo", "2.0", None, &[]));

    let entry = ledger.find("foo").expect("foo must be installed");
    assert_eq!(entry.version, version("2.0"));
    assert!(entry.file.is_none());
    assert!(entry.dependencies.is_empty());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn record_removal_reports_missing_entries() {
    let root = test_root("ledger-removal");
    let mut ledger = Ledger::open(&root).expect("ledger must open");

    ledger.record_install("foo", &record("foo", "1.0", None, &[]));
    let removed = ledger.record_removal("foo").expect("foo must be removable");
    assert_eq!(removed.version, version("1.0"));
    assert!(ledger.find("foo").is_none());

    assert_eq!(
        ledger.record_removal("foo"),
        Err(LedgerError::PackageNotInstalled("foo".to_string()))
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn persist_round_trips_and_leaves_no_staging_file() {
    let root = test_root("ledger-persist");
    let mut ledger = Ledger::open(&root).expect("ledger must open");

    ledger.record_install("foo", &record("foo", "1.0", Some("foo.zip"), &["bar"]));
    ledger.record_install("bar", &record("bar", "2.0", None, &[]));
    ledger.persist().expect("ledger must persist");

    assert!(!root.join("index.ini.tmp").exists());

    let reloaded = Ledger::open(&root).expect("ledger must reload");
    assert_eq!(reloaded.list(), ledger.list());
    assert_eq!(
        reloaded.find("foo").expect("foo must survive").dependencies,
        vec!["bar"]
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn updates_against_lists_only_older_entries() {
    let catalog_root = test_root("updates-catalog");
    write_catalog(
        &catalog_root,
        "[old]\nversion = \"2.0\"\n\n[same]\nversion = \"1.0\"\n\n[unrelated]\nversion = \"9\"\n",
    );
    let catalog = Catalog::load("main", &catalog_root).expect("catalog must load");

    let ledger_root = test_root("updates-ledger");
    let mut ledger = Ledger::open(&ledger_root).expect("ledger must open");
    ledger.record_install("old", &record("old", "1.0", None, &[]));
    ledger.record_install("same", &record("same", "1.0", None, &[]));
    ledger.record_install("local-only", &record("local-only", "1.0", None, &[]));

    let candidates = ledger.updates_against(&catalog);
    assert_eq!(
        candidates,
        vec![UpdateCandidate {
            name: "old".to_string(),
            installed: version("1.0"),
            available: version("2.0"),
        }]
    );

    let _ = fs::remove_dir_all(&catalog_root);
    let _ = fs::remove_dir_all(&ledger_root);
}

#[test]
fn package_dir_is_name_then_version() {
    let root = test_root("ledger-layout");
    let ledger = Ledger::open(&root).expect("ledger must open");
    assert_eq!(
        ledger.package_dir("foo", &version("1.0")),
        root.join("foo").join("1.0")
    );

    let _ = fs::remove_dir_all(&root);
}
