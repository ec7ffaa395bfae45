//! End-to-end dead-symbol scans against the fixture project.

use std::path::{Path, PathBuf};
use symref::{Config, DeadSymbolScanner, SymbolKind, SymrefError, Workspace};

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn workspace() -> Workspace {
    Workspace::build(&fixtures_path(), &Config::default()).expect("Failed to build workspace")
}

#[test]
fn test_uncalled_method_is_reported_dead() {
    let ws = workspace();
    let dead = DeadSymbolScanner::new(&ws)
        .scan(Path::new("NotificationService.ts"))
        .unwrap();

    let notify = dead
        .iter()
        .find(|d| d.name == "notify")
        .expect("notify should be dead");
    assert_eq!(notify.kind, SymbolKind::Method);
    assert_eq!(notify.context, "class NotificationService");
}

#[test]
fn test_referenced_declarations_are_not_reported() {
    let ws = workspace();
    let dead = DeadSymbolScanner::new(&ws)
        .scan(Path::new("NotificationService.ts"))
        .unwrap();

    let names: Vec<_> = dead.iter().map(|d| d.name.as_str()).collect();
    // imported and constructed in main.ts
    assert!(!names.contains(&"NotificationService"));
    // called through member access in main.ts
    assert!(!names.contains(&"flush"));
}

#[test]
fn test_property_used_only_internally_is_dead() {
    let ws = workspace();
    let dead = DeadSymbolScanner::new(&ws)
        .scan(Path::new("NotificationService.ts"))
        .unwrap();

    let pending = dead
        .iter()
        .find(|d| d.name == "pending")
        .expect("pending should be dead");
    assert_eq!(pending.kind, SymbolKind::Property);
    assert_eq!(pending.context, "class NotificationService");
}

#[test]
fn test_internal_only_function_and_unused_const_are_dead() {
    let ws = workspace();
    let dead = DeadSymbolScanner::new(&ws)
        .scan(Path::new("labels.ts"))
        .unwrap();

    let names: Vec<_> = dead.iter().map(|d| d.name.as_str()).collect();
    // slugify is called, but only inside its own file
    assert!(names.contains(&"slugify"));
    assert!(names.contains(&"defaultSlug"));

    for entry in &dead {
        assert_eq!(entry.context, "global scope");
    }
}

#[test]
fn test_file_with_living_symbols_only() {
    let ws = workspace();
    let dead = DeadSymbolScanner::new(&ws)
        .scan(Path::new("types.ts"))
        .unwrap();

    // IUser is imported by UserService.ts
    assert!(dead.iter().all(|d| d.name != "IUser"));
}

#[test]
fn test_unknown_file_fails_with_typed_error() {
    let ws = workspace();
    let err = DeadSymbolScanner::new(&ws)
        .scan(Path::new("not_here.ts"))
        .unwrap_err();
    assert!(matches!(err, SymrefError::FileNotInWorkspace { .. }));
}

#[test]
fn test_scan_accepts_absolute_paths() {
    let ws = workspace();
    let abs = fixtures_path().join("labels.ts");
    let dead = DeadSymbolScanner::new(&ws).scan(&abs).unwrap();
    assert!(dead.iter().any(|d| d.name == "slugify"));
}
