//! End-to-end reference queries against the fixture project.

use std::path::{Path, PathBuf};
use symref::{analyze_symbol, Config, SymbolKind, SymrefError, Workspace};

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn workspace() -> Workspace {
    Workspace::build(&fixtures_path(), &Config::default()).expect("Failed to build workspace")
}

#[test]
fn test_interface_references_across_files() {
    let ws = workspace();
    let analysis = analyze_symbol(&ws, "IUser", false).unwrap();

    assert_eq!(analysis.kind, SymbolKind::Interface);
    assert_eq!(analysis.definition.position.file, Path::new("types.ts"));
    assert_eq!(analysis.definition.context, "global scope");
    assert!(analysis.has_references);

    // the import statement in UserService.ts counts, at global scope
    assert!(analysis.references.iter().any(|r| {
        r.position.file == Path::new("UserService.ts")
            && r.position.line == 1
            && r.context == "global scope"
    }));

    // the parameter and return types inside getUser carry the method context
    assert!(analysis
        .references
        .iter()
        .any(|r| r.context == "class UserService.getUser"));

    // nothing in the declaring file with default options
    assert!(analysis
        .references
        .iter()
        .all(|r| r.position.file != Path::new("types.ts")));
}

#[test]
fn test_class_references_include_import_and_construction() {
    let ws = workspace();
    let analysis = analyze_symbol(&ws, "UserService", false).unwrap();

    assert_eq!(analysis.kind, SymbolKind::Class);
    let in_main: Vec<_> = analysis
        .references
        .iter()
        .filter(|r| r.position.file == Path::new("main.ts"))
        .collect();
    // import on line 1, construction on line 4
    assert!(in_main.iter().any(|r| r.position.line == 1));
    assert!(in_main.iter().any(|r| r.position.line == 4));
}

#[test]
fn test_method_reference_through_member_access() {
    let ws = workspace();
    let analysis = analyze_symbol(&ws, "getUser", false).unwrap();

    assert_eq!(analysis.kind, SymbolKind::Method);
    assert!(analysis.has_references);
    assert!(analysis
        .references
        .iter()
        .any(|r| r.position.file == Path::new("main.ts") && r.position.line == 7));
}

#[test]
fn test_internal_reference_gating() {
    let ws = workspace();

    let external = analyze_symbol(&ws, "slugify", false).unwrap();
    assert!(!external.has_references);
    assert!(external.references.is_empty());

    let internal = analyze_symbol(&ws, "slugify", true).unwrap();
    assert!(internal.has_references);
    assert_eq!(internal.references.len(), 1);
    assert_eq!(internal.references[0].position.file, Path::new("labels.ts"));
    assert_eq!(internal.references[0].position.line, 5);
    assert_eq!(internal.references[0].context, "global scope");

    // toggling the option never moves the definition
    assert_eq!(external.definition.position, internal.definition.position);
}

#[test]
fn test_unknown_symbol_is_an_error_not_an_empty_result() {
    let ws = workspace();
    let err = analyze_symbol(&ws, "DoesNotExist", false).unwrap_err();
    assert!(matches!(err, SymrefError::SymbolNotFound { .. }));
}

#[test]
fn test_ambient_declarations_are_invisible() {
    let ws = workspace();

    // globals.d.ts declares both of these; neither is a definition source
    assert!(matches!(
        analyze_symbol(&ws, "Marker", false).unwrap_err(),
        SymrefError::SymbolNotFound { .. }
    ));
    assert!(matches!(
        analyze_symbol(&ws, "BUILD_ID", false).unwrap_err(),
        SymrefError::SymbolNotFound { .. }
    ));
}

#[test]
fn test_repeated_queries_are_deterministic() {
    let ws = workspace();

    let first = analyze_symbol(&ws, "IUser", false).unwrap();
    let second = analyze_symbol(&ws, "IUser", false).unwrap();

    assert_eq!(first.definition.position, second.definition.position);
    assert_eq!(first.references, second.references);
}

#[test]
fn test_reference_keys_are_unique() {
    let ws = workspace();
    let analysis = analyze_symbol(&ws, "IUser", false).unwrap();

    let mut keys: Vec<_> = analysis
        .references
        .iter()
        .map(|r| (r.position.clone(), r.context.clone()))
        .collect();
    let total = keys.len();
    keys.sort_by(|a, b| format!("{:?}", a).cmp(&format!("{:?}", b)));
    keys.dedup();
    assert_eq!(keys.len(), total);
}
