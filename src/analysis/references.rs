//! Classifies identifier occurrences as genuine references to a located
//! definition.
//!
//! Evidence, in order: binding resolution (the occurrence resolves to the
//! exact definition node), then structural fallback for the forms a scope
//! binder cannot decide without type information (constructions of a class,
//! member-access calls of a method), then import-path validation for
//! occurrences sitting inside import statements. Re-declarations of the same
//! name are never references, and neither is the definition's own name node.

use crate::analysis::context::ContextDescriber;
use crate::analysis::imports::{
    enclosing_import, import_specifier, is_relative_specifier, resolve_relative,
};
use crate::analysis::{Definition, ReferenceSite, SymbolKind};
use crate::syntax::{declared_as, identifiers, node_text, Resolver, ScopeBinder};
use crate::workspace::{ParsedFile, Workspace};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::trace;
use tree_sitter::Node;

/// Scans every file for occurrences that denote a given definition
pub struct ReferenceMatcher<'ws> {
    workspace: &'ws Workspace,
    include_internal: bool,
    resolver: Box<dyn Resolver>,
}

impl<'ws> ReferenceMatcher<'ws> {
    pub fn new(workspace: &'ws Workspace) -> Self {
        Self {
            workspace,
            include_internal: false,
            resolver: Box::new(ScopeBinder::new()),
        }
    }

    /// Also report references inside the declaring file (default: false)
    pub fn include_internal(mut self, include: bool) -> Self {
        self.include_internal = include;
        self
    }

    /// Replace the binding-resolution capability (tests inject fakes here)
    pub fn with_resolver(mut self, resolver: Box<dyn Resolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Ordered, deduplicated reference sites for the definition. An empty
    /// result is a valid outcome, not an error.
    pub fn find(&self, definition: &Definition) -> Vec<ReferenceSite> {
        let mut seen: HashSet<(PathBuf, usize, usize, String)> = HashSet::new();
        let mut references = Vec::new();

        for file in self.workspace.files() {
            if file.is_ambient {
                continue;
            }
            let declaring = file.path == definition.file;
            if declaring && !self.include_internal {
                continue;
            }

            for ident in identifiers(file.root()) {
                if node_text(ident, &file.source) != definition.name {
                    continue;
                }
                // the definition is never its own reference
                if declaring && ident.start_byte() == definition.name_byte {
                    continue;
                }
                // name positions of declaration headers restate, they don't use
                if declared_as(ident).is_some() {
                    continue;
                }

                let accepted = match enclosing_import(ident) {
                    Some(import) => self.import_reaches_definition(file, import, definition),
                    None => self.denotes_definition(file, ident, definition),
                };
                if !accepted {
                    continue;
                }

                let position = file.position_of(ident);
                let context = ContextDescriber::describe(ident, &file.source);
                trace!("Reference at {} ({})", position, context);

                let key = (
                    position.file.clone(),
                    position.line,
                    position.column,
                    context.clone(),
                );
                if seen.insert(key) {
                    references.push(ReferenceSite { position, context });
                }
            }
        }

        references
    }

    /// An occurrence inside an import statement counts only when the module
    /// specifier resolves onto the definition's file. Package specifiers are
    /// always discarded.
    fn import_reaches_definition(
        &self,
        file: &ParsedFile,
        import: Node,
        definition: &Definition,
    ) -> bool {
        let Some(specifier) = import_specifier(import, &file.source) else {
            return false;
        };
        if !is_relative_specifier(specifier) {
            return false;
        }
        resolve_relative(&file.path, specifier, self.workspace)
            .map_or(false, |path| path == definition.file)
    }

    fn denotes_definition(&self, file: &ParsedFile, ident: Node, definition: &Definition) -> bool {
        match self.resolver.resolve(self.workspace, file, ident) {
            Some(target) => {
                target.file == definition.file && target.byte == definition.name_byte
            }
            // The binder has no verdict: accept the structural forms it
            // cannot decide without type information
            None => match ident.parent() {
                Some(p)
                    if p.kind() == "new_expression"
                        && p.child_by_field_name("constructor") == Some(ident) =>
                {
                    definition.kind == SymbolKind::Class
                }
                Some(p)
                    if p.kind() == "member_expression"
                        && p.child_by_field_name("property") == Some(ident) =>
                {
                    definition.kind == SymbolKind::Method
                }
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::locator::DefinitionLocator;
    use crate::syntax::DeclTarget;
    use std::path::Path;

    fn find(ws: &Workspace, name: &str, internal: bool) -> (Definition, Vec<ReferenceSite>) {
        let def = DefinitionLocator::new(ws).locate(name).unwrap();
        let refs = ReferenceMatcher::new(ws).include_internal(internal).find(&def);
        (def, refs)
    }

    #[test]
    fn test_cross_file_call_is_a_reference() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("lib.ts", "export function greet(): string { return 'hi'; }\n"),
                (
                    "main.ts",
                    "import { greet } from './lib';\nconst msg = greet();\n",
                ),
            ],
        )
        .unwrap();

        let (_, refs) = find(&ws, "greet", false);
        // one at the import, one at the call
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.position.file == Path::new("main.ts")));
        assert_eq!(refs[1].position.line, 2);
    }

    #[test]
    fn test_same_file_references_are_gated() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[(
                "labels.ts",
                "export function slugify(v: string): string { return v; }\nexport const slug = slugify('Home');\n",
            )],
        )
        .unwrap();

        let (def, external) = find(&ws, "slugify", false);
        assert!(external.is_empty());

        let internal = ReferenceMatcher::new(&ws)
            .include_internal(true)
            .find(&def);
        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].position.line, 2);
        assert_eq!(internal[0].context, "global scope");
    }

    #[test]
    fn test_definition_is_not_its_own_reference() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[("a.ts", "export function lonely(): void {}\n")],
        )
        .unwrap();

        let (_, refs) = find(&ws, "lonely", true);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_signature_restatement_is_not_a_reference() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                (
                    "service.ts",
                    "export class Mailer {\n  notify(): void {}\n}\n",
                ),
                (
                    "contract.ts",
                    "export interface INotifier {\n  notify(): void;\n}\n",
                ),
            ],
        )
        .unwrap();

        let (_, refs) = find(&ws, "notify", false);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_member_access_call_matches_method() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                (
                    "service.ts",
                    "export class Mailer {\n  notify(): void {}\n}\n",
                ),
                (
                    "main.ts",
                    "import { Mailer } from './service';\nconst m = new Mailer();\nm.notify();\n",
                ),
            ],
        )
        .unwrap();

        let (_, refs) = find(&ws, "notify", false);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].position.line, 3);
    }

    #[test]
    fn test_construction_matches_class() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("widget.ts", "export class Widget {}\n"),
                // no import: binding cannot resolve, structure still can
                ("page.ts", "const w = new Widget();\n"),
            ],
        )
        .unwrap();

        let (_, refs) = find(&ws, "Widget", false);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].position.file, Path::new("page.ts"));
    }

    #[test]
    fn test_external_package_import_is_discarded() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("emitter.ts", "export class EventEmitter {}\n"),
                (
                    "main.ts",
                    "import { EventEmitter } from 'events';\nconst e = new EventEmitter();\n",
                ),
            ],
        )
        .unwrap();

        let (_, refs) = find(&ws, "EventEmitter", false);
        // the import names a package, not our file; the construction is
        // structural evidence and still counts
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].position.line, 2);
    }

    #[test]
    fn test_ambient_files_produce_no_references() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("real.ts", "export class Widget {}\n"),
                ("globals.d.ts", "declare const w: Widget;\n"),
            ],
        )
        .unwrap();

        let (_, refs) = find(&ws, "Widget", false);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_shadowed_name_does_not_match() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("lib.ts", "export function parse(): number { return 1; }\n"),
                (
                    "other.ts",
                    "function parse(): number { return 2; }\nconst n = parse();\n",
                ),
            ],
        )
        .unwrap();

        // other.ts declares its own parse; its call binds locally
        let (_, refs) = find(&ws, "parse", false);
        assert!(refs.is_empty());
    }

    struct NullResolver;
    impl Resolver for NullResolver {
        fn resolve(
            &self,
            _workspace: &Workspace,
            _file: &ParsedFile,
            _ident: Node,
        ) -> Option<DeclTarget> {
            None
        }
    }

    struct PinnedResolver(DeclTarget);
    impl Resolver for PinnedResolver {
        fn resolve(
            &self,
            _workspace: &Workspace,
            _file: &ParsedFile,
            _ident: Node,
        ) -> Option<DeclTarget> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_injected_resolver_drives_matching() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("lib.ts", "export function greet(): string { return 'hi'; }\n"),
                (
                    "main.ts",
                    "import { greet } from './lib';\nconst msg = greet();\n",
                ),
            ],
        )
        .unwrap();
        let def = DefinitionLocator::new(&ws).locate("greet").unwrap();

        // without binding evidence only the import survives
        let refs = ReferenceMatcher::new(&ws)
            .with_resolver(Box::new(NullResolver))
            .find(&def);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].position.line, 1);

        // a resolver that pins every occurrence to the definition accepts the
        // call as well
        let refs = ReferenceMatcher::new(&ws)
            .with_resolver(Box::new(PinnedResolver(DeclTarget {
                file: def.file.clone(),
                byte: def.name_byte,
                kind: def.kind,
            })))
            .find(&def);
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_results_are_deterministic() {
        let ws = Workspace::from_sources(
            Path::new("/p"),
            &[
                ("lib.ts", "export function greet(): string { return 'hi'; }\n"),
                (
                    "main.ts",
                    "import { greet } from './lib';\nconst a = greet();\nconst b = greet();\n",
                ),
            ],
        )
        .unwrap();

        let (_, first) = find(&ws, "greet", false);
        let (_, second) = find(&ws, "greet", false);
        assert_eq!(first, second);

        // dedup keys are unique across the result
        let keys: HashSet<_> = first
            .iter()
            .map(|r| (r.position.clone(), r.context.clone()))
            .collect();
        assert_eq!(keys.len(), first.len());
    }
}
