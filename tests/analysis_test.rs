//! Integration tests for ts-tangle using the library interface

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use ts_tangle::analyzer::{AnalysisOptions, AnalysisReport, ImportAnalyzer};
use ts_tangle::core::Warning;

/// A throwaway monorepo rooted at a workspace-declaring `package.json`
struct Workspace {
    _temp: TempDir,
    root: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let workspace = Self { _temp: temp, root };
        workspace.write("package.json", r#"{ "private": true, "workspaces": ["packages/*"] }"#);
        workspace
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn analyze(&self, entry: &str) -> AnalysisReport {
        ImportAnalyzer::new(AnalysisOptions::default())
            .analyze(&self.path(entry), None)
            .unwrap()
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Reached files, relative to the root, in tree order
    fn files(&self, report: &AnalysisReport) -> Vec<String> {
        report.tree.keys().map(|path| self.relative(path)).collect()
    }

    /// Closed file sequence of every cycle, relative to the root
    fn cycles(&self, report: &AnalysisReport) -> Vec<Vec<String>> {
        report
            .cycles
            .iter()
            .map(|cycle| {
                cycle
                    .files
                    .files()
                    .iter()
                    .map(|path| self.relative(path))
                    .collect()
            })
            .collect()
    }
}

#[test]
fn test_acyclic_project() {
    let ws = Workspace::new();
    ws.write("src/main.ts", "import { a } from './a';\nconsole.log(a);\n");
    ws.write("src/a.ts", "import { b } from './b';\nexport const a = b;\n");
    ws.write("src/b.ts", "export const b = 1;\n");

    let report = ws.analyze("src/main.ts");

    assert!(!report.has_cycles());
    assert_eq!(report.file_count(), 3);
    assert_eq!(ws.files(&report), vec!["src/a.ts", "src/b.ts", "src/main.ts"]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_three_file_cycle_with_statements() {
    let ws = Workspace::new();
    ws.write("src/a.ts", "import { b } from './b';\nexport const a = () => b;\n");
    ws.write(
        "src/b.ts",
        "// b depends on c\nimport { c } from './c';\nexport const b = () => c;\n",
    );
    ws.write(
        "src/c.ts",
        "export const c = 1;\n\nimport { a } from './a';\nexport const again = a;\n",
    );

    let report = ws.analyze("src/a.ts");

    assert_eq!(
        ws.cycles(&report),
        vec![vec!["src/a.ts", "src/b.ts", "src/c.ts", "src/a.ts"]]
    );

    let edges: Vec<(String, String, String, usize)> = report.cycles[0]
        .edges
        .iter()
        .map(|edge| {
            (
                ws.relative(&edge.importer),
                ws.relative(&edge.importee),
                edge.specifier.clone(),
                edge.line,
            )
        })
        .collect();
    assert_eq!(
        edges,
        vec![
            ("src/a.ts".into(), "src/b.ts".into(), "./b".into(), 1),
            ("src/b.ts".into(), "src/c.ts".into(), "./c".into(), 2),
            ("src/c.ts".into(), "src/a.ts".into(), "./a".into(), 3),
        ]
    );
    assert_eq!(report.cycles[0].edges[2].text, "import { a } from './a';");
    assert_eq!(
        report.cycles[0].edges[1].before.as_deref(),
        Some("// b depends on c")
    );
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let ws = Workspace::new();
    ws.write("src/main.ts", "import './left';\nimport './right';\n");
    ws.write("src/left.ts", "import { shared } from './shared';\nexport const l = shared;\n");
    ws.write("src/right.ts", "import { shared } from './shared';\nexport const r = shared;\n");
    ws.write("src/shared.ts", "export const shared = 1;\n");

    let report = ws.analyze("src/main.ts");

    assert!(!report.has_cycles());
    assert_eq!(report.file_count(), 4);
}

#[test]
fn test_alias_with_extension_probing() {
    let ws = Workspace::new();
    ws.write(
        "tsconfig.json",
        r#"{
            // comments are allowed in tsconfig files
            "compilerOptions": {
                "baseUrl": ".",
                "paths": { "@utils/*": ["./src/utils/*"] },
            },
        }"#,
    );
    ws.write(
        "src/main.ts",
        "import { format } from '@utils/format';\nimport { today } from '@utils/dates';\n",
    );
    ws.write("src/utils/format.tsx", "export const format = 1;\n");
    ws.write("src/utils/dates/index.ts", "export const today = 2;\n");

    let report = ws.analyze("src/main.ts");

    assert_eq!(
        ws.files(&report),
        vec!["src/main.ts", "src/utils/dates/index.ts", "src/utils/format.tsx"]
    );
    assert_eq!(report.configs, vec![ws.path("tsconfig.json")]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_longest_alias_prefix_wins() {
    let ws = Workspace::new();
    ws.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "paths": {
            "@x/*": ["./general/*"],
            "@x/y/*": ["./specific/*"]
        } } }"#,
    );
    ws.write("src/main.ts", "import { z } from '@x/y/z';\n");
    ws.write("general/y/z.ts", "export const z = 'general';\n");
    ws.write("specific/z.ts", "export const z = 'specific';\n");

    let report = ws.analyze("src/main.ts");

    assert_eq!(ws.files(&report), vec!["specific/z.ts", "src/main.ts"]);
}

#[test]
fn test_nearest_config_governs() {
    let ws = Workspace::new();
    ws.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@shared/*": ["./shared/*"] } } }"#,
    );
    ws.write(
        "packages/web/tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": "./src", "paths": { "@shared/*": ["./lib/*"] } } }"#,
    );
    ws.write("packages/web/src/main.ts", "import { x } from '@shared/x';\n");
    ws.write("packages/web/src/lib/x.ts", "export const x = 'web';\n");
    ws.write("shared/x.ts", "export const x = 'root';\n");

    let report = ws.analyze("packages/web/src/main.ts");

    assert_eq!(
        ws.files(&report),
        vec!["packages/web/src/lib/x.ts", "packages/web/src/main.ts"]
    );
}

#[test]
fn test_matched_but_unresolved_does_not_fall_back_to_parent() {
    let ws = Workspace::new();
    ws.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@shared/*": ["./shared/*"] } } }"#,
    );
    ws.write(
        "packages/web/tsconfig.json",
        r#"{ "compilerOptions": { "baseUrl": "./src" } }"#,
    );
    ws.write("packages/web/src/main.ts", "import { x } from '@shared/x';\n");
    ws.write("shared/x.ts", "export const x = 'root';\n");

    let report = ws.analyze("packages/web/src/main.ts");

    assert_eq!(ws.files(&report), vec!["packages/web/src/main.ts"]);
    assert_eq!(
        report.warnings,
        vec![Warning::Unresolved {
            importer: ws.path("packages/web/src/main.ts"),
            specifier: "@shared/x".to_string(),
            line: 1,
        }]
    );
}

#[test]
fn test_two_file_cycle_lines() {
    let ws = Workspace::new();
    ws.write(
        "src/a.ts",
        "export const one = 1;\nimport { b } from './b';\nexport const a = b;\n",
    );
    ws.write("src/b.ts", "import { a } from './a';\nexport const b = a;\n");

    let report = ws.analyze("src/a.ts");

    assert_eq!(ws.cycles(&report), vec![vec!["src/a.ts", "src/b.ts", "src/a.ts"]]);
    let lines: Vec<usize> = report.cycles[0].edges.iter().map(|edge| edge.line).collect();
    assert_eq!(lines, vec![2, 1]);
}

#[test]
fn test_type_only_back_edge_is_not_a_cycle() {
    let ws = Workspace::new();
    ws.write("src/a.ts", "import { b } from './b';\nexport type A = { id: string };\n");
    ws.write(
        "src/b.ts",
        "import type { A } from './a';\nexport const b = (value: A) => value.id;\n",
    );

    let report = ws.analyze("src/a.ts");

    assert!(!report.has_cycles());
    assert_eq!(report.file_count(), 2);
}

#[test]
fn test_import_type_expression_is_not_a_cycle() {
    let ws = Workspace::new();
    ws.write("src/a.ts", "import { b } from './b';\nexport const a = () => b;\n");
    ws.write(
        "src/b.ts",
        "export type A = typeof import('./a');\nexport let current: import('./a').Handle;\nexport const b = 1;\n",
    );

    let report = ws.analyze("src/a.ts");

    assert!(!report.has_cycles());
    assert_eq!(ws.files(&report), vec!["src/a.ts", "src/b.ts"]);
}

#[test]
fn test_dynamic_imports_can_be_skipped() {
    let ws = Workspace::new();
    ws.write("src/a.ts", "import { b } from './b';\nexport const a = b;\n");
    ws.write("src/b.ts", "export const b = () => import('./a');\n");

    let report = ws.analyze("src/a.ts");
    assert!(report.has_cycles());

    let mut analyzer = ImportAnalyzer::new(AnalysisOptions {
        skip_dynamic_imports: true,
        ..AnalysisOptions::default()
    });
    let report = analyzer.analyze(&ws.path("src/a.ts"), None).unwrap();
    assert!(!report.has_cycles());
}

#[test]
fn test_results_are_deterministic() {
    let ws = Workspace::new();
    ws.write("src/main.ts", "import './z';\nimport './m';\nimport './a';\n");
    ws.write("src/a.ts", "import './m';\n");
    ws.write("src/m.ts", "import './z';\nimport './main';\n");
    ws.write("src/z.ts", "import './a';\n");

    let mut analyzer = ImportAnalyzer::new(AnalysisOptions::default());
    let first = analyzer.analyze(&ws.path("src/main.ts"), None).unwrap();
    analyzer.reset();
    let second = analyzer.analyze(&ws.path("src/main.ts"), None).unwrap();

    assert!(first.has_cycles());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(ws.cycles(&first), ws.cycles(&second));
}

#[test]
fn test_reset_picks_up_config_changes() {
    let ws = Workspace::new();
    ws.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "paths": { "@lib/*": ["./v1/*"] } } }"#,
    );
    ws.write("src/main.ts", "import { value } from '@lib/value';\n");
    ws.write("v1/value.ts", "export const value = 1;\n");
    ws.write("v2/value.ts", "export const value = 2;\n");

    let mut analyzer = ImportAnalyzer::new(AnalysisOptions::default());
    let entry = ws.path("src/main.ts");
    let before = analyzer.analyze(&entry, None).unwrap();
    assert!(before.tree.contains_key(&ws.path("v1/value.ts")));

    ws.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "paths": { "@lib/*": ["./v2/*"] } } }"#,
    );

    // Discovery is cached for the analyzer's lifetime
    let cached = analyzer.analyze(&entry, None).unwrap();
    assert!(cached.tree.contains_key(&ws.path("v1/value.ts")));

    analyzer.reset();
    let rebuilt = analyzer.analyze(&entry, None).unwrap();
    assert!(rebuilt.tree.contains_key(&ws.path("v2/value.ts")));
    assert!(!rebuilt.tree.contains_key(&ws.path("v1/value.ts")));
}

#[test]
fn test_excluded_files_leave_the_graph() {
    let ws = Workspace::new();
    ws.write("src/a.ts", "import './b';\nimport './generated/schema';\n");
    ws.write("src/b.ts", "import './a';\n");
    ws.write("src/generated/schema.ts", "import '../a';\n");

    let mut analyzer = ImportAnalyzer::new(AnalysisOptions {
        exclude: vec!["src/generated/**".to_string()],
        ..AnalysisOptions::default()
    });
    let report = analyzer.analyze(&ws.path("src/a.ts"), None).unwrap();

    assert_eq!(ws.files(&report), vec!["src/a.ts", "src/b.ts"]);
    assert_eq!(ws.cycles(&report), vec![vec!["src/a.ts", "src/b.ts", "src/a.ts"]]);
}

#[test]
fn test_missing_entry_is_an_error() {
    let ws = Workspace::new();

    let result = ImportAnalyzer::new(AnalysisOptions::default())
        .analyze(&ws.path("src/nope.ts"), None);

    assert!(result.is_err());
}
