use std::path::Path;

use regex::Captures;

use super::mask::mask_comments;
use super::patterns::{
    dynamic_import, export_from, require_call, side_effect_import, statement_start,
    static_import,
};
use super::{ImportScanner, ScannedImport};
use crate::core::ImportKind;
use crate::error::TangleError;

/// Pattern-based scanner for ECMAScript and TypeScript module syntax
///
/// It understands every declaration form that can introduce a runtime
/// dependency, tolerates several declarations on one line and declarations
/// spanning several lines, and ignores anything inside comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexImportScanner;

impl RegexImportScanner {
    pub fn new() -> Self {
        Self
    }

    fn scan_text(&self, source: &str) -> Vec<ScannedImport> {
        let masked = mask_comments(source);
        let line_starts = line_starts(&masked);
        let mut found = Vec::new();

        let mut push = |caps: &Captures<'_>, group: &str, kind: ImportKind| {
            if let Some(spec) = caps.name(group) {
                found.push(ScannedImport {
                    specifier: spec.as_str().trim().to_string(),
                    kind,
                    offset: spec.start(),
                    line: line_of(&line_starts, spec.start()),
                });
            }
        };

        for caps in static_import().captures_iter(&masked) {
            if caps.name("type").is_some() {
                continue;
            }
            if let Some(kind) = import_clause_kind(&caps["clause"]) {
                push(&caps, "spec", kind);
            }
        }

        for caps in side_effect_import().captures_iter(&masked) {
            push(&caps, "spec", ImportKind::SideEffect);
        }

        for caps in dynamic_import().captures_iter(&masked) {
            if in_type_position(&masked, &caps) {
                continue;
            }
            push(&caps, "spec", ImportKind::Dynamic);
            push(&caps, "tpl", ImportKind::Dynamic);
        }

        for caps in export_from().captures_iter(&masked) {
            if caps.name("type").is_some() {
                continue;
            }
            if let Some(kind) = export_clause_kind(&caps["clause"]) {
                push(&caps, "spec", kind);
            }
        }

        for caps in require_call().captures_iter(&masked) {
            push(&caps, "spec", ImportKind::Require);
        }

        found.retain(|import| !import.specifier.is_empty());
        found.sort_by_key(|import| import.offset);
        found
    }
}

impl ImportScanner for RegexImportScanner {
    fn scan(&self, path: &Path, source: &str) -> Result<Vec<ScannedImport>, TangleError> {
        if source.contains('\0') {
            return Err(TangleError::GraphError {
                message: format!(
                    "'{}' looks like a binary file and cannot be scanned",
                    path.display()
                ),
            });
        }

        Ok(self.scan_text(source))
    }

    fn line_references(&self, line: &str, specifier: &str) -> bool {
        if specifier.is_empty() || !line.contains(specifier) {
            return false;
        }

        if self
            .scan_text(line)
            .iter()
            .any(|import| import.specifier == specifier)
        {
            return true;
        }

        // The closing line of a declaration spread over several lines, e.g.
        // `} from './x';`, carries the specifier without the keyword.
        !statement_start().is_match(line) && quoted_after_from(line, specifier)
    }
}

/// `typeof import('m')` and `import('m').Member` name types, not modules
/// loaded at runtime. Promise methods such as `.then(` stay dynamic imports.
fn in_type_position(text: &str, caps: &Captures<'_>) -> bool {
    let Some(whole) = caps.get(0) else {
        return false;
    };
    let keyword = whole.start() + whole.as_str().find("import").unwrap_or(0);

    let before = text[..keyword].trim_end();
    if let Some(rest) = before.strip_suffix("typeof")
        && !rest.ends_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
    {
        return true;
    }

    if !whole.as_str().ends_with(')') {
        return false;
    }
    let Some(member) = text[whole.end()..].trim_start().strip_prefix('.') else {
        return false;
    };
    let member = member.trim_start();
    let name_len = member
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(member.len());

    name_len > 0 && !member[name_len..].trim_start().starts_with('(')
}

/// Classify an import clause; `None` when every binding is type-only.
fn import_clause_kind(clause: &str) -> Option<ImportKind> {
    let clause = clause.trim();

    if clause.starts_with('{') {
        return (!all_bindings_type_only(clause)).then_some(ImportKind::Named);
    }
    if clause.contains(',') {
        return Some(ImportKind::Mixed);
    }
    if clause.starts_with('*') {
        return Some(ImportKind::Namespace);
    }
    Some(ImportKind::Default)
}

/// Classify an export clause; `None` when every binding is type-only.
fn export_clause_kind(clause: &str) -> Option<ImportKind> {
    let clause = clause.trim();

    if clause.starts_with('{') {
        return (!all_bindings_type_only(clause)).then_some(ImportKind::ReExport);
    }
    if clause == "*" {
        return Some(ImportKind::ReExportAll);
    }
    Some(ImportKind::ReExport)
}

/// `{ type A, type B }` is erased entirely; `{}` and `{ type A, b }` are not.
fn all_bindings_type_only(braced: &str) -> bool {
    let inner = braced.trim_start_matches('{').trim_end_matches('}');
    let bindings: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|binding| !binding.is_empty())
        .collect();

    !bindings.is_empty()
        && bindings
            .iter()
            .all(|binding| binding.starts_with("type ") || binding.starts_with("type\t"))
}

/// Whether `specifier` appears quoted right after a `from` keyword.
fn quoted_after_from(line: &str, specifier: &str) -> bool {
    ['\'', '"'].iter().any(|quote| {
        let needle = format!("{quote}{specifier}{quote}");
        line.match_indices(&needle)
            .any(|(index, _)| line[..index].trim_end().ends_with("from"))
    })
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(index, _)| index + 1))
        .collect()
}

fn line_of(line_starts: &[usize], offset: usize) -> usize {
    match line_starts.binary_search(&offset) {
        Ok(index) => index + 1,
        Err(index) => index,
    }
}
