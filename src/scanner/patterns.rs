use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

// Every pattern consumes one boundary character instead of using a
// look-behind, so `obj.import(...)` and `reimport x` never match.

/// `import x from 'm'`, `import * as x from 'm'`, `import { a } from 'm'`,
/// `import x, { a } from 'm'`, and their `import type` variants
pub(crate) fn static_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?m)(?:^|[^\w$.])import\s+(?P<type>type\s+)?(?P<clause>(?:[\w$]+\s*,\s*)?(?:\*\s*as\s+[\w$]+|\{[^}]*\})|[\w$]+)\s*from\s*["'](?P<spec>[^"'\r\n]+)["']"#,
        )
    })
}

/// `import 'm'`
pub(crate) fn side_effect_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?m)(?:^|[^\w$.])import\s*["'](?P<spec>[^"'\r\n]+)["']"#))
}

/// `import('m')` and ``import(`m`)`` without interpolation
pub(crate) fn dynamic_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?m)(?:^|[^\w$.])import\s*\(\s*(?:["'](?P<spec>[^"'\r\n]+)["']|`(?P<tpl>[^`$\r\n]+)`)\s*[,)]"#,
        )
    })
}

/// `export * from 'm'`, `export * as ns from 'm'`, `export { a } from 'm'`
/// and their `export type` variants
pub(crate) fn export_from() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?m)(?:^|[^\w$.])export\s+(?P<type>type\s+)?(?P<clause>\*(?:\s*as\s+[\w$]+)?|\{[^}]*\})\s*from\s*["'](?P<spec>[^"'\r\n]+)["']"#,
        )
    })
}

/// `require('m')`, which also covers `import x = require('m')`
pub(crate) fn require_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"(?m)(?:^|[^\w$.])require\s*\(\s*["'](?P<spec>[^"'\r\n]+)["']\s*\)"#)
    })
}

/// Start of an `import`/`export` statement anywhere on a line
pub(crate) fn statement_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?:^|[^\w$.])(?:import|export)\b"#))
}
