//! Configuration constants for ts-tangle
//!
//! This module contains the defaults used throughout the application. Most of
//! these values can be overridden through environment variables, command line
//! flags or a `.ts-tangle.toml` settings file.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the yarn ball animation
    pub const SPINNER_FRAMES: &[&str] = &["🧶 ", "🧶·", "🧶•", "🧶●", "🧶•", "🧶·"];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default graph format when not specified
    pub const DEFAULT_GRAPH_FORMAT: &str = "ascii";
}

/// Source file and project layout conventions
pub mod project {
    /// Extensions of files that take part in the import graph, in the order
    /// they are probed when a specifier omits one
    pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

    /// Config file names that declare path mapping, in registration priority
    pub const CONFIG_FILE_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

    /// Directories never descended into while discovering configs
    pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

    /// Dependency cache directory name
    pub const NODE_MODULES: &str = "node_modules";

    /// Package manifest file name
    pub const PACKAGE_MANIFEST: &str = "package.json";

    /// Marker files that declare a multi-package workspace on their own
    pub const WORKSPACE_MARKERS: &[&str] = &["pnpm-workspace.yaml", "lerna.json"];

    /// Default `exclude` list of a config that does not declare one
    pub const DEFAULT_CONFIG_EXCLUDES: &[&str] =
        &["node_modules", "bower_components", "jspm_packages"];

    /// Node.js core modules; importing one never creates a file dependency
    pub const NODE_BUILTINS: &[&str] = &[
        "assert",
        "async_hooks",
        "buffer",
        "child_process",
        "cluster",
        "console",
        "constants",
        "crypto",
        "dgram",
        "diagnostics_channel",
        "dns",
        "domain",
        "events",
        "fs",
        "http",
        "http2",
        "https",
        "inspector",
        "module",
        "net",
        "os",
        "path",
        "perf_hooks",
        "process",
        "punycode",
        "querystring",
        "readline",
        "repl",
        "stream",
        "string_decoder",
        "sys",
        "timers",
        "tls",
        "trace_events",
        "tty",
        "url",
        "util",
        "v8",
        "vm",
        "wasi",
        "worker_threads",
        "zlib",
    ];

    /// Settings file looked up at the workspace root
    pub const SETTINGS_FILE_NAME: &str = ".ts-tangle.toml";
}
