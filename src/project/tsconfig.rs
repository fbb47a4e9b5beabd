//! `tsconfig.json` / `jsconfig.json` loading
//!
//! A config is flattened once: its `extends` chain is followed, every layer
//! is anchored at the directory of the file that declared it, and the child's
//! fields override the parent's one by one. Only the fields that influence
//! specifier resolution are kept.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use path_clean::PathClean;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::constants::project::{DEFAULT_CONFIG_EXCLUDES, NODE_MODULES};
use crate::core::Warning;
use crate::error::{ConfigParseError, TangleError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    extends: Option<Extends>,
    compiler_options: Option<RawCompilerOptions>,
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    Single(String),
    Chain(Vec<String>),
}

impl Extends {
    fn targets(&self) -> &[String] {
        match self {
            Extends::Single(target) => std::slice::from_ref(target),
            Extends::Chain(targets) => targets,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    base_url: Option<String>,
    paths: Option<Map<String, Value>>,
    out_dir: Option<String>,
}

/// One `paths` entry: an alias pattern and its candidate targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAlias {
    pub pattern: String,
    pub targets: Vec<String>,
}

impl PathAlias {
    /// Length of the literal text before the first `*`
    pub fn prefix_len(&self) -> usize {
        self.pattern.find('*').unwrap_or(self.pattern.len())
    }

    /// Text captured by the wildcard when `specifier` matches this alias
    ///
    /// A pattern without `*` only matches the identical specifier and
    /// captures nothing.
    pub fn capture<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        match self.pattern.split_once('*') {
            Some((prefix, suffix)) => {
                let rest = specifier.strip_prefix(prefix)?;
                if rest.len() < suffix.len() {
                    return None;
                }
                rest.strip_suffix(suffix)
            }
            None => (self.pattern == specifier).then_some(""),
        }
    }
}

/// A flattened, anchored project config
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// The config file itself
    pub path: PathBuf,
    /// Directory containing the config file
    pub dir: PathBuf,
    pub base_url: Option<PathBuf>,
    /// Aliases in declaration order
    pub paths: Vec<PathAlias>,
    /// Directory `paths` targets are relative to
    pub paths_base: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub selector: FileSelector,
    /// `false` for a pure pass-through config (`files` and `include` both
    /// explicitly empty), which never gets a resolver of its own
    pub is_resolving: bool,
}

impl ProjectConfig {
    /// Load `path`, following and merging its `extends` chain
    ///
    /// Problems with extended configs (missing, unparsable, cyclic) are
    /// returned as warnings; only a failure to load `path` itself is an
    /// error.
    pub fn load(path: &Path) -> Result<(Self, Vec<Warning>), TangleError> {
        let path = path
            .canonicalize()
            .map_err(|e| TangleError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut warnings = Vec::new();
        let mut chain = Vec::new();
        let layer = load_layer(&path, &mut chain, &mut warnings)?;

        Ok((Self::from_layer(path, layer), warnings))
    }

    fn from_layer(path: PathBuf, layer: Layer) -> Self {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let is_resolving = !matches!(
            (&layer.files, &layer.include),
            (Some(files), Some(include)) if files.is_empty() && include.is_empty()
        );

        let (paths, paths_declared_in) = layer
            .paths
            .unwrap_or_else(|| (Vec::new(), dir.clone()));
        let paths_base = layer.base_url.clone().unwrap_or(paths_declared_in);

        let include = match (&layer.include, &layer.files) {
            (Some(include), _) => include.clone(),
            (None, Some(_)) => Vec::new(),
            (None, None) => vec![anchor_pattern(&dir, "**/*")],
        };
        let exclude = layer.exclude.clone().unwrap_or_else(|| {
            DEFAULT_CONFIG_EXCLUDES
                .iter()
                .map(|name| anchor_pattern(&dir, name))
                .collect()
        });

        Self {
            selector: FileSelector::new(layer.files.unwrap_or_default(), &include, &exclude),
            base_url: layer.base_url,
            paths,
            paths_base,
            out_dir: layer.out_dir,
            is_resolving,
            path,
            dir,
        }
    }

    /// Whether `file` is governed by this config: selected by `files` or
    /// `include`, not excluded, and not an emitted file under `outDir`
    pub fn applies_to(&self, file: &Path) -> bool {
        if self
            .out_dir
            .as_ref()
            .is_some_and(|out_dir| file.starts_with(out_dir))
        {
            return false;
        }

        self.selector.matches(file)
    }
}

/// Compiled `files` / `include` / `exclude` selection of a config
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    files: Vec<PathBuf>,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileSelector {
    fn new(files: Vec<PathBuf>, include: &[String], exclude: &[String]) -> Self {
        Self {
            files,
            include: compile_patterns(include),
            exclude: compile_patterns(exclude),
        }
    }

    /// Listed `files` are always selected, even when an `exclude` pattern
    /// would match them.
    pub fn matches(&self, file: &Path) -> bool {
        if self.files.iter().any(|listed| listed == file) {
            return true;
        }

        let text = file.to_string_lossy();
        self.include
            .iter()
            .any(|pattern| pattern.matches_with(&text, MATCH_OPTIONS))
            && !self
                .exclude
                .iter()
                .any(|pattern| pattern.matches_with(&text, MATCH_OPTIONS))
    }
}

/// The config-relevant fields of one file, already anchored
#[derive(Debug, Clone, Default)]
struct Layer {
    base_url: Option<PathBuf>,
    /// Aliases plus the directory of the config that declared them
    paths: Option<(Vec<PathAlias>, PathBuf)>,
    out_dir: Option<PathBuf>,
    files: Option<Vec<PathBuf>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

impl Layer {
    fn from_raw(raw: &RawConfig, dir: &Path) -> Self {
        let options = raw.compiler_options.as_ref();

        let paths = options.and_then(|o| o.paths.as_ref()).map(|paths| {
            let aliases = paths
                .iter()
                .map(|(pattern, targets)| PathAlias {
                    pattern: pattern.clone(),
                    targets: targets
                        .as_array()
                        .into_iter()
                        .flatten()
                        .filter_map(Value::as_str)
                        .map(|target| target.replace('\\', "/"))
                        .collect(),
                })
                .filter(|alias| !alias.targets.is_empty())
                .collect();
            (aliases, dir.to_path_buf())
        });

        let anchor_all = |patterns: &Vec<String>| {
            patterns
                .iter()
                .map(|pattern| anchor_pattern(dir, pattern))
                .collect()
        };

        Self {
            base_url: options
                .and_then(|o| o.base_url.as_deref())
                .map(|base| dir.join(base).clean()),
            paths,
            out_dir: options
                .and_then(|o| o.out_dir.as_deref())
                .map(|out| dir.join(out).clean()),
            files: raw
                .files
                .as_ref()
                .map(|files| files.iter().map(|file| dir.join(file).clean()).collect()),
            include: raw.include.as_ref().map(anchor_all),
            exclude: raw.exclude.as_ref().map(anchor_all),
        }
    }

    /// Field-by-field override of `parent` with the values set in `self`
    fn over(self, parent: Layer) -> Layer {
        Layer {
            base_url: self.base_url.or(parent.base_url),
            paths: self.paths.or(parent.paths),
            out_dir: self.out_dir.or(parent.out_dir),
            files: self.files.or(parent.files),
            include: self.include.or(parent.include),
            exclude: self.exclude.or(parent.exclude),
        }
    }
}

fn load_layer(
    path: &Path,
    chain: &mut Vec<PathBuf>,
    warnings: &mut Vec<Warning>,
) -> Result<Layer, TangleError> {
    let raw = read_config(path)?;
    let dir = path.parent().unwrap_or(path);
    let own = Layer::from_raw(&raw, dir);

    let Some(extends) = &raw.extends else {
        return Ok(own);
    };

    chain.push(path.to_path_buf());
    let mut inherited = Layer::default();

    for target in extends.targets() {
        let Some(parent_path) = locate_extended(dir, target) else {
            warnings.push(Warning::ConfigSkipped {
                path: path.to_path_buf(),
                reason: format!("cannot find extended config '{target}'"),
            });
            continue;
        };

        if chain.contains(&parent_path) {
            warnings.push(Warning::ConfigSkipped {
                path: path.to_path_buf(),
                reason: format!("extends cycle through '{}'", parent_path.display()),
            });
            continue;
        }

        match load_layer(&parent_path, chain, warnings) {
            // Later entries of an `extends` array override earlier ones
            Ok(parent) => inherited = parent.over(inherited),
            Err(e) => warnings.push(Warning::ConfigSkipped {
                path: parent_path,
                reason: e.to_string(),
            }),
        }
    }

    chain.pop();
    Ok(own.over(inherited))
}

fn read_config(path: &Path) -> Result<RawConfig, TangleError> {
    let content = std::fs::read_to_string(path).map_err(|e| TangleError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config(path, content)
}

/// Strict JSON first, then JSON5 for comments and trailing commas
fn parse_config(path: &Path, content: String) -> Result<RawConfig, TangleError> {
    let strict = match serde_json::from_str::<RawConfig>(&content) {
        Ok(raw) => return Ok(raw),
        Err(e) => e,
    };

    if let Ok(value) = json_five::from_str::<Value>(&content)
        && let Ok(raw) = serde_json::from_value::<RawConfig>(value)
    {
        return Ok(raw);
    }

    Err(TangleError::ConfigParseError(Box::new(
        ConfigParseError::new(path.display().to_string(), content, strict),
    )))
}

/// Find the file an `extends` entry refers to
fn locate_extended(dir: &Path, target: &str) -> Option<PathBuf> {
    let is_path = target.starts_with("./")
        || target.starts_with("../")
        || Path::new(target).is_absolute();

    let candidates: Vec<PathBuf> = if is_path {
        let base = dir.join(target).clean();
        vec![base.clone(), with_json_suffix(&base)]
    } else {
        dir.ancestors()
            .flat_map(|ancestor| {
                let base = ancestor.join(NODE_MODULES).join(target);
                [
                    base.clone(),
                    with_json_suffix(&base),
                    base.join("tsconfig.json"),
                ]
            })
            .collect()
    };

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .and_then(|found| found.canonicalize().ok())
}

fn with_json_suffix(path: &Path) -> PathBuf {
    let mut text = path.as_os_str().to_os_string();
    if !path.to_string_lossy().ends_with(".json") {
        text.push(".json");
    }
    PathBuf::from(text)
}

/// Anchor a config-relative pattern at `dir`, producing an absolute glob
fn anchor_pattern(dir: &Path, pattern: &str) -> String {
    let pattern = pattern.replace('\\', "/");
    if Path::new(&pattern).is_absolute() {
        return pattern.trim_end_matches('/').to_string();
    }

    let mut base = dir.to_path_buf();
    let mut rest = pattern.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            base.pop();
            rest = stripped;
        } else {
            break;
        }
    }
    match rest {
        "." => rest = "",
        ".." => {
            base.pop();
            rest = "";
        }
        _ => {}
    }

    let escaped = Pattern::escape(&base.to_string_lossy());
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        escaped
    } else {
        format!("{}/{rest}", escaped.trim_end_matches('/'))
    }
}

/// A pattern naming a directory (no wildcard, no extension in its last
/// segment) also selects everything below it.
fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .flat_map(|pattern| {
            let last = pattern.rsplit('/').next().unwrap_or(pattern);
            let names_directory = !last.contains(['*', '?', '.']);
            let expanded = names_directory.then(|| format!("{pattern}/**/*"));
            std::iter::once(pattern.clone()).chain(expanded)
        })
        .filter_map(|pattern| Pattern::new(&pattern).ok())
        .collect()
}
