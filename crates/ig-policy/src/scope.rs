// scope.rs — Glob scope matching for intent-owned paths.
//
// Matching rules:
// - Separators are folded to `/` and `.`/`..` segments resolved lexically
//   before matching, so `src/foo/../../etc/x` cannot hide behind `src/foo/**`.
// - `*` never crosses `/`; `**` spans directories.
// - A pattern without `/` also matches the base name (`*.ts` matches
//   `src/deep/a.ts`).
// - Dotfiles are matched like any other name.
// - Empty pattern list = unrestricted. Otherwise any single match wins.
// - Invalid patterns never match (fail-closed).

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decide whether `path` is covered by `patterns`.
pub fn is_in_scope(path: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    let path = normalize_path(path);
    patterns.iter().any(|pattern| matches_pattern(pattern, &path))
}

/// Canonical `/`-separated form of a workspace path.
pub fn normalize_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Express `path` relative to `workspace_root` when it is an absolute path
/// inside the workspace; otherwise return it normalized as given.
pub fn workspace_relative(path: &str, workspace_root: &Path) -> String {
    let normalized = normalize_path(path);
    let candidate = Path::new(&normalized);
    if candidate.is_absolute() {
        let root = normalize_path(&workspace_root.to_string_lossy());
        if let Ok(rest) = candidate.strip_prefix(&root) {
            let parts: Vec<String> = rest
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                    _ => None,
                })
                .collect();
            return parts.join("/");
        }
    }
    normalized
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let pattern = normalize_path(pattern);
    if pattern.is_empty() {
        return false;
    }
    let compiled = match Pattern::new(&pattern) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "invalid scope pattern never matches");
            return false;
        }
    };
    if compiled.matches_with(path, MATCH_OPTIONS) {
        return true;
    }
    if !pattern.contains('/') {
        let base = path.rsplit('/').next().unwrap_or(path);
        return compiled.matches_with(base, MATCH_OPTIONS);
    }
    false
}
