//! `[Include ...]` resolution.
//!
//! Includes found while scanning a file are scheduled once that file ends and
//! are then parsed one at a time, depth first: every include of `a.mddl` is
//! fully parsed (including its own includes) before the next include of the
//! file that referenced `a.mddl`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// An include waiting to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInclude {
    /// Resolved path of the included file.
    pub path: PathBuf,
    /// File containing the directive.
    pub included_from: PathBuf,
    /// Line of the directive in `included_from`.
    pub line: usize,
}

impl PendingInclude {
    /// Resolve an include target relative to the including file's directory.
    pub fn new(included_from: &Path, target: &str, line: usize) -> Self {
        let base = included_from.parent().unwrap_or_else(|| Path::new(""));
        Self {
            path: base.join(target),
            included_from: included_from.to_path_buf(),
            line,
        }
    }
}

/// Work stack of pending includes plus the set of files already parsed.
#[derive(Debug, Default)]
pub struct IncludeResolver {
    pending: Vec<PendingInclude>,
    visited: HashSet<PathBuf>,
}

impl IncludeResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the includes of a file that has just been scanned.
    ///
    /// They run before anything scheduled earlier, in declaration order.
    pub fn schedule(&mut self, includes: Vec<PendingInclude>) {
        self.pending.extend(includes.into_iter().rev());
    }

    /// Take the next include to parse.
    pub fn next_include(&mut self) -> Option<PendingInclude> {
        self.pending.pop()
    }

    /// Record a file as parsed. Returns `false` if it already was.
    pub fn mark_visited(&mut self, path: &Path) -> bool {
        self.visited.insert(identity(path))
    }

    /// Number of includes still waiting.
    #[cfg(test)]
    fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of distinct files parsed so far.
    #[cfg(test)]
    fn visited(&self) -> usize {
        self.visited.len()
    }
}

/// Key used to recognise the same file reached through different paths.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn include(from: &str, target: &str) -> PendingInclude {
        PendingInclude::new(Path::new(from), target, 1)
    }

    #[test]
    fn test_resolves_relative_to_including_file() {
        let pending = include("model/Root.mddl", "sub/Other.mddl");
        assert_eq!(pending.path, PathBuf::from("model/sub/Other.mddl"));
        assert_eq!(pending.included_from, PathBuf::from("model/Root.mddl"));

        let pending = include("Root.mddl", "Other.mddl");
        assert_eq!(pending.path, PathBuf::from("Other.mddl"));
    }

    #[test]
    fn test_depth_first_order() {
        let mut resolver = IncludeResolver::new();
        resolver.schedule(vec![include("Root.mddl", "A.mddl"), include("Root.mddl", "B.mddl")]);

        let a = resolver.next_include().unwrap();
        assert_eq!(a.path, PathBuf::from("A.mddl"));

        // A's own include runs before B.
        resolver.schedule(vec![include("A.mddl", "A1.mddl")]);
        let order: Vec<_> = std::iter::from_fn(|| resolver.next_include())
            .map(|p| p.path)
            .collect();
        assert_eq!(order, vec![PathBuf::from("A1.mddl"), PathBuf::from("B.mddl")]);
        assert_eq!(resolver.pending(), 0);
    }

    #[test]
    fn test_visited_matches_equivalent_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let file = dir.path().join("Model.mddl");
        std::fs::write(&file, "!User\n").unwrap();

        let mut resolver = IncludeResolver::new();
        assert!(resolver.mark_visited(&file));
        assert!(!resolver.mark_visited(&dir.path().join("sub/../Model.mddl")));
        assert_eq!(resolver.visited(), 1);
    }
}
