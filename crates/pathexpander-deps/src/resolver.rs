use crate::{DepsError, Result};
use std::path::MAIN_SEPARATOR;

/// Works out where the local repository lives and strips it from artifact paths.
///
/// The root comes from the first artifact handed in: its group and artifact id
/// give the `/org/foo/bar/` fragment of the standard repository layout, and
/// whatever precedes that fragment in the file path is the root. Every later
/// artifact has to live under the same root.
#[derive(Debug, Clone, Default)]
pub struct RepoRootResolver {
    root: Option<String>,
}

impl RepoRootResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw (host separator) root, once the first artifact has been seen
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Return `file_path` relative to the repository root, resolving the root
    /// from this artifact if it is the first one.
    pub fn relativize(&mut self, group_id: &str, artifact_id: &str, file_path: &str) -> Result<String> {
        let root = match self.root.take() {
            Some(root) => root,
            None => {
                let root = Self::derive_root(group_id, artifact_id, file_path)?;
                tracing::info!("Resolved repository root: {}", root);
                root
            }
        };
        let root = self.root.insert(root).as_str();

        if !file_path.starts_with(root) {
            return Err(DepsError::MixedRepositoryRoot {
                root: root.to_string(),
                path: file_path.to_string(),
            });
        }

        // plain prefix strip, not path-boundary aware
        Ok(file_path[root.len()..].to_string())
    }

    /// Everything in `file_path` before the artifact's layout fragment
    pub fn derive_root(group_id: &str, artifact_id: &str, file_path: &str) -> Result<String> {
        let fragment = layout_fragment(group_id, artifact_id);
        match file_path.find(&fragment) {
            Some(offset) => Ok(file_path[..offset].to_string()),
            None => Err(DepsError::MissingLayoutFragment {
                fragment,
                path: file_path.to_string(),
            }),
        }
    }
}

/// `<sep>org<sep>foo<sep>bar<sep>` for `org.foo:bar`, using the host separator
pub fn layout_fragment(group_id: &str, artifact_id: &str) -> String {
    let mut fragment = String::with_capacity(group_id.len() + artifact_id.len() + 3);
    fragment.push(MAIN_SEPARATOR);
    for segment in group_id.split('.') {
        fragment.push_str(segment);
        fragment.push(MAIN_SEPARATOR);
    }
    fragment.push_str(artifact_id);
    fragment.push(MAIN_SEPARATOR);
    fragment
}

/// Render host separators as `/` so output compares equal across platforms
pub fn normalize_separators(path: &str) -> String {
    normalize_separators_from(path, MAIN_SEPARATOR)
}

/// Render `separator` as `/`
pub fn normalize_separators_from(path: &str, separator: char) -> String {
    if separator == '/' {
        path.to_string()
    } else {
        path.replace(separator, "/")
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fragment() {
        assert_eq!(layout_fragment("org.foo", "bar"), "/org/foo/bar/");
        assert_eq!(layout_fragment("junit", "junit"), "/junit/junit/");
    }

    #[test]
    fn test_first_artifact_sets_root() {
        let mut resolver = RepoRootResolver::new();
        assert_eq!(resolver.root(), None);

        let relative = resolver
            .relativize("org.foo", "bar", "/home/u/.repo/org/foo/bar/2.0/bar-2.0.jar")
            .unwrap();
        assert_eq!(relative, "/org/foo/bar/2.0/bar-2.0.jar");
        assert_eq!(resolver.root(), Some("/home/u/.repo"));
    }

    #[test]
    fn test_root_is_fixed_after_first_artifact() {
        let mut resolver = RepoRootResolver::new();
        resolver
            .relativize("org.foo", "bar", "/home/u/.repo/org/foo/bar/2.0/bar-2.0.jar")
            .unwrap();

        // later artifacts only need the prefix, not their own layout fragment
        let relative = resolver
            .relativize("com.other", "thing", "/home/u/.repo/somewhere/else.jar")
            .unwrap();
        assert_eq!(relative, "/somewhere/else.jar");
        assert_eq!(resolver.root(), Some("/home/u/.repo"));
    }

    #[test]
    fn test_missing_fragment() {
        let mut resolver = RepoRootResolver::new();
        let err = resolver
            .relativize("org.foo", "bar", "/home/u/.repo/org/foo/baz/2.0/baz-2.0.jar")
            .unwrap_err();
        match err {
            DepsError::MissingLayoutFragment { fragment, path } => {
                assert_eq!(fragment, "/org/foo/bar/");
                assert_eq!(path, "/home/u/.repo/org/foo/baz/2.0/baz-2.0.jar");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(resolver.root(), None);
    }

    #[test]
    fn test_mixed_roots() {
        let mut resolver = RepoRootResolver::new();
        resolver
            .relativize("org.foo", "bar", "/home/u/.repo/org/foo/bar/2.0/bar-2.0.jar")
            .unwrap();
        let err = resolver
            .relativize("org.foo", "qux", "/opt/repo/org/foo/qux/1.0/qux-1.0.jar")
            .unwrap_err();
        assert!(matches!(err, DepsError::MixedRepositoryRoot { ref root, .. } if root == "/home/u/.repo"));
    }

    #[test]
    fn test_prefix_strip_is_not_boundary_aware() {
        let mut resolver = RepoRootResolver::new();
        resolver
            .relativize("org.foo", "bar", "/repo/org/foo/bar/2.0/bar-2.0.jar")
            .unwrap();
        // "/repo2" still starts with "/repo"
        let relative = resolver.relativize("org.foo", "qux", "/repo2/org/foo/qux.jar").unwrap();
        assert_eq!(relative, "2/org/foo/qux.jar");
    }

    #[test]
    fn test_derive_root_is_idempotent() {
        let path = "/home/u/.repo/org/foo/bar/2.0/bar-2.0.jar";
        let first = RepoRootResolver::derive_root("org.foo", "bar", path).unwrap();
        let second = RepoRootResolver::derive_root("org.foo", "bar", path).unwrap();
        assert_eq!(first, second);
        assert_eq!(format!("{}{}", first, "/org/foo/bar/2.0/bar-2.0.jar"), path);
    }

    #[test]
    fn test_root_can_be_empty() {
        let mut resolver = RepoRootResolver::new();
        let relative = resolver
            .relativize("org.foo", "bar", "/org/foo/bar/2.0/bar-2.0.jar")
            .unwrap();
        assert_eq!(resolver.root(), Some(""));
        assert_eq!(relative, "/org/foo/bar/2.0/bar-2.0.jar");
    }

    #[test]
    fn test_normalize_is_noop_on_unix() {
        assert_eq!(normalize_separators("/a/b\\c"), "/a/b\\c");
    }
}
