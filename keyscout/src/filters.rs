/// This module implements smart-search filtering: deciding from a path alone
/// whether a file is worth scanning.
///
/// Two independent rules apply, and a file is scanned only when neither fires:
///
/// 1. **Directory rule** - the path mentions a directory that almost never
///    holds hand-written text (VCS metadata, build output, dependency caches,
///    IDE state).
///
/// 2. **Extension rule** - the file extension belongs to a well known binary,
///    media, or archive format.
///
/// # Substring vs component matching
///
/// By default the directory rule is a plain substring test on the path string.
/// That is deliberately loose: `src/my.gitstuff/notes.txt` is skipped because it
/// contains `.git`, and `cabinet.txt` is skipped because it contains `bin`.
/// Passing `strict = true` to [`should_skip_with`] compares against whole
/// directory components instead, so only a real `.git/` or `bin/` directory
/// causes a skip.
///
/// ```rust,ignore
/// assert!(should_skip(Path::new("web/node_modules/react/index.js")));
/// assert!(!should_skip_with(Path::new("cabinet.txt"), true));
/// ```
///
/// Both rules are pure functions of the path; nothing here touches the
/// filesystem.
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::{Component, Path};

/// Directory names that smart search never descends into
pub const IGNORED_DIRECTORIES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "bin",
    "obj",
    "target",
    "__pycache__",
    "node_modules",
    ".vs",
    ".vscode",
    ".idea",
];

/// Extensions of binary, media and archive formats, stored lowercase
static BINARY_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "exe", "dll", "so", "bin", "img", "iso", "png", "jpg", "jpeg", "gif", "bmp", "tiff", "ico",
        "pdf", "zip", "tar", "gz", "7z", "rar", "mp3", "wav", "flac", "mp4", "mkv", "avi", "mov",
    ]
    .into_iter()
    .collect()
});

/// Returns true if the path mentions a denylisted directory name anywhere in its string form
pub fn is_in_ignored_directory(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    IGNORED_DIRECTORIES
        .iter()
        .any(|dir| path_str.contains(dir))
}

/// Returns true if one of the path's directory components equals a denylisted name
pub fn has_ignored_component(path: &Path) -> bool {
    let parent = match path.parent() {
        Some(parent) => parent,
        None => return false,
    };

    parent.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| IGNORED_DIRECTORIES.contains(&name)),
        _ => false,
    })
}

/// Returns true if the extension marks a binary, media or archive file
pub fn is_likely_binary(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(ext.to_ascii_lowercase().as_str()))
}

/// Smart-search decision using the default substring directory rule
pub fn should_skip(path: &Path) -> bool {
    should_skip_with(path, false)
}

/// Smart-search decision; `strict` selects component matching for the directory rule
pub fn should_skip_with(path: &Path, strict: bool) -> bool {
    let in_ignored_dir = if strict {
        has_ignored_component(path)
    } else {
        is_in_ignored_directory(path)
    };

    in_ignored_dir || is_likely_binary(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_ignored_directory() {
        assert!(is_in_ignored_directory(Path::new(
            "web/node_modules/react/index.js"
        )));
        assert!(is_in_ignored_directory(Path::new(".git/config")));
        assert!(is_in_ignored_directory(Path::new("app/obj/Debug/out.txt")));
        assert!(is_in_ignored_directory(Path::new("pkg/__pycache__/mod.txt")));
        assert!(!is_in_ignored_directory(Path::new("src/main.rs")));
        assert!(!is_in_ignored_directory(Path::new("docs/readme.md")));
    }

    #[test]
    fn test_substring_matching_over_approximates() {
        // Loose matching: these have no real denylisted directory
        assert!(is_in_ignored_directory(Path::new("src/my.gitstuff/a.txt")));
        assert!(is_in_ignored_directory(Path::new("cabinet.txt")));

        assert!(!has_ignored_component(Path::new("src/my.gitstuff/a.txt")));
        assert!(!has_ignored_component(Path::new("cabinet.txt")));
    }

    #[test]
    fn test_has_ignored_component() {
        assert!(has_ignored_component(Path::new("a/node_modules/b/c.js")));
        assert!(has_ignored_component(Path::new(".idea/workspace.xml")));
        assert!(has_ignored_component(Path::new("/abs/target/debug/x.d")));
        // The file name itself is not a directory
        assert!(!has_ignored_component(Path::new("src/bin")));
        assert!(!has_ignored_component(Path::new("notes.txt")));
    }

    #[test]
    fn test_is_likely_binary() {
        assert!(is_likely_binary(Path::new("test.exe")));
        assert!(is_likely_binary(Path::new("test.dll")));
        assert!(is_likely_binary(Path::new("test.png")));
        assert!(is_likely_binary(Path::new("photo.JPG"))); // Test case insensitivity
        assert!(is_likely_binary(Path::new("backup.tar.gz")));
        assert!(!is_likely_binary(Path::new("test.rs")));
        assert!(!is_likely_binary(Path::new("test.txt")));
        assert!(!is_likely_binary(Path::new("test")));
    }

    #[test]
    fn test_should_skip() {
        assert!(should_skip(Path::new("project/node_modules/lib.js")));
        assert!(should_skip(Path::new("assets/logo.png")));
        assert!(!should_skip(Path::new("src/lib.rs")));

        assert!(should_skip_with(Path::new("project/node_modules/lib.js"), true));
        assert!(should_skip_with(Path::new("assets/logo.png"), true));
        assert!(!should_skip_with(Path::new("my.gitstuff/notes.txt"), true));
    }
}
