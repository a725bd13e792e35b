/// Sequential directory walker using `jwalk`.
///
/// Runs with `Parallelism::Serial`: the scan is one ordered traversal on
/// the calling thread. Excluded directories are removed from each
/// directory listing before `jwalk` descends, so nothing beneath them is
/// ever read. File-name exclusions are applied as entries are emitted.
use jwalk::{Parallelism, WalkDir};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Patterns skipped when the caller supplies none: VCS metadata, bytecode
/// caches, editor projects, package-manager dependencies, OS metadata files.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "__pycache__",
    ".idea",
    ".vscode",
    "node_modules",
    ".DS_Store",
    "Thumbs.db",
];

/// Exclusion rules for a walk.
///
/// A directory is pruned when its name equals a pattern. A file is skipped
/// when its name contains any pattern as a substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    patterns: Vec<String>,
}

impl Exclusions {
    /// Empty patterns are dropped; they would match every file name.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_EXCLUDES.iter().copied())
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn excludes_dir(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p == name)
    }

    pub fn excludes_file(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }
}

/// One item produced by the walk.
#[derive(Debug)]
pub enum WalkItem {
    /// A regular file (or a symlink resolving to one) that passed the filters.
    File(PathBuf),
    /// An entry or directory that could not be read. The walk continues.
    Error {
        path: Option<PathBuf>,
        message: String,
    },
}

/// Enumerate every regular file beneath `root`, depth-unbounded.
///
/// Symlinks are not followed into directories; a symlink that resolves to a
/// file is emitted like a regular file. The root itself is never emitted.
/// File-name exclusions are checked before a symlink is resolved, so an
/// excluded dangling link is dropped quietly instead of reported.
pub fn walk_files(root: &Path, exclusions: &Exclusions) -> impl Iterator<Item = WalkItem> {
    let dir_rules = exclusions.clone();
    let file_rules = exclusions.clone();

    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(Parallelism::Serial)
        .process_read_dir(move |_depth, _dir, _state, children| {
            children.retain(|child| match child {
                Ok(entry) if entry.file_type().is_dir() => {
                    let name = entry.file_name().to_string_lossy();
                    let keep = !dir_rules.excludes_dir(&name);
                    if !keep {
                        trace!("Pruned excluded directory {}", entry.path().display());
                    }
                    keep
                }
                _ => true,
            });
        });

    walker.into_iter().filter_map(move |entry_result| {
        let mut entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                return Some(WalkItem::Error {
                    path: err.path().map(Path::to_path_buf),
                    message: err.to_string(),
                })
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            // jwalk yields an unreadable directory as an entry carrying the
            // read_dir error rather than as an `Err` item.
            return entry.read_children_error.take().map(|err| WalkItem::Error {
                path: Some(entry.path()),
                message: err.to_string(),
            });
        }

        if entry.depth == 0 {
            return None;
        }

        let path = entry.path();
        if file_rules.excludes_file(&entry.file_name().to_string_lossy()) {
            trace!("Skipped excluded file {}", path.display());
            return None;
        }

        if file_type.is_symlink() {
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => return None,
                Err(err) => {
                    return Some(WalkItem::Error {
                        path: Some(path),
                        message: err.to_string(),
                    })
                }
            }
        } else if !file_type.is_file() {
            // Sockets, FIFOs, device nodes.
            return None;
        }

        Some(WalkItem::File(path))
    })
}
