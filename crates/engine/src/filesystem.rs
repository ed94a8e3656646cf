use crate::config::WalkOptions;
use crate::error::{EngineError, Result};
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::{Path, PathBuf};

/// Files selected for checking, plus the errors hit while walking.
#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<PathBuf>,
    /// Entries the walker could not read, keyed by the failing path.
    pub errors: Vec<(PathBuf, EngineError)>,
}

/// Collect the files to check.
///
/// Roots that are not directories are taken as they are, even when their
/// extension is not in the list or they do not exist (reading them then
/// reports the error). Directories are walked honouring `.gitignore`,
/// hidden-file skipping, exclude globs and the extension list. Exclude
/// globs are anchored at each directory root in turn.
///
/// # Errors
///
/// Returns [`EngineError::ExcludePattern`] for an invalid exclude glob.
/// Unreadable entries do not fail the walk; they end up in
/// [`Collected::errors`].
pub fn collect_files(options: &WalkOptions) -> Result<Collected> {
    let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) =
        options.roots.iter().cloned().partition(|root| root.is_dir());
    let mut collected = Collected {
        files,
        errors: Vec::new(),
    };

    for root in &dirs {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(!options.hidden)
            .git_ignore(options.git_ignore)
            .git_exclude(options.git_ignore)
            .require_git(false)
            .follow_links(options.follow_links)
            .max_depth(options.max_depth);

        if !options.exclude.is_empty() {
            builder.overrides(exclude_overrides(root, &options.exclude)?);
        }

        for entry in builder.build() {
            match entry {
                Ok(entry)
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && has_extension(entry.path(), &options.extensions) =>
                {
                    collected.files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => {
                    let (path, err) = walk_error(root, err);
                    log::debug!("{err}");
                    collected.errors.push((path, err));
                }
            }
        }
    }

    collected.files.sort();
    collected.files.dedup();
    Ok(collected)
}

/// Strip the path and depth wrappers `ignore` puts around an error, keeping
/// the innermost path seen (or the walk root).
fn walk_error(root: &Path, err: ignore::Error) -> (PathBuf, EngineError) {
    let mut path = root.to_path_buf();
    let mut source = err;
    loop {
        source = match source {
            ignore::Error::WithPath { path: inner, err } => {
                path = inner;
                *err
            }
            ignore::Error::WithDepth { err, .. } => *err,
            other => {
                break (
                    path.clone(),
                    EngineError::Walk {
                        path,
                        source: other,
                    },
                );
            }
        };
    }
}

/// Exclude globs become `!`-prefixed overrides, which the walker treats as
/// ignore rules.
fn exclude_overrides(root: &Path, patterns: &[String]) -> Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    for pattern in patterns {
        builder
            .add(&format!("!{pattern}"))
            .map_err(|source| EngineError::ExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
    }
    builder.build().map_err(|source| EngineError::ExcludePattern {
        pattern: patterns.join(","),
        source,
    })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalkOptionsBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for file in [
            "a.py",
            "b.pyi",
            "notes.txt",
            "pkg/mod.py",
            "pkg/build/gen.py",
            ".hidden/secret.py",
            "ignored/skip.py",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "x = 1\n").unwrap();
        }
        fs::write(root.join(".gitignore"), "ignored/\n").unwrap();
        dir
    }

    fn relative(dir: &TempDir, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_default_walk() {
        let dir = tree();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .build()
            .unwrap();
        let files = collect_files(&options).unwrap().files;
        assert_eq!(
            relative(&dir, &files),
            vec!["a.py", "b.pyi", "pkg/build/gen.py", "pkg/mod.py"]
        );
    }

    #[test]
    fn test_hidden_gitignore_and_exclude() {
        let dir = tree();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .hidden(true)
            .git_ignore(false)
            .exclude(vec!["build".to_owned(), "*.pyi".to_owned()])
            .build()
            .unwrap();
        let files = collect_files(&options).unwrap().files;
        assert_eq!(
            relative(&dir, &files),
            vec![".hidden/secret.py", "a.py", "ignored/skip.py", "pkg/mod.py"]
        );
    }

    #[test]
    fn test_explicit_files_are_always_kept() {
        let dir = tree();
        let notes = dir.path().join("notes.txt");
        let options = WalkOptionsBuilder::default()
            .roots(vec![notes.clone(), notes.clone(), dir.path().join("pkg")])
            .build()
            .unwrap();
        let files = collect_files(&options).unwrap().files;
        assert_eq!(
            relative(&dir, &files),
            vec!["notes.txt", "pkg/build/gen.py", "pkg/mod.py"]
        );
    }

    #[test]
    fn test_anchored_exclude_applies_to_every_root() {
        let dir = tree();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/util.py"), "x = 1\n").unwrap();

        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().join("lib"), dir.path().join("pkg")])
            .exclude(vec!["/build".to_owned()])
            .build()
            .unwrap();
        let files = collect_files(&options).unwrap().files;
        assert_eq!(relative(&dir, &files), vec!["lib/util.py", "pkg/mod.py"]);
    }

    #[test]
    fn test_max_depth_limits_walk() {
        let dir = tree();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .max_depth(Some(1))
            .build()
            .unwrap();
        let files = collect_files(&options).unwrap().files;
        assert_eq!(relative(&dir, &files), vec!["a.py", "b.pyi"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_are_reported() {
        let dir = tree();
        let dangling = dir.path().join("dangling.py");
        std::os::unix::fs::symlink(dir.path().join("missing.py"), &dangling).unwrap();

        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .follow_links(true)
            .build()
            .unwrap();
        let collected = collect_files(&options).unwrap();

        assert_eq!(
            relative(&dir, &collected.files),
            vec!["a.py", "b.pyi", "pkg/build/gen.py", "pkg/mod.py"]
        );
        assert_eq!(collected.errors.len(), 1);
        let (path, err) = &collected.errors[0];
        assert_eq!(path, &dangling);
        assert!(matches!(err, EngineError::Walk { .. }));
        assert_eq!(err.code(), "E902");
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let dir = tree();
        let options = WalkOptionsBuilder::default()
            .roots(vec![dir.path().to_path_buf()])
            .exclude(vec!["{unclosed".to_owned()])
            .build()
            .unwrap();
        assert!(matches!(
            collect_files(&options),
            Err(EngineError::ExcludePattern { .. })
        ));
    }
}
