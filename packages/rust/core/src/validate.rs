//! Precondition checks run before a build touches the filesystem.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use javadocset_shared::{DocsetLayout, JavadocsetError, Result};

/// Check that a build can start.
///
/// - `javadoc_path` must be an existing directory (`InputNotFound`).
/// - `name` must be a single, plain path component so the bundle stays inside
///   `output_root`.
/// - The bundle directory must not exist unless `overwrite` is set
///   (`OutputConflict`).
/// - The bundle must not land inside the Javadoc tree it copies
///   (`OutputConflict`).
///
/// Performs no writes.
pub fn validate_paths(
    javadoc_path: &Path,
    output_root: &Path,
    name: &str,
    overwrite: bool,
) -> Result<DocsetLayout> {
    if !exists(javadoc_path)? || !javadoc_path.is_dir() {
        return Err(JavadocsetError::input_not_found(javadoc_path));
    }

    validate_name(name)?;
    let layout = DocsetLayout::new(output_root, name);

    if exists(layout.root())? && !overwrite {
        return Err(JavadocsetError::output_conflict(layout.root()));
    }

    let source = canonicalize(javadoc_path)?;
    let target = resolve_partial(output_root)?.join(layout.root().file_name().unwrap_or_default());
    if target.starts_with(&source) {
        return Err(JavadocsetError::output_conflict(layout.root()));
    }

    debug!(
        javadoc = %javadoc_path.display(),
        docset = %layout.root().display(),
        "paths validated"
    );
    Ok(layout)
}

/// A docset name is used verbatim as a directory name.
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(JavadocsetError::config(format!(
            "invalid docset name {name:?}: must be a single path component"
        ))),
    }
}

fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| JavadocsetError::io(path, e))
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| JavadocsetError::io(path, e))
}

/// Canonicalize the nearest existing ancestor of `path` and re-append the
/// components that do not exist yet.
fn resolve_partial(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| JavadocsetError::io(path, e))?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !exists(existing)? {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = canonicalize(existing)?;
    resolved.extend(missing.into_iter().rev());
    Ok(resolved)
}
