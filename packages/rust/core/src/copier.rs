//! Recursive documentation tree copy.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use javadocset_shared::{JavadocsetError, Result};

/// Totals from a [`copy_tree`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files written.
    pub files: usize,
    /// Directories created or reused (including the root).
    pub directories: usize,
    /// Bytes written.
    pub bytes: u64,
}

/// Mirror every file and directory under `src` into `dest`.
///
/// Relative paths and permission bits are preserved. Directories that already
/// exist at the destination are reused; existing files are overwritten.
/// Symbolic links are not followed during the walk; a link to a file is
/// copied as that file's contents. The first failure aborts the copy.
#[instrument(skip_all, fields(src = %src.display(), dest = %dest.display()))]
pub fn copy_tree(src: &Path, dest: &Path) -> Result<CopyStats> {
    let mut stats = CopyStats::default();

    // Applied after the walk so read-only directories can still be filled.
    let mut dir_permissions: Vec<(PathBuf, std::fs::Permissions)> = Vec::new();

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        if entry.file_type().is_dir() {
            create_dir(&target)?;
            let metadata = entry.metadata().map_err(walk_error)?;
            dir_permissions.push((target, metadata.permissions()));
            stats.directories += 1;
        } else {
            let bytes = std::fs::copy(entry.path(), &target)
                .map_err(|e| JavadocsetError::io(entry.path(), e))?;
            debug!(file = %relative.display(), bytes, "copied");
            stats.files += 1;
            stats.bytes += bytes;
        }
    }

    for (dir, permissions) in dir_permissions.into_iter().rev() {
        std::fs::set_permissions(&dir, permissions).map_err(|e| JavadocsetError::io(&dir, e))?;
    }

    info!(
        files = stats.files,
        directories = stats.directories,
        bytes = stats.bytes,
        "documentation tree copied"
    );
    Ok(stats)
}

fn create_dir(path: &Path) -> Result<()> {
    match std::fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(JavadocsetError::io(path, e)),
    }
}

fn walk_error(err: walkdir::Error) -> JavadocsetError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
    JavadocsetError::io(path, source)
}
