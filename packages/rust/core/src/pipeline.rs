//! End-to-end `build` pipeline: Javadoc tree → docset bundle.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, trace};

use javadocset_index::{locate_index_pages, read_listings};
use javadocset_shared::{DocsetLayout, JavadocsetError, PlistOptions, Result};
use javadocset_storage::Storage;

use crate::copier::{CopyStats, copy_tree};
use crate::plist::write_info_plist;
use crate::validate::validate_paths;

/// Configuration for the `build_docset` pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root of the generated Javadoc tree.
    pub javadoc_path: PathBuf,
    /// Directory the `<name>.docset` bundle is created in.
    pub output_root: PathBuf,
    /// Docset name (bundle directory stem and plist identifier).
    pub name: String,
    /// Replace an existing bundle instead of failing.
    pub overwrite: bool,
    /// `Info.plist` options.
    pub plist: PlistOptions,
}

/// Result of the `build_docset` pipeline.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Path to the `.docset` bundle.
    pub docset_path: PathBuf,
    /// Listings found across all index pages.
    pub listings: usize,
    /// Listings classified and stored.
    pub entries: usize,
    /// Listings that matched no pattern.
    pub skipped: usize,
    /// Tree copy totals.
    pub copy: CopyStats,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each listing of an index page is processed.
    fn listing_processed(&self, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn listing_processed(&self, _current: usize, _total: usize) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Run the full `build` pipeline.
///
/// 1. Validate paths (no writes on failure)
/// 2. Create the bundle layout
/// 3. Copy the Javadoc tree into `Documents`
/// 4. Write `Info.plist`
/// 5. Open the lookup store
/// 6. Parse index page(s), classify, insert
///
/// The first failure is returned unchanged. Anything written before it stays
/// on disk.
#[instrument(skip_all, fields(javadoc = %config.javadoc_path.display(), name = %config.name))]
pub async fn build_docset(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    let start = Instant::now();

    // --- Phase 1: Validation ---
    progress.phase("Validating paths");
    let layout = validate_paths(
        &config.javadoc_path,
        &config.output_root,
        &config.name,
        config.overwrite,
    )?;

    info!(docset = %layout.root().display(), "starting build pipeline");

    // --- Phase 2: Layout ---
    progress.phase("Creating docset layout");
    if config.overwrite {
        remove_existing(&layout)?;
    }
    let documents_dir = layout.documents_dir();
    std::fs::create_dir_all(&documents_dir)
        .map_err(|e| JavadocsetError::io(&documents_dir, e))?;

    // --- Phase 3: Copy ---
    progress.phase("Copying documentation");
    let copy = copy_tree(&config.javadoc_path, &documents_dir)?;

    // --- Phase 4: Metadata ---
    progress.phase("Writing Info.plist");
    write_info_plist(&layout.info_plist_path(), &config.name, &config.plist)?;

    // --- Phase 5: Lookup store ---
    progress.phase("Opening search index");
    let storage = Storage::open(&layout.index_db_path()).await?;

    // --- Phase 6: Index ---
    progress.phase("Indexing symbols");
    let pages = locate_index_pages(&config.javadoc_path)?;

    let mut listings = 0;
    let mut entries = 0;
    for page in &pages {
        let page_listings = read_listings(page)?;
        let total = page_listings.len();

        for (i, listing) in page_listings.into_iter().enumerate() {
            listings += 1;
            let text = listing.text.clone();
            match listing.into_entry() {
                Some(entry) => {
                    storage.insert_entry(&entry).await?;
                    entries += 1;
                }
                None => trace!(text = %text.trim(), "listing matched no pattern"),
            }
            progress.listing_processed(i + 1, total);
        }

        debug!(page = %page.path.display(), listings = total, "index page processed");
    }

    let report = BuildReport {
        docset_path: layout.root().to_path_buf(),
        listings,
        entries,
        skipped: listings - entries,
        copy,
        elapsed: start.elapsed(),
    };

    progress.done(&report);

    info!(
        docset = %report.docset_path.display(),
        entries = report.entries,
        skipped = report.skipped,
        files = report.copy.files,
        elapsed_ms = report.elapsed.as_millis(),
        "build pipeline complete"
    );

    Ok(report)
}

/// Remove a pre-existing bundle directory (overwrite mode only).
fn remove_existing(layout: &DocsetLayout) -> Result<()> {
    let root = layout.root();
    let metadata = match std::fs::symlink_metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(JavadocsetError::io(root, e)),
    };

    info!(path = %root.display(), "removing existing docset");
    if metadata.is_dir() {
        std::fs::remove_dir_all(root).map_err(|e| JavadocsetError::io(root, e))
    } else {
        std::fs::remove_file(root).map_err(|e| JavadocsetError::io(root, e))
    }
}
