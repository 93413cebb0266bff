//! Javadoc index page parsing.
//!
//! Javadoc writes every documented symbol into a master index page
//! (`index-all.html`, or `index-files/index-N.html` when run with
//! `-splitindex`). Each symbol is a `<dt>` inside a `<dl>`: a hyperlink to the
//! symbol's page followed by descriptive text such as `- Class in com.example`.
//! This crate finds those pages, extracts one [`Listing`] per `<dt>`, and
//! classifies listings into [`SymbolKind`]s.

mod classify;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use javadocset_shared::{JavadocsetError, Result, SymbolEntry, SymbolKind};

pub use classify::{PATTERNS, classify};

/// Single-page index file name.
pub const INDEX_ALL_FILE_NAME: &str = "index-all.html";

/// Directory holding split index pages.
pub const SPLIT_INDEX_DIR: &str = "index-files";

static LISTING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl dt").expect("valid selector"));

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One `<dt>` listing from an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Immediate text of the `<dt>` (classification signal).
    pub text: String,
    /// Full text of the first hyperlink.
    pub name: String,
    /// Hyperlink target, relative to the documentation root.
    pub location: String,
}

impl Listing {
    /// Classify this listing. Returns `None` for listings that are not indexed.
    pub fn classify(&self) -> Option<SymbolKind> {
        classify(&self.text)
    }

    /// Convert into a [`SymbolEntry`] if the listing classifies.
    pub fn into_entry(self) -> Option<SymbolEntry> {
        let kind = self.classify()?;
        Some(SymbolEntry {
            name: self.name,
            kind,
            location: self.location,
        })
    }
}

/// An index page on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    /// Absolute path of the HTML file.
    pub path: PathBuf,
    /// Directory of the page relative to the documentation root, with a
    /// trailing `/` (empty for root-level pages).
    pub relative_dir: String,
}

// ---------------------------------------------------------------------------
// Page discovery
// ---------------------------------------------------------------------------

/// Find the index page(s) under a Javadoc root.
///
/// Prefers `index-all.html`; otherwise returns every
/// `index-files/index-N.html` in ascending `N` order.
pub fn locate_index_pages(javadoc_root: &Path) -> Result<Vec<IndexPage>> {
    let single = javadoc_root.join(INDEX_ALL_FILE_NAME);
    if single.is_file() {
        return Ok(vec![IndexPage {
            path: single,
            relative_dir: String::new(),
        }]);
    }

    let split_dir = javadoc_root.join(SPLIT_INDEX_DIR);
    if !split_dir.is_dir() {
        return Err(JavadocsetError::malformed(format!(
            "no {INDEX_ALL_FILE_NAME} or {SPLIT_INDEX_DIR}/ found in {}",
            javadoc_root.display()
        )));
    }

    let entries = std::fs::read_dir(&split_dir).map_err(|e| JavadocsetError::io(&split_dir, e))?;

    let mut numbered = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| JavadocsetError::io(&split_dir, e))?;
        let path = entry.path();
        if let Some(n) = split_page_number(&path) {
            numbered.push((n, path));
        }
    }

    if numbered.is_empty() {
        return Err(JavadocsetError::malformed(format!(
            "{} contains no index-N.html pages",
            split_dir.display()
        )));
    }

    numbered.sort_by_key(|(n, _)| *n);
    debug!(pages = numbered.len(), "using split index");

    Ok(numbered
        .into_iter()
        .map(|(_, path)| IndexPage {
            path,
            relative_dir: format!("{SPLIT_INDEX_DIR}/"),
        })
        .collect())
}

/// `index-12.html` → `Some(12)`.
fn split_page_number(path: &Path) -> Option<u32> {
    if path.extension()? != "html" {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix("index-")?
        .parse()
        .ok()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read and parse one index page, resolving hyperlinks against its directory.
#[instrument(skip_all, fields(page = %page.path.display()))]
pub fn read_listings(page: &IndexPage) -> Result<Vec<Listing>> {
    let html =
        std::fs::read_to_string(&page.path).map_err(|e| JavadocsetError::io(&page.path, e))?;

    let mut listings = parse_listings(&html)?;
    if !page.relative_dir.is_empty() {
        for listing in &mut listings {
            listing.location = resolve_location(&page.relative_dir, &listing.location);
        }
    }

    debug!(listings = listings.len(), "parsed index page");
    Ok(listings)
}

/// Extract every `dl dt` listing from an index document.
///
/// A listing without a hyperlink means the page does not follow the Javadoc
/// index layout and fails the whole parse.
pub fn parse_listings(html: &str) -> Result<Vec<Listing>> {
    let doc = Html::parse_document(html);

    doc.select(&LISTING_SELECTOR)
        .map(|dt| -> Result<Listing> {
            let anchor = dt.select(&ANCHOR_SELECTOR).next().ok_or_else(|| {
                JavadocsetError::malformed(format!(
                    "index listing has no hyperlink: {:?}",
                    deep_text(dt).trim()
                ))
            })?;

            Ok(Listing {
                text: shallow_text(dt),
                name: deep_text(anchor),
                location: anchor.value().attr("href").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Concatenated text of the element's own text children, ignoring nested elements.
pub fn shallow_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect()
}

/// Concatenated text of every descendant text node, in document order.
pub fn deep_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Resolve `href` found in a page under `relative_dir` to a path relative to
/// the documentation root.
///
/// Resolution is lexical: `.` and `..` segments are folded and the text is
/// otherwise kept as written, including any query or fragment. Absolute URLs,
/// root-absolute paths, and hrefs that climb above the documentation root are
/// returned unchanged.
pub fn resolve_location(relative_dir: &str, href: &str) -> String {
    if relative_dir.is_empty() || href.starts_with('/') || Url::parse(href).is_ok() {
        return href.to_string();
    }

    let (path, suffix) = href.split_at(href.find(['?', '#']).unwrap_or(href.len()));

    let mut segments: Vec<&str> = relative_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return href.to_string();
                }
            }
            other => segments.push(other),
        }
    }

    let mut location = segments.join("/");
    let names_directory = matches!(path.rsplit('/').next(), Some("" | "." | ".."));
    if names_directory && !location.is_empty() {
        location.push('/');
    }
    location.push_str(suffix);
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "javadocset-index-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_single_listing() {
        let html = r#"<html><body><dl>
            <dt>Foo Class in pkg <a href="pkg/Foo.html">Foo</a></dt>
        </dl></body></html>"#;

        let listings = parse_listings(html).expect("parse");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "Foo");
        assert_eq!(listings[0].location, "pkg/Foo.html");
        assert!(listings[0].text.contains("Class in"));

        let entry = listings[0].clone().into_entry().expect("classified");
        assert_eq!(entry.kind, SymbolKind::Class);
    }

    #[test]
    fn shallow_text_skips_nested_elements() {
        let html = r#"<dl><dt><a href="a/B.html#m()"><span>m()</span></a> - Method in class <a href="a/B.html">B</a></dt></dl>"#;
        let listings = parse_listings(html).unwrap();
        assert_eq!(listings[0].text, " - Method in class ");
        assert_eq!(listings[0].classify(), Some(SymbolKind::Method));
    }

    #[test]
    fn deep_text_concatenates_in_document_order() {
        let html = r#"<dl><dt><a href="x.html"><b>get</b><i>Value</i>(<code>int</code>)</a> - Method in class X</dt></dl>"#;
        let listings = parse_listings(html).unwrap();
        assert_eq!(listings[0].name, "getValue(int)");
        assert_eq!(listings[0].location, "x.html");
    }

    #[test]
    fn first_anchor_is_used() {
        let html = r#"<dl><dt><a href="first.html">First</a> - Class in <a href="second/package-summary.html">second</a></dt></dl>"#;
        let listings = parse_listings(html).unwrap();
        assert_eq!(listings[0].name, "First");
        assert_eq!(listings[0].location, "first.html");
    }

    #[test]
    fn listing_without_anchor_is_malformed() {
        let html = "<dl><dt>Orphan - Class in nowhere</dt></dl>";
        let err = parse_listings(html).unwrap_err();
        assert!(matches!(err, JavadocsetError::MalformedIndex { .. }));
    }

    #[test]
    fn empty_names_are_kept() {
        let html = r#"<dl><dt><a href="e.html"></a> - Class in e</dt></dl>"#;
        let listings = parse_listings(html).unwrap();
        assert_eq!(listings[0].name, "");
        assert!(listings[0].clone().into_entry().is_some());
    }

    #[test]
    fn missing_href_gives_empty_location() {
        let html = r#"<dl><dt><a name="anchor">Thing</a> - Class in t</dt></dl>"#;
        let listings = parse_listings(html).unwrap();
        assert_eq!(listings[0].location, "");
    }

    #[test]
    fn unclassified_listing_has_no_entry() {
        let html = r#"<dl><dt><a href="see.html">Other</a> See Also</dt></dl>"#;
        let listings = parse_listings(html).unwrap();
        assert_eq!(listings.len(), 1);
        assert!(listings[0].clone().into_entry().is_none());
    }

    #[test]
    fn dt_outside_dl_is_ignored() {
        let html = r#"<div><dt><a href="a.html">A</a> - Class in a</dt></div>"#;
        assert!(parse_listings(html).unwrap().is_empty());
    }

    #[test]
    fn resolves_split_index_links() {
        assert_eq!(
            resolve_location("index-files/", "../pkg/Foo.html"),
            "pkg/Foo.html"
        );
        assert_eq!(
            resolve_location("index-files/", "../pkg/Foo.html#bar()"),
            "pkg/Foo.html#bar()"
        );
        assert_eq!(
            resolve_location("index-files/", "../pkg/Foo.html#bar(java.lang.String, int)"),
            "pkg/Foo.html#bar(java.lang.String, int)"
        );
        assert_eq!(
            resolve_location("index-files/", "../pkg/Ünï.html"),
            "pkg/Ünï.html"
        );
        assert_eq!(
            resolve_location("index-files/", "../pkg/./Foo.html?x=a b#m(java.util.List<T>)"),
            "pkg/Foo.html?x=a b#m(java.util.List<T>)"
        );
        assert_eq!(
            resolve_location("index-files/", "#m(java.util.List<T>)"),
            "index-files/#m(java.util.List<T>)"
        );
        assert_eq!(resolve_location("index-files/", "../pkg/"), "pkg/");
        assert_eq!(resolve_location("index-files/", "index-2.html"), "index-files/index-2.html");
        assert_eq!(resolve_location("", "../odd.html"), "../odd.html");
        assert_eq!(
            resolve_location("index-files/", "https://docs.oracle.com/x.html"),
            "https://docs.oracle.com/x.html"
        );
    }

    #[test]
    fn links_above_document_root_are_kept_verbatim() {
        assert_eq!(
            resolve_location("index-files/", "../../x.html"),
            "../../x.html"
        );
        assert_eq!(
            resolve_location("index-files/", "../a/../../x.html#f"),
            "../a/../../x.html#f"
        );
        assert_eq!(resolve_location("index-files/", "/abs/x.html"), "/abs/x.html");
    }

    #[test]
    fn prefers_index_all() {
        let root = temp_dir();
        std::fs::write(root.join(INDEX_ALL_FILE_NAME), "<dl></dl>").unwrap();
        std::fs::create_dir_all(root.join(SPLIT_INDEX_DIR)).unwrap();
        std::fs::write(root.join(SPLIT_INDEX_DIR).join("index-1.html"), "<dl></dl>").unwrap();

        let pages = locate_index_pages(&root).expect("locate");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].relative_dir.is_empty());
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn split_pages_sorted_numerically() {
        let root = temp_dir();
        let split = root.join(SPLIT_INDEX_DIR);
        std::fs::create_dir_all(&split).unwrap();
        for n in [10, 2, 1] {
            std::fs::write(split.join(format!("index-{n}.html")), "<dl></dl>").unwrap();
        }
        std::fs::write(split.join("notes.txt"), "ignored").unwrap();

        let pages = locate_index_pages(&root).expect("locate");
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["index-1.html", "index-2.html", "index-10.html"]);
        assert_eq!(pages[0].relative_dir, "index-files/");
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn missing_index_is_malformed() {
        let root = temp_dir();
        let err = locate_index_pages(&root).unwrap_err();
        assert!(matches!(err, JavadocsetError::MalformedIndex { .. }));
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn read_listings_resolves_split_links() {
        let root = temp_dir();
        let split = root.join(SPLIT_INDEX_DIR);
        std::fs::create_dir_all(&split).unwrap();
        std::fs::write(
            split.join("index-1.html"),
            r#"<dl><dt><a href="../pkg/Foo.html">Foo</a> - Class in pkg</dt></dl>"#,
        )
        .unwrap();

        let pages = locate_index_pages(&root).unwrap();
        let listings = read_listings(&pages[0]).expect("read");
        assert_eq!(listings[0].location, "pkg/Foo.html");
        std::fs::remove_dir_all(&root).ok();
    }
}
