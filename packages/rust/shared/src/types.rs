//! Core domain types for javadocset bundles.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Directory suffix of every docset bundle.
pub const DOCSET_EXTENSION: &str = "docset";

/// Lookup store file name inside `Contents/Resources`.
pub const INDEX_DB_FILE_NAME: &str = "docSet.dsidx";

/// Metadata descriptor file name inside `Contents`.
pub const INFO_PLIST_FILE_NAME: &str = "Info.plist";

// ---------------------------------------------------------------------------
// SymbolKind
// ---------------------------------------------------------------------------

/// The kind of a Java symbol listed in the Javadoc index.
///
/// Serialized as the capitalized English word, which is also the value of
/// the `type` column in the lookup store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    Exception,
    Error,
    Annotation,
    Constructor,
    Method,
    Field,
    Package,
}

impl SymbolKind {
    /// Every kind, in declaration order.
    pub const ALL: [SymbolKind; 10] = [
        SymbolKind::Class,
        SymbolKind::Interface,
        SymbolKind::Enum,
        SymbolKind::Exception,
        SymbolKind::Error,
        SymbolKind::Annotation,
        SymbolKind::Constructor,
        SymbolKind::Method,
        SymbolKind::Field,
        SymbolKind::Package,
    ];

    /// The stored spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Enum => "Enum",
            Self::Exception => "Exception",
            Self::Error => "Error",
            Self::Annotation => "Annotation",
            Self::Constructor => "Constructor",
            Self::Method => "Method",
            Self::Field => "Field",
            Self::Package => "Package",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string is not a known [`SymbolKind`] spelling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol kind: {0:?}")]
pub struct UnknownSymbolKind(pub String);

impl FromStr for SymbolKind {
    type Err = UnknownSymbolKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSymbolKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SymbolEntry
// ---------------------------------------------------------------------------

/// One classified symbol, as stored in the `searchIndex` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Display text of the symbol's hyperlink.
    pub name: String,
    /// Classified kind.
    pub kind: SymbolKind,
    /// Hyperlink target, relative to the docset's `Documents` root.
    pub location: String,
}

// ---------------------------------------------------------------------------
// DocsetLayout
// ---------------------------------------------------------------------------

/// Fixed on-disk layout of a docset bundle.
///
/// ```text
/// <root>/<name>.docset/
/// └── Contents/
///     ├── Info.plist
///     └── Resources/
///         ├── docSet.dsidx
///         └── Documents/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsetLayout {
    root: PathBuf,
}

impl DocsetLayout {
    /// Layout for the bundle `name` placed under `output_root`.
    pub fn new(output_root: &Path, name: &str) -> Self {
        Self {
            root: output_root.join(format!("{name}.{DOCSET_EXTENSION}")),
        }
    }

    /// Layout for an existing bundle directory.
    pub fn at(docset_path: impl Into<PathBuf>) -> Self {
        Self {
            root: docset_path.into(),
        }
    }

    /// `<name>.docset`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Contents`
    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("Contents")
    }

    /// `Contents/Resources`
    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    /// `Contents/Resources/Documents`
    pub fn documents_dir(&self) -> PathBuf {
        self.resources_dir().join("Documents")
    }

    /// `Contents/Info.plist`
    pub fn info_plist_path(&self) -> PathBuf {
        self.contents_dir().join(INFO_PLIST_FILE_NAME)
    }

    /// `Contents/Resources/docSet.dsidx`
    pub fn index_db_path(&self) -> PathBuf {
        self.resources_dir().join(INDEX_DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_kind_roundtrip() {
        for kind in SymbolKind::ALL {
            let parsed: SymbolKind = kind.as_str().parse().expect("parse kind");
            assert_eq!(parsed, kind);
        }
        assert!("Notation".parse::<SymbolKind>().is_err());
    }

    #[test]
    fn symbol_kind_serializes_as_word() {
        let json = serde_json::to_string(&SymbolKind::Constructor).expect("serialize");
        assert_eq!(json, "\"Constructor\"");
    }

    #[test]
    fn layout_paths() {
        let layout = DocsetLayout::new(Path::new("/out"), "MyDocs");
        assert_eq!(layout.root(), Path::new("/out/MyDocs.docset"));
        assert_eq!(
            layout.info_plist_path(),
            Path::new("/out/MyDocs.docset/Contents/Info.plist")
        );
        assert_eq!(
            layout.index_db_path(),
            Path::new("/out/MyDocs.docset/Contents/Resources/docSet.dsidx")
        );
        assert_eq!(
            layout.documents_dir(),
            Path::new("/out/MyDocs.docset/Contents/Resources/Documents")
        );
    }
}
