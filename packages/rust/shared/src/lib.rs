//! Shared types, error model, and configuration for javadocset.
//!
//! This crate is the foundation depended on by all other javadocset crates.
//! It provides:
//! - The unified error type, [`JavadocsetError`]
//! - Domain types ([`SymbolKind`], [`SymbolEntry`], [`DocsetLayout`])
//! - Configuration ([`AppConfig`], [`PlistOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, PlistOptions, config_dir, config_file_path, expand_home,
    init_config, load_config, load_config_from,
};
pub use error::{JavadocsetError, Result};
pub use types::{
    DOCSET_EXTENSION, DocsetLayout, INDEX_DB_FILE_NAME, INFO_PLIST_FILE_NAME, SymbolEntry,
    SymbolKind, UnknownSymbolKind,
};
