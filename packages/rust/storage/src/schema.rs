//! SQL schema for the docset lookup store.
//!
//! Dash and Zeal read a single `searchIndex` table. There is no uniqueness
//! constraint: overloaded methods legitimately produce repeated names.

/// Creates the `searchIndex` table if it is absent.
pub(crate) const CREATE_SEARCH_INDEX: &str = r#"
CREATE TABLE IF NOT EXISTS searchIndex (
    id   INTEGER PRIMARY KEY,
    name TEXT,
    type TEXT,
    path TEXT
);
"#;

/// Inserts one entry; `id` is assigned by SQLite.
pub(crate) const INSERT_ENTRY: &str =
    "INSERT INTO searchIndex (name, type, path) VALUES (?1, ?2, ?3)";
