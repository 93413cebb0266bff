//! libSQL storage layer for the docset lookup store (`docSet.dsidx`).
//!
//! The [`Storage`] struct wraps a local libSQL database holding the
//! `searchIndex` table that documentation browsers query.
//!
//! **Access rules:**
//! - Build pipeline: read-write (sole writer) via [`Storage::open`]
//! - `inspect` command: read-only via [`Storage::open_readonly`]

mod schema;

use std::path::Path;

use javadocset_shared::{JavadocsetError, Result, SymbolEntry, SymbolKind};
use libsql::{Connection, Database, Row, params};

/// Primary storage handle wrapping a libSQL database.
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
    readonly: bool,
}

impl Storage {
    /// Open or create a lookup store at `path` in read-write mode and ensure
    /// the `searchIndex` table exists.
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| JavadocsetError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        let storage = Self {
            db,
            conn,
            readonly: false,
        };
        storage.create_schema().await?;
        Ok(storage)
    }

    /// Open an existing lookup store at `path` in read-only mode.
    pub async fn open_readonly(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(JavadocsetError::Storage(format!(
                "lookup store not found: {}",
                path.display()
            )));
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        Ok(Self {
            db,
            conn,
            readonly: true,
        })
    }

    async fn create_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(schema::CREATE_SEARCH_INDEX)
            .await
            .map_err(|e| JavadocsetError::Storage(format!("schema creation failed: {e}")))?;
        tracing::debug!("searchIndex table ready");
        Ok(())
    }

    /// Ensure we're in read-write mode before writing.
    fn check_writable(&self) -> Result<()> {
        if self.readonly {
            return Err(JavadocsetError::Storage(
                "database is opened in read-only mode".into(),
            ));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert one entry in its own transaction.
    ///
    /// The transaction is committed before returning. A failed insert rolls
    /// it back, so the store only ever holds whole rows and the connection
    /// stays usable for the next entry.
    pub async fn insert_entry(&self, entry: &SymbolEntry) -> Result<()> {
        self.check_writable()?;

        let tx = self
            .conn
            .transaction()
            .await
            .map_err(|e| JavadocsetError::Storage(format!("begin transaction: {e}")))?;

        let inserted = tx
            .execute(
                schema::INSERT_ENTRY,
                params![
                    entry.name.as_str(),
                    entry.kind.as_str(),
                    entry.location.as_str()
                ],
            )
            .await;
        if let Err(e) = inserted {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback after failed insert");
            }
            return Err(JavadocsetError::Storage(format!(
                "insert {:?}: {e}",
                entry.name
            )));
        }

        tx.commit()
            .await
            .map_err(|e| JavadocsetError::Storage(format!("commit: {e}")))?;

        tracing::trace!(name = %entry.name, kind = %entry.kind, "indexed entry");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Total number of rows in `searchIndex`.
    pub async fn count(&self) -> Result<u64> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM searchIndex", params![])
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        match rows.next().await {
            Ok(Some(row)) => row
                .get::<i64>(0)
                .map(|n| n as u64)
                .map_err(|e| JavadocsetError::Storage(e.to_string())),
            Ok(None) => Ok(0),
            Err(e) => Err(JavadocsetError::Storage(e.to_string())),
        }
    }

    /// Row counts grouped by `type`, ordered by type name.
    pub async fn count_by_kind(&self) -> Result<Vec<(String, u64)>> {
        let mut rows = self
            .conn
            .query(
                "SELECT type, COUNT(*) FROM searchIndex GROUP BY type ORDER BY type",
                params![],
            )
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?
        {
            results.push((
                row.get::<String>(0)
                    .map_err(|e| JavadocsetError::Storage(e.to_string()))?,
                row.get::<i64>(1)
                    .map_err(|e| JavadocsetError::Storage(e.to_string()))? as u64,
            ));
        }
        Ok(results)
    }

    /// All entries in insertion order.
    pub async fn list_entries(&self) -> Result<Vec<SymbolEntry>> {
        let mut rows = self
            .conn
            .query(
                "SELECT name, type, path FROM searchIndex ORDER BY id",
                params![],
            )
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?
        {
            results.push(row_to_entry(&row)?);
        }
        Ok(results)
    }

    /// Entries whose name starts with `prefix`, in insertion order.
    pub async fn search(&self, prefix: &str, limit: u32) -> Result<Vec<SymbolEntry>> {
        let pattern = format!("{}%", escape_like(prefix));
        let mut rows = self
            .conn
            .query(
                "SELECT name, type, path FROM searchIndex
                 WHERE name LIKE ?1 ESCAPE '\\'
                 ORDER BY id
                 LIMIT ?2",
                params![pattern, limit],
            )
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?
        {
            results.push(row_to_entry(&row)?);
        }
        Ok(results)
    }
}

/// Convert a `(name, type, path)` row to a [`SymbolEntry`].
fn row_to_entry(row: &Row) -> Result<SymbolEntry> {
    let kind: String = row
        .get(1)
        .map_err(|e| JavadocsetError::Storage(e.to_string()))?;

    Ok(SymbolEntry {
        name: row
            .get(0)
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?,
        kind: kind
            .parse::<SymbolKind>()
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?,
        location: row
            .get(2)
            .map_err(|e| JavadocsetError::Storage(e.to_string()))?,
    })
}

/// Escape `%`, `_` and the escape character itself for a `LIKE` pattern.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
