//! Relational content searcher: pattern queries over articles, job postings
//! and courses, mapped into the common result shape.
//!
//! The orchestrator treats this collaborator as fully optional: any error
//! here is caught, logged and demoted to "no results from that source".

use rusqlite::Connection;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::types::{ResultKind, SearchResult};

/// Read-only search interface over the relational data store.
///
/// The three queries are independent; the orchestrator runs them
/// concurrently and merges whatever arrives.
pub trait ContentStore: Send + Sync {
    fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError>;
    fn search_jobs(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError>;
    fn search_courses(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError>;
}

/// SQLite-backed [`ContentStore`].
///
/// Each search is a single `LIKE` pattern query filtered to published/active
/// rows and capped by `limit`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open a store over an in-memory database with the content schema
    /// applied. Useful for tests and local development.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self::new(conn))
    }

    fn query_rows(
        &self,
        sql: &str,
        query: &str,
        limit: usize,
        map: impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<SearchResult>,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let pattern = like_pattern(query);
        let conn = self.conn.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt.query_map(rusqlite::params![pattern, limit as i64], |row| map(row))?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }
}

/// Escape `LIKE` metacharacters and wrap in `%...%`.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Content schema for the three record sets. Applied by
/// [`SqliteStore::in_memory`]; callers opening their own connection can
/// apply it with `execute_batch`.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    excerpt TEXT NOT NULL DEFAULT '',
    slug TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'draft'
);
CREATE TABLE IF NOT EXISTS jobs (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT,
    status TEXT NOT NULL DEFAULT 'closed'
);
CREATE TABLE IF NOT EXISTS courses (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT,
    status TEXT NOT NULL DEFAULT 'inactive'
);
";

impl ContentStore for SqliteStore {
    fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError> {
        self.query_rows(
            "SELECT id, title, excerpt, slug FROM articles \
             WHERE status = 'published' \
             AND (LOWER(title) LIKE ?1 ESCAPE '\\' OR LOWER(excerpt) LIKE ?1 ESCAPE '\\') \
             LIMIT ?2",
            query,
            limit,
            |row| {
                let slug: String = row.get(3)?;
                Ok(SearchResult {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    url: format!("/blog/{slug}"),
                    kind: ResultKind::Blog,
                    category: None,
                    snippet: None,
                    relevance: None,
                })
            },
        )
    }

    fn search_jobs(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError> {
        self.query_rows(
            "SELECT id, title, description, category FROM jobs \
             WHERE status = 'active' \
             AND (LOWER(title) LIKE ?1 ESCAPE '\\' OR LOWER(description) LIKE ?1 ESCAPE '\\') \
             LIMIT ?2",
            query,
            limit,
            |row| {
                let id: String = row.get(0)?;
                Ok(SearchResult {
                    url: format!("/jobs/{id}"),
                    id,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    kind: ResultKind::Job,
                    category: row.get(3)?,
                    snippet: None,
                    relevance: None,
                })
            },
        )
    }

    fn search_courses(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError> {
        self.query_rows(
            "SELECT id, title, description, category FROM courses \
             WHERE status = 'active' \
             AND (LOWER(title) LIKE ?1 ESCAPE '\\' OR LOWER(description) LIKE ?1 ESCAPE '\\') \
             LIMIT ?2",
            query,
            limit,
            |row| {
                let id: String = row.get(0)?;
                Ok(SearchResult {
                    url: format!("/academy/courses/{id}"),
                    id,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    kind: ResultKind::Course,
                    category: row.get(3)?,
                    snippet: None,
                    relevance: None,
                })
            },
        )
    }
}
