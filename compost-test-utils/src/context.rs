//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context includes an
//! in-memory SQLite database, a session backed by an in-memory store and a temporary media
//! root that is deleted when the context is dropped.

use std::{path::Path, sync::Arc};

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather
/// than constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new().with_account_tables().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Access fixture helpers
/// let (account, profile) = test
///     .account()
///     .insert_account_with_profile("testuser", "test@example.com", "password123")
///     .await?;
/// test.media().write_image("profile_images/a.png", 200, 200).await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session for request handlers under test
    pub session: Session,
    /// Temporary directory used as the media root
    pub media: TempDir,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    /// - `Err(TestError::IoError)` - Temporary media root could not be created
    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;
        let media = tempfile::tempdir()?;

        Ok(TestContext { db, session, media })
    }

    /// Execute CREATE TABLE statements on the test database.
    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Path of the temporary media root.
    pub fn media_root(&self) -> &Path {
        self.media.path()
    }

    /// Replace the session with a fresh, empty one.
    ///
    /// Useful for simulating a second browser in the same test.
    pub fn new_session(&mut self) {
        self.session = Session::new(None, Arc::new(MemoryStore::default()), None);
    }
}
