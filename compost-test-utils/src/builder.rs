//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and account
/// fixtures. Methods can be chained together and finalized with `build()`.
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_account_tables: bool,
    // (username, email, password)
    accounts: Vec<(String, String, String)>,
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the account, profile and password reset token tables to the test database.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_account_tables(mut self) -> Self {
        self.include_account_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use compost_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), compost_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Account)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert an account with a default profile into the database.
    ///
    /// Requires `with_account_tables`. The password is hashed the same way the server hashes
    /// passwords, so the account can log in with it.
    ///
    /// # Arguments
    /// - `username` - Account username
    /// - `email` - Account email address
    /// - `password` - Plain text password
    pub fn with_account(mut self, username: &str, email: &str, password: &str) -> Self {
        self.accounts
            .push((username.to_string(), email.to_string(), password.to_string()));
        self
    }

    /// Build the test context, executing all queued operations.
    ///
    /// Order of operations:
    /// 1. Create tables
    /// 2. Insert account fixtures
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test context
    /// - `Err(TestError)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_account_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Account),
                schema.create_table_from_entity(entity::prelude::Profile),
                schema.create_table_from_entity(entity::prelude::PasswordResetToken),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for (username, email, password) in self.accounts {
            setup
                .account()
                .insert_account_with_profile(&username, &email, &password)
                .await?;
        }

        Ok(setup)
    }
}
