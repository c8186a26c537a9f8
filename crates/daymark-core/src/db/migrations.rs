//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if updated_at column exists in messages table; databases
        // created before message editing shipped lack it
        let has_updated_at_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('messages') WHERE name = 'updated_at'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_updated_at_column {
            self.connection
                .execute("ALTER TABLE messages ADD COLUMN updated_at TEXT", [])
                .db_context("Failed to add updated_at column to messages table")?;
            self.connection
                .execute(
                    "UPDATE messages SET updated_at = created_at WHERE updated_at IS NULL",
                    [],
                )
                .db_context("Failed to backfill updated_at column")?;
        }

        Ok(())
    }
}
