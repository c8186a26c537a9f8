//! Database operations and SQLite management for the message log.
//!
//! This module provides low-level database operations for the Daymark
//! message store. It handles SQLite database connections, schema
//! management, and the query interface for messages. Stored content is an
//! immutable string from the store's point of view; the payload codec is
//! applied above this layer.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod message_queries;
pub mod migrations;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
