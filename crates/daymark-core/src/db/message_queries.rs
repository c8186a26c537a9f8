//! Message CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, MessengerError, Result},
    models::{Author, Message},
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_MESSAGE_SQL: &str =
    "INSERT INTO messages (author, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_MESSAGE_SQL: &str =
    "SELECT id, author, content, created_at, updated_at FROM messages WHERE id = ?1";
const CHECK_MESSAGE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM messages WHERE id = ?1)";
const UPDATE_MESSAGE_CONTENT_SQL: &str =
    "UPDATE messages SET content = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_MESSAGE_SQL: &str = "DELETE FROM messages WHERE id = ?1";

const MESSAGE_COLUMNS: &str = "id, author, content, created_at, updated_at";

/// Maps a database row to a Message, converting stored strings back to
/// typed fields.
fn row_to_message(row: &Row<'_>) -> rusqlite::Result<Message> {
    let author_str: String = row.get(1)?;
    let author = author_str.parse::<Author>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid author: {author_str}"),
            )),
        )
    })?;

    Ok(Message {
        id: row.get::<_, i64>(0)? as u64,
        author,
        content: row.get(2)?,
        created_at: row
            .get::<_, String>(3)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
        updated_at: row
            .get::<_, String>(4)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
    })
}

impl super::Database {
    /// Inserts a new message with the given author and combined content.
    ///
    /// The content is stored verbatim; embedding a plan block into it is
    /// the caller's responsibility (via the payload codec).
    pub fn insert_message(&mut self, author: Author, content: &str) -> Result<Message> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_MESSAGE_SQL,
            params![author.as_str(), content, &now_str, &now_str],
        )
        .db_context("Failed to insert message")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Message {
            id,
            author,
            content: content.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a message by its ID.
    pub fn get_message(&self, id: u64) -> Result<Option<Message>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_MESSAGE_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], row_to_message)
            .optional()
            .db_context("Failed to query message")
    }

    /// Lists messages, newest first, with optional author filter and
    /// limit.
    pub fn list_messages(&self, author: Option<Author>, limit: Option<u32>) -> Result<Vec<Message>> {
        let mut query = format!("SELECT {MESSAGE_COLUMNS} FROM messages");

        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(author) = author {
            query.push_str(" WHERE author = ?");
            params_vec.push(Box::new(author.as_str().to_string()));
        }

        query.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = limit {
            query.push_str(" LIMIT ?");
            params_vec.push(Box::new(i64::from(limit)));
        }

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let messages = stmt
            .query_map(&params_refs[..], row_to_message)
            .db_context("Failed to query messages")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch messages")?;

        Ok(messages)
    }

    /// Replaces a message's content.
    ///
    /// Returns the updated message, or None if no message has the given
    /// ID. Any plan block embedded in the previous content is destroyed
    /// with it.
    pub fn update_message_content(&mut self, id: u64, content: &str) -> Result<Option<Message>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(UPDATE_MESSAGE_CONTENT_SQL, params![content, &now, id as i64])
            .db_context("Failed to update message")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let message = tx
            .query_row(SELECT_MESSAGE_SQL, params![id as i64], row_to_message)
            .optional()
            .db_context("Failed to query updated message")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(message)
    }

    /// Permanently deletes a message. This operation cannot be undone.
    pub fn delete_message(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_MESSAGE_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check message existence")?;

        if !exists {
            return Err(MessengerError::MessageNotFound { id });
        }

        tx.execute(DELETE_MESSAGE_SQL, params![id as i64])
            .db_context("Failed to delete message")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
