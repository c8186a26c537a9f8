//! Builder for creating and configuring Messenger instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Messenger;
use crate::{
    db::Database,
    error::{MessengerError, Result},
};

/// Builder for creating and configuring Messenger instances.
#[derive(Debug, Clone)]
pub struct MessengerBuilder {
    database_path: Option<PathBuf>,
}

impl MessengerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/daymark/daymark.db` or
    /// `~/.local/share/daymark/daymark.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured messenger instance.
    ///
    /// # Errors
    ///
    /// Returns `MessengerError::FileSystem` if the database path is invalid
    /// Returns `MessengerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Messenger> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MessengerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), MessengerError>(())
        })
        .await
        .map_err(|e| MessengerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Messenger::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("daymark")
            .place_data_file("daymark.db")
            .map_err(|e| MessengerError::XdgDirectory(e.to_string()))
    }
}

impl Default for MessengerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
