use daymark_core::{Messenger, MessengerBuilder};
use tempfile::TempDir;

/// Helper function to create a test messenger
pub async fn create_test_messenger() -> (TempDir, Messenger) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let messenger = MessengerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create messenger");
    (temp_dir, messenger)
}
