#![allow(dead_code)]
use deskpulse::infrastructure::persistence::Database;
use uuid::Uuid;

/// File-backed SQLite database, removed again when dropped.
pub struct TestDatabase {
    db: Database,
    path: String,
}

impl TestDatabase {
    pub fn db(&self) -> Database {
        self.db.clone()
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path, suffix));
        }
    }
}

pub async fn setup_test_db() -> TestDatabase {
    // Unique file per test so tests can run in parallel
    let path = std::env::temp_dir()
        .join(format!("deskpulse_test_{}.db", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    let db_url = format!("sqlite://{}?mode=rwc", path);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDatabase { db, path }
}
