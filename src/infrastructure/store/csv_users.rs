//! CSV user store
//!
//! One row per user, header `Username,Password,Role`. The whole file is
//! read before each operation and rewritten in full after each mutation;
//! the rewrite goes through a temp file and an atomic rename so readers
//! never observe a half-written store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{UserRecord, UserStore};
use crate::support::errors::StoreError;

const HEADER: [&str; 3] = ["Username", "Password", "Role"];

/// Flat-file user store.
#[derive(Debug, Clone)]
pub struct CsvUserStore {
    path: PathBuf,
}

impl CsvUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<UserRecord>, StoreError> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<UserRecord>() {
            records.push(row.map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                source: e,
            })?);
        }
        Ok(records)
    }

    fn write_records(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source: e,
        };
        let csv_err = |e: csv::Error| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        };

        let temp_path = self.path.with_extension("csv.tmp");

        {
            // Header written explicitly so an empty store still carries it.
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&temp_path)
                .map_err(csv_err)?;
            writer.write_record(HEADER).map_err(csv_err)?;
            for record in records {
                writer.serialize(record).map_err(csv_err)?;
            }
            writer.flush().map_err(io_err)?;
        }

        std::fs::rename(&temp_path, &self.path).map_err(io_err)
    }
}

#[async_trait]
impl UserStore for CsvUserStore {
    async fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.read_records()
    }

    async fn save(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        self.write_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn record(username: &str, hash: &str, role: Role) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            password_hash: hash.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvUserStore::new(dir.path().join("users.csv"));

        let records = vec![
            record("alice", "$2b$12$aaaaaaaaaaaaaaaaaaaaaa", Role::Admin),
            record("bob", "$2a$12$bbbbbbbbbbbbbbbbbbbbbb", Role::Salesperson),
        ];
        store.save(&records).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn empty_store_still_writes_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        let store = CsvUserStore::new(&path);

        store.save(&[]).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next(), Some("Username,Password,Role"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_reported_not_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvUserStore::new(dir.path().join("absent.csv"));

        match store.load().await {
            Err(StoreError::NotFound { path }) => {
                assert!(path.ends_with("absent.csv"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_role_value_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        std::fs::write(&path, "Username,Password,Role\neve,$2b$12$x,Superuser\n").unwrap();

        let store = CsvUserStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(StoreError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn rewrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvUserStore::new(dir.path().join("users.csv"));

        store
            .save(&[record("alice", "$2b$12$a", Role::Admin)])
            .await
            .unwrap();
        store
            .save(&[record("bob", "$2b$12$b", Role::Salesperson)])
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].username, "bob");
    }
}
