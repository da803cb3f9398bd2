use crate::error::StorageError;
use rusqlite::{Connection, OptionalExtension};

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

/// A string key-value medium the ledger persists into.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Inserts or replaces the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl Storage for Connection {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}
