mod queries;
mod resume;
mod tables;

use crate::{CONFIG_DIRECTORY, DATABASE_FILENAME};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open() -> Result<Self> {
        let db_path = dirs::config_dir()
            .context("Config folder not present on system!")?
            .join(CONFIG_DIRECTORY);

        fs::create_dir_all(&db_path).context("Failed to create or access config directory")?;

        let conn = Connection::open(db_path.join(DATABASE_FILENAME))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let mut db = Database { conn };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(tables::CREATE_TABLES)?;
        tx.commit()?;

        Ok(())
    }
}
