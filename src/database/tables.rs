pub const CREATE_TABLES: &str = r"
    CREATE TABLE IF NOT EXISTS resume_positions(
        media_key TEXT PRIMARY KEY,
        media_link TEXT NOT NULL,
        last_updated TEXT NOT NULL,
        last_timestamp_seconds REAL NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_resume_updated ON resume_positions(last_updated);
";
