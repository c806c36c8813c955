use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("running migration v1 (initial schema)");
        // No foreign keys: catalog rows are dropped on every refresh while
        // scores and pulls keep pointing at the old ids.
        conn.execute_batch(
            "
            CREATE TABLE items (
                id          TEXT PRIMARY KEY,
                image_url   TEXT NOT NULL,
                name        TEXT,
                category    INTEGER NOT NULL
            );

            CREATE TABLE item_attributes (
                item_id     TEXT NOT NULL,
                code        TEXT NOT NULL,
                value       INTEGER NOT NULL,
                PRIMARY KEY (item_id, code)
            );

            CREATE TABLE scores (
                item_id     TEXT PRIMARY KEY,
                score       INTEGER
            );

            CREATE INDEX idx_scores_score ON scores(score);

            CREATE TABLE users (
                uid         TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                password    TEXT NOT NULL,
                icon        TEXT,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE pulls (
                uid         TEXT NOT NULL,
                item_id     TEXT NOT NULL,
                date        TEXT NOT NULL
            );

            CREATE INDEX idx_pulls_user_date ON pulls(uid, date);

            CREATE TABLE schedule (
                id          INTEGER PRIMARY KEY,
                date        TEXT NOT NULL
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    Ok(())
}
