use std::collections::HashMap;

use rusqlite::{Connection, params};
use tracing::{info, warn};

use pullboard_types::models::{AttrCode, Attributes, BASELINE_SCORE, Item};

use crate::Database;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    /// Rows in the batch handed to `refresh_catalog`.
    pub items: usize,
    /// Ledger rows created for ids the ledger had never seen.
    pub new_scores: usize,
}

impl Database {
    /// Replace the whole catalog with `items`.
    ///
    /// Existing ledger rows survive; ids seen for the first time get the
    /// baseline score. Scores and pulls of items that disappear are left
    /// alone. A duplicate id in the batch silently overwrites the earlier row.
    pub fn refresh_catalog(&self, items: &[Item]) -> Result<RefreshStats> {
        let stats = self.with_tx(|conn| {
            conn.execute("DELETE FROM items", [])?;
            conn.execute("DELETE FROM item_attributes", [])?;

            let mut insert_item = conn.prepare(
                "INSERT OR REPLACE INTO items (id, image_url, name, category) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut clear_attrs = conn.prepare("DELETE FROM item_attributes WHERE item_id = ?1")?;
            let mut insert_attr = conn
                .prepare("INSERT INTO item_attributes (item_id, code, value) VALUES (?1, ?2, ?3)")?;
            let mut seed_score =
                conn.prepare("INSERT OR IGNORE INTO scores (item_id, score) VALUES (?1, ?2)")?;

            let mut new_scores = 0;
            for item in items {
                insert_item.execute(params![
                    item.id,
                    item.image_url,
                    item.display_name,
                    item.category
                ])?;

                clear_attrs.execute([&item.id])?;
                for (code, value) in &item.attributes {
                    insert_attr.execute(params![item.id, code.as_str(), value])?;
                }

                new_scores += seed_score.execute(params![item.id, BASELINE_SCORE])?;
            }

            Ok(RefreshStats {
                items: items.len(),
                new_scores,
            })
        })?;

        info!(items = stats.items, new_scores = stats.new_scores, "Catalog refreshed");
        Ok(stats)
    }

    /// Every catalog item with its attributes, ordered by category then id.
    pub fn fetch_all_items(&self) -> Result<Vec<Item>> {
        self.with_conn(query_items)
    }

    /// Distinct items currently in the catalog.
    pub fn item_count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0))?;
            Ok(count as usize)
        })
    }
}

fn query_items(conn: &Connection) -> Result<Vec<Item>> {
    let mut attributes: HashMap<String, Attributes> = HashMap::new();
    {
        let mut stmt = conn.prepare("SELECT item_id, code, value FROM item_attributes")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })?;

        for row in rows {
            let (item_id, code, value) = row?;
            match code.parse::<AttrCode>() {
                Ok(code) => {
                    attributes.entry(item_id).or_default().insert(code, value);
                }
                Err(e) => warn!("Skipping attribute of item '{}': {}", item_id, e),
            }
        }
    }

    let mut stmt =
        conn.prepare("SELECT id, image_url, name, category FROM items ORDER BY category, id")?;
    let items = stmt
        .query_map([], |row| {
            Ok(Item {
                id: row.get(0)?,
                image_url: row.get(1)?,
                display_name: row.get(2)?,
                category: row.get(3)?,
                attributes: Attributes::new(),
            })
        })?
        .map(|row| {
            row.map(|mut item| {
                if let Some(attrs) = attributes.remove(&item.id) {
                    item.attributes = attrs;
                }
                item
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(items)
}
