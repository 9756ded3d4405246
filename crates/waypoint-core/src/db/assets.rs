//! Asset operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{get_enum, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Asset, NewAsset, OwnerId};
use crate::store::AssetStore;

const SELECT_ASSET: &str = r#"
    SELECT id, name, type, value, is_liquid, last_updated
    FROM assets
"#;

fn row_to_asset(row: &rusqlite::Row) -> rusqlite::Result<Asset> {
    let last_updated: String = row.get(5)?;
    Ok(Asset {
        id: row.get(0)?,
        name: row.get(1)?,
        asset_type: get_enum(row, 2)?,
        value: row.get(3)?,
        is_liquid: row.get(4)?,
        last_updated: parse_datetime(&last_updated),
    })
}

fn fetch(conn: &Connection, owner: OwnerId, id: i64) -> rusqlite::Result<Option<Asset>> {
    let sql = format!("{} WHERE owner_id = ? AND id = ?", SELECT_ASSET);
    conn.query_row(&sql, params![owner, id], row_to_asset)
        .optional()
}

impl AssetStore for Database {
    fn insert_asset(&self, owner: OwnerId, asset: &NewAsset) -> Result<Asset> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO assets (owner_id, name, type, value, is_liquid) VALUES (?, ?, ?, ?, ?)",
            params![
                owner,
                asset.name,
                asset.asset_type.as_str(),
                asset.value,
                asset.is_liquid,
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch(&conn, owner, id)?.ok_or_else(|| Error::not_found("asset", id))
    }

    fn find_assets(&self, owner: OwnerId) -> Result<Vec<Asset>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE owner_id = ? ORDER BY id", SELECT_ASSET);
        let mut stmt = conn.prepare(&sql)?;
        let assets = stmt
            .query_map(params![owner], row_to_asset)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(assets)
    }

    fn update_asset_value(&self, owner: OwnerId, id: i64, value: f64) -> Result<Option<Asset>> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE assets SET value = ?, last_updated = CURRENT_TIMESTAMP
            WHERE owner_id = ? AND id = ?
            "#,
            params![value, owner, id],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        Ok(fetch(&conn, owner, id)?)
    }

    fn delete_asset(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM assets WHERE owner_id = ? AND id = ?",
            params![owner, id],
        )?;
        Ok(deleted > 0)
    }

    fn delete_all_assets(&self, owner: OwnerId) -> Result<usize> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM assets WHERE owner_id = ?", params![owner])?)
    }
}
