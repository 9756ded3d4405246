//! Consumption item operations

use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::models::{ConsumptionItem, NewConsumptionItem, OwnerId};
use crate::store::ConsumptionStore;

const SELECT_ITEM: &str = r#"
    SELECT id, name, cost, months, monthly_cost
    FROM consumption_items
"#;

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<ConsumptionItem> {
    Ok(ConsumptionItem {
        id: row.get(0)?,
        name: row.get(1)?,
        cost: row.get(2)?,
        months: row.get(3)?,
        monthly_cost: row.get(4)?,
    })
}

fn fetch(conn: &Connection, owner: OwnerId, id: i64) -> rusqlite::Result<Option<ConsumptionItem>> {
    let sql = format!("{} WHERE owner_id = ? AND id = ?", SELECT_ITEM);
    conn.query_row(&sql, params![owner, id], row_to_item)
        .optional()
}

impl ConsumptionStore for Database {
    fn insert_item(&self, owner: OwnerId, item: &NewConsumptionItem) -> Result<ConsumptionItem> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO consumption_items (owner_id, name, cost, months, monthly_cost)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![owner, item.name, item.cost, item.months, item.monthly_cost],
        )?;

        Ok(ConsumptionItem {
            id: conn.last_insert_rowid(),
            name: item.name.clone(),
            cost: item.cost,
            months: item.months,
            monthly_cost: item.monthly_cost,
        })
    }

    fn find_items(&self, owner: OwnerId) -> Result<Vec<ConsumptionItem>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE owner_id = ? ORDER BY id", SELECT_ITEM);
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(params![owner], row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn get_item(&self, owner: OwnerId, id: i64) -> Result<Option<ConsumptionItem>> {
        let conn = self.conn()?;
        Ok(fetch(&conn, owner, id)?)
    }

    fn update_item(
        &self,
        owner: OwnerId,
        id: i64,
        item: &NewConsumptionItem,
    ) -> Result<Option<ConsumptionItem>> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE consumption_items
            SET name = ?, cost = ?, months = ?, monthly_cost = ?
            WHERE owner_id = ? AND id = ?
            "#,
            params![item.name, item.cost, item.months, item.monthly_cost, owner, id],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        Ok(fetch(&conn, owner, id)?)
    }

    fn delete_item(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM consumption_items WHERE owner_id = ? AND id = ?",
            params![owner, id],
        )?;
        Ok(deleted > 0)
    }
}
