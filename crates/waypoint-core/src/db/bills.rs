//! Recurring bill templates

use rusqlite::params;

use super::Database;
use crate::bills::DEFAULT_BILL_CATEGORY;
use crate::error::Result;
use crate::models::{Bill, NewBill, OwnerId};
use crate::store::BillStore;

fn row_to_bill(row: &rusqlite::Row) -> rusqlite::Result<Bill> {
    Ok(Bill {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        due_day: row.get(3)?,
        category: row.get(4)?,
    })
}

impl BillStore for Database {
    fn insert_bill(&self, owner: OwnerId, bill: &NewBill) -> Result<Bill> {
        let conn = self.conn()?;
        let category = bill
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_BILL_CATEGORY.to_string());
        conn.execute(
            "INSERT INTO bills (owner_id, name, amount, due_day, category) VALUES (?, ?, ?, ?, ?)",
            params![owner, bill.name, bill.amount, bill.due_day, category],
        )?;

        Ok(Bill {
            id: conn.last_insert_rowid(),
            name: bill.name.clone(),
            amount: bill.amount,
            due_day: bill.due_day,
            category,
        })
    }

    fn find_bills(&self, owner: OwnerId) -> Result<Vec<Bill>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, amount, due_day, category
            FROM bills
            WHERE owner_id = ?
            ORDER BY due_day, id
            "#,
        )?;
        let bills = stmt
            .query_map(params![owner], row_to_bill)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(bills)
    }

    fn delete_bill(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM bills WHERE owner_id = ? AND id = ?",
            params![owner, id],
        )?;
        Ok(deleted > 0)
    }
}
