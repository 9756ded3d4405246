//! Debt operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{get_enum, Database};
use crate::error::{Error, Result};
use crate::models::{Debt, DebtStatus, NewDebt, OwnerId};
use crate::store::DebtStore;

const SELECT_DEBT: &str = r#"
    SELECT id, name, total_amount, current_amount, interest_rate, minimum_payment,
           due_date, status
    FROM debts
"#;

fn row_to_debt(row: &rusqlite::Row) -> rusqlite::Result<Debt> {
    Ok(Debt {
        id: row.get(0)?,
        name: row.get(1)?,
        total_amount: row.get(2)?,
        current_amount: row.get(3)?,
        interest_rate: row.get(4)?,
        minimum_payment: row.get(5)?,
        due_date: row.get(6)?,
        status: get_enum(row, 7)?,
    })
}

fn fetch(conn: &Connection, owner: OwnerId, id: i64) -> rusqlite::Result<Option<Debt>> {
    let sql = format!("{} WHERE owner_id = ? AND id = ?", SELECT_DEBT);
    conn.query_row(&sql, params![owner, id], row_to_debt)
        .optional()
}

impl DebtStore for Database {
    fn insert_debt(&self, owner: OwnerId, debt: &NewDebt) -> Result<Debt> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO debts
                (owner_id, name, total_amount, current_amount, interest_rate, minimum_payment, due_date, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                owner,
                debt.name,
                debt.total_amount,
                debt.current_amount.unwrap_or(debt.total_amount),
                debt.interest_rate,
                debt.minimum_payment,
                debt.due_date,
                DebtStatus::Active.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch(&conn, owner, id)?.ok_or_else(|| Error::not_found("debt", id))
    }

    fn find_debts(&self, owner: OwnerId, status: Option<DebtStatus>) -> Result<Vec<Debt>> {
        let conn = self.conn()?;
        let sql = format!(
            "{} WHERE owner_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY id",
            SELECT_DEBT
        );
        let mut stmt = conn.prepare(&sql)?;
        let debts = stmt
            .query_map(params![owner, status.map(|s| s.as_str())], row_to_debt)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(debts)
    }

    fn get_debt(&self, owner: OwnerId, id: i64) -> Result<Option<Debt>> {
        let conn = self.conn()?;
        Ok(fetch(&conn, owner, id)?)
    }

    fn update_debt(&self, owner: OwnerId, debt: &Debt) -> Result<bool> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE debts
            SET name = ?, current_amount = ?, interest_rate = ?, minimum_payment = ?,
                due_date = ?, status = ?
            WHERE owner_id = ? AND id = ?
            "#,
            params![
                debt.name,
                debt.current_amount,
                debt.interest_rate,
                debt.minimum_payment,
                debt.due_date,
                debt.status.as_str(),
                owner,
                debt.id,
            ],
        )?;
        Ok(updated > 0)
    }

    fn delete_debt(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM debts WHERE owner_id = ? AND id = ?",
            params![owner, id],
        )?;
        Ok(deleted > 0)
    }

    fn delete_all_debts(&self, owner: OwnerId) -> Result<usize> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM debts WHERE owner_id = ?", params![owner])?)
    }
}
