//! Transaction operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{get_date, get_enum, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, OwnerId, Transaction};
use crate::store::{SortOrder, TransactionQuery, TransactionStore};

const SELECT_TRANSACTION: &str = r#"
    SELECT id, type, category, amount, description, is_recurring, is_locked,
           recurrence, date, created_at
    FROM transactions
"#;

const INSERT_TRANSACTION: &str = r#"
    INSERT INTO transactions
        (owner_id, type, category, amount, description, is_recurring, is_locked, recurrence, date)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let created_at: String = row.get(9)?;
    Ok(Transaction {
        id: row.get(0)?,
        transaction_type: get_enum(row, 1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        description: row.get(4)?,
        is_recurring: row.get(5)?,
        is_locked: row.get(6)?,
        recurrence: get_enum(row, 7)?,
        date: get_date(row, 8)?,
        created_at: parse_datetime(&created_at),
    })
}

fn fetch(conn: &Connection, owner: OwnerId, id: i64) -> rusqlite::Result<Option<Transaction>> {
    let sql = format!("{} WHERE owner_id = ? AND id = ?", SELECT_TRANSACTION);
    conn.query_row(&sql, params![owner, id], row_to_transaction)
        .optional()
}

fn insert(conn: &Connection, owner: OwnerId, tx: &NewTransaction) -> rusqlite::Result<i64> {
    conn.execute(
        INSERT_TRANSACTION,
        params![
            owner,
            tx.transaction_type.as_str(),
            tx.category,
            tx.amount,
            tx.description,
            tx.is_recurring,
            tx.is_locked,
            tx.recurrence.as_str(),
            tx.date.to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// WHERE/ORDER/LIMIT clauses and parameters for a transaction query
fn build_query(owner: OwnerId, query: &TransactionQuery) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut conditions = vec!["owner_id = ?".to_string()];
    let mut query_params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(owner)];

    if let Some(t) = query.transaction_type {
        conditions.push("type = ?".to_string());
        query_params.push(Box::new(t.as_str()));
    }
    if let Some(since) = query.since {
        conditions.push("date >= ?".to_string());
        query_params.push(Box::new(since.to_string()));
    }
    if let Some(until) = query.until {
        conditions.push("date <= ?".to_string());
        query_params.push(Box::new(until.to_string()));
    }

    let direction = match query.order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };

    let mut sql = format!(
        "{} WHERE {} ORDER BY date {}, id {}",
        SELECT_TRANSACTION,
        conditions.join(" AND "),
        direction,
        direction
    );
    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        query_params.push(Box::new(limit as i64));
    }

    (sql, query_params)
}

impl TransactionStore for Database {
    fn insert_transaction(&self, owner: OwnerId, tx: &NewTransaction) -> Result<Transaction> {
        let conn = self.conn()?;
        let id = insert(&conn, owner, tx)?;
        fetch(&conn, owner, id)?.ok_or_else(|| Error::not_found("transaction", id))
    }

    fn insert_transactions(&self, owner: OwnerId, txs: &[NewTransaction]) -> Result<usize> {
        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;
        for tx in txs {
            insert(&db_tx, owner, tx)?;
        }
        db_tx.commit()?;
        Ok(txs.len())
    }

    fn find_transactions(
        &self,
        owner: OwnerId,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let (sql, query_params) = build_query(owner, query);
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            query_params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(param_refs.as_slice(), row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    fn delete_transaction(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE owner_id = ? AND id = ?",
            params![owner, id],
        )?;
        Ok(deleted > 0)
    }

    fn delete_all_transactions(&self, owner: OwnerId) -> Result<usize> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM transactions WHERE owner_id = ?", params![owner])?)
    }
}
