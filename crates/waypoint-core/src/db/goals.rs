//! Goal operations

use rusqlite::{params, Connection, OptionalExtension};

use super::{get_enum, get_opt_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Goal, GoalStatus, NewGoal, OwnerId};
use crate::store::GoalStore;

const SELECT_GOAL: &str = r#"
    SELECT id, title, target_amount, saved_amount, deadline, priority, status,
           completed_date, created_at
    FROM goals
"#;

fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
    let created_at: String = row.get(8)?;
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        target_amount: row.get(2)?,
        saved_amount: row.get(3)?,
        deadline: get_opt_date(row, 4)?,
        priority: get_enum(row, 5)?,
        status: get_enum(row, 6)?,
        completed_date: get_opt_date(row, 7)?,
        created_at: parse_datetime(&created_at),
    })
}

fn fetch(conn: &Connection, owner: OwnerId, id: i64) -> rusqlite::Result<Option<Goal>> {
    let sql = format!("{} WHERE owner_id = ? AND id = ?", SELECT_GOAL);
    conn.query_row(&sql, params![owner, id], row_to_goal)
        .optional()
}

impl GoalStore for Database {
    fn insert_goal(&self, owner: OwnerId, goal: &NewGoal) -> Result<Goal> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO goals (owner_id, title, target_amount, saved_amount, deadline, priority, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                owner,
                goal.title,
                goal.target_amount,
                goal.saved_amount,
                goal.deadline.map(|d| d.to_string()),
                goal.priority.as_str(),
                GoalStatus::Active.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch(&conn, owner, id)?.ok_or_else(|| Error::not_found("goal", id))
    }

    fn find_goals(&self, owner: OwnerId) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE owner_id = ? ORDER BY id", SELECT_GOAL);
        let mut stmt = conn.prepare(&sql)?;
        let goals = stmt
            .query_map(params![owner], row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    fn get_goal(&self, owner: OwnerId, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        Ok(fetch(&conn, owner, id)?)
    }

    fn update_goal(&self, owner: OwnerId, goal: &Goal) -> Result<bool> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE goals
            SET title = ?, target_amount = ?, saved_amount = ?, deadline = ?, priority = ?,
                status = ?, completed_date = ?
            WHERE owner_id = ? AND id = ?
            "#,
            params![
                goal.title,
                goal.target_amount,
                goal.saved_amount,
                goal.deadline.map(|d| d.to_string()),
                goal.priority.as_str(),
                goal.status.as_str(),
                goal.completed_date.map(|d| d.to_string()),
                owner,
                goal.id,
            ],
        )?;
        Ok(updated > 0)
    }

    fn delete_goal(&self, owner: OwnerId, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM goals WHERE owner_id = ? AND id = ?",
            params![owner, id],
        )?;
        Ok(deleted > 0)
    }
}
