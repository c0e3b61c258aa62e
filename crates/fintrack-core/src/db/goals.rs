//! Goal operations

use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::Result;
use crate::models::{Goal, NewGoal};

const GOAL_COLUMNS: &str = "id, name, target, current, deadline";

fn goal_from_row(row: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get(0)?,
        name: row.get(1)?,
        target: row.get(2)?,
        current: row.get(3)?,
        deadline: row.get(4)?,
    })
}

impl Database {
    /// Insert a goal after validating it
    pub fn insert_goal(&self, goal: &NewGoal) -> Result<Goal> {
        goal.validate()?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO goals (name, target, current, deadline) VALUES (?, ?, ?, ?)",
            params![goal.name, goal.target, goal.current, goal.deadline],
        )?;

        Ok(Goal {
            id: conn.last_insert_rowid(),
            name: goal.name.clone(),
            target: goal.target,
            current: goal.current,
            deadline: goal.deadline.clone(),
        })
    }

    /// List all goals in insertion order
    pub fn get_goals(&self) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM goals ORDER BY id", GOAL_COLUMNS))?;

        let goals = stmt
            .query_map([], goal_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Get a goal by ID
    pub fn get_goal(&self, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                &format!("SELECT {} FROM goals WHERE id = ?", GOAL_COLUMNS),
                params![id],
                goal_from_row,
            )
            .optional()?;

        Ok(goal)
    }

    /// Number of stored goals
    pub fn count_goals(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM goals", [], |row| row.get(0))?)
    }

    /// Insert a goal keeping its original id (backup restore)
    pub(crate) fn restore_goal(&self, goal: &Goal) -> Result<bool> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO goals (id, name, target, current, deadline) VALUES (?, ?, ?, ?, ?)",
            params![goal.id, goal.name, goal.target, goal.current, goal.deadline],
        )?;
        Ok(inserted > 0)
    }
}
