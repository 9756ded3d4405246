//! Savings goals
//!
//! Saved amounts are funded explicitly and never derived from transactions.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{today, Goal, GoalStatus, NewGoal, OwnerId};
use crate::store::GoalStore;

pub fn add_goal<S: GoalStore + ?Sized>(store: &S, owner: OwnerId, goal: &NewGoal) -> Result<Goal> {
    if goal.title.trim().is_empty() {
        return Err(Error::validation("title is required"));
    }
    if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
        return Err(Error::validation("targetAmount must be a positive number"));
    }
    if !goal.saved_amount.is_finite() || goal.saved_amount < 0.0 {
        return Err(Error::validation("savedAmount must be zero or more"));
    }

    let created = store.insert_goal(owner, goal)?;
    info!(owner, id = created.id, "Added goal");
    Ok(created)
}

pub fn list_goals<S: GoalStore + ?Sized>(store: &S, owner: OwnerId) -> Result<Vec<Goal>> {
    store.find_goals(owner)
}

fn load<S: GoalStore + ?Sized>(store: &S, owner: OwnerId, id: i64) -> Result<Goal> {
    store
        .get_goal(owner, id)?
        .ok_or_else(|| Error::not_found("goal", id))
}

fn save<S: GoalStore + ?Sized>(store: &S, owner: OwnerId, goal: &Goal) -> Result<()> {
    if !store.update_goal(owner, goal)? {
        return Err(Error::not_found("goal", goal.id));
    }
    Ok(())
}

/// Add money to a goal's saved amount
pub fn add_funds<S: GoalStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
    amount: f64,
) -> Result<Goal> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation("amount must be a positive number"));
    }

    let mut goal = load(store, owner, id)?;
    goal.saved_amount += amount;
    save(store, owner, &goal)?;

    info!(owner, id, amount, "Funded goal");
    Ok(goal)
}

/// Change a goal's status; completing stamps `today`, anything else clears the date
pub fn set_goal_status_at<S: GoalStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
    status: GoalStatus,
    today: NaiveDate,
) -> Result<Goal> {
    let mut goal = load(store, owner, id)?;
    goal.status = status;
    goal.completed_date = match status {
        GoalStatus::Completed => Some(today),
        GoalStatus::Active | GoalStatus::Paused => None,
    };
    save(store, owner, &goal)?;
    Ok(goal)
}

pub fn set_goal_status<S: GoalStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    id: i64,
    status: GoalStatus,
) -> Result<Goal> {
    set_goal_status_at(store, owner, id, status, today())
}

pub fn delete_goal<S: GoalStore + ?Sized>(store: &S, owner: OwnerId, id: i64) -> Result<()> {
    if !store.delete_goal(owner, id)? {
        return Err(Error::not_found("goal", id));
    }
    Ok(())
}
