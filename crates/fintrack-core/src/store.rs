//! Record storage interface
//!
//! Views only ever insert records and read them back, so the storage
//! contract is four required operations plus lookups with scanning defaults. [`crate::db::Database`] is the SQLite
//! implementation used by the CLI and server.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Goal, NewGoal, NewTransaction, Transaction};

/// Durable insert/read-all storage for goals and transactions
pub trait FinanceStore {
    /// Validate and persist a goal, returning it with its assigned id
    fn add_goal(&self, goal: &NewGoal) -> Result<Goal>;

    /// All goals in insertion order
    fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Validate and persist a transaction. A missing date is filled with
    /// `today`.
    fn add_transaction_on(&self, tx: &NewTransaction, today: NaiveDate) -> Result<Transaction>;

    /// All transactions in insertion order
    fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// A goal by id, or None when no goal has it
    fn get_goal(&self, id: i64) -> Result<Option<Goal>> {
        Ok(self.list_goals()?.into_iter().find(|g| g.id == id))
    }

    /// Persist a transaction, dating it today when no date was given
    fn add_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.add_transaction_on(tx, chrono::Local::now().date_naive())
    }

    /// The last `limit` transactions, oldest first
    fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>> {
        let mut all = self.list_transactions()?;
        let skip = all.len().saturating_sub(limit);
        Ok(all.split_off(skip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Vec-backed store implementing only the required operations
    #[derive(Default)]
    struct MemoryStore {
        goals: RefCell<Vec<Goal>>,
        transactions: RefCell<Vec<Transaction>>,
    }

    impl FinanceStore for MemoryStore {
        fn add_goal(&self, goal: &NewGoal) -> Result<Goal> {
            let mut goals = self.goals.borrow_mut();
            let goal = Goal {
                id: goals.len() as i64 + 1,
                name: goal.name.clone(),
                target: goal.target,
                current: goal.current,
                deadline: goal.deadline.clone(),
            };
            goals.push(goal.clone());
            Ok(goal)
        }

        fn list_goals(&self) -> Result<Vec<Goal>> {
            Ok(self.goals.borrow().clone())
        }

        fn add_transaction_on(&self, tx: &NewTransaction, today: NaiveDate) -> Result<Transaction> {
            let mut transactions = self.transactions.borrow_mut();
            let tx = Transaction {
                id: transactions.len() as i64 + 1,
                amount: tx.amount,
                category: tx.category,
                date: tx.date.unwrap_or(today),
            };
            transactions.push(tx.clone());
            Ok(tx)
        }

        fn list_transactions(&self) -> Result<Vec<Transaction>> {
            Ok(self.transactions.borrow().clone())
        }
    }

    #[test]
    fn test_default_get_goal_scans() {
        let store = MemoryStore::default();
        store.add_goal(&NewGoal::new("Car", 100.0, 0.0, "2030-01-01")).unwrap();
        let trip = store.add_goal(&NewGoal::new("Trip", 50.0, 0.0, "2030-01-01")).unwrap();

        assert_eq!(store.get_goal(trip.id).unwrap(), Some(trip));
        assert_eq!(store.get_goal(99).unwrap(), None);
    }

    #[test]
    fn test_default_recent_transactions() {
        let store = MemoryStore::default();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        for amount in [1.0, 2.0, 3.0] {
            store
                .add_transaction_on(&NewTransaction::new(amount, crate::models::Category::Other), today)
                .unwrap();
        }

        let recent = store.recent_transactions(2).unwrap();
        let amounts: Vec<f64> = recent.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0]);
        assert_eq!(store.recent_transactions(10).unwrap().len(), 3);
    }
}
