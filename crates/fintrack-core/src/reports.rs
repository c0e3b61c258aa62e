//! Dashboard and report aggregation
//!
//! Every view recomputes from the full record set on each request; there is
//! no caching or incremental state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::advisor::{self, Advice};
use crate::error::{Error, Result};
use crate::metrics::{
    completion_percentage, health_score_for, share, total_current, total_expenses, total_target,
};
use crate::models::*;
use crate::store::FinanceStore;

/// A stored goal together with its advice at a given date
#[derive(Debug, Clone, Serialize)]
pub struct GoalPlan {
    pub goal: Goal,
    pub advice: Advice,
}

impl GoalPlan {
    pub fn for_goal(goal: Goal, today: NaiveDate) -> Self {
        let advice = advisor::calculate(goal.target, goal.current, &goal.deadline, today);
        Self { goal, advice }
    }
}

/// Dashboard totals and the target-vs-current series
pub fn dashboard_summary(goals: &[Goal]) -> DashboardSummary {
    DashboardSummary {
        goal_count: goals.len(),
        total_target: total_target(goals),
        total_current: total_current(goals),
        goals: goals
            .iter()
            .map(|g| GoalBar {
                name: g.name.clone(),
                target: g.target,
                current: g.current,
            })
            .collect(),
    }
}

/// Each goal's share of the combined target
pub fn goal_distribution(goals: &[Goal]) -> Vec<GoalShare> {
    let total = total_target(goals);
    goals
        .iter()
        .map(|g| GoalShare {
            name: g.name.clone(),
            target: g.target,
            percentage: share(g.target, total),
        })
        .collect()
}

/// Spending per category in display order, skipping empty categories
pub fn expense_distribution(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for tx in transactions {
        let entry = by_category.entry(tx.category).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let total = total_expenses(transactions);
    by_category
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category,
            amount,
            percentage: share(amount, total),
            transaction_count: count,
        })
        .collect()
}

/// Goals with their completion percentage
pub fn goal_progress(goals: &[Goal]) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|g| GoalProgress {
            completion_percentage: completion_percentage(g.current, g.target),
            goal: g.clone(),
        })
        .collect()
}

/// Build the full report from already loaded records
pub fn build_report(goals: &[Goal], transactions: &[Transaction]) -> FinancialReport {
    FinancialReport {
        goal_distribution: goal_distribution(goals),
        expense_distribution: expense_distribution(transactions),
        goal_progress: goal_progress(goals),
        total_savings: total_current(goals),
        total_expenses: total_expenses(transactions),
        transaction_count: transactions.len(),
        health_score: health_score_for(goals, transactions),
    }
}

/// Report views over a store
pub struct Reporter<'a, S: FinanceStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: FinanceStore + ?Sized> Reporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn dashboard(&self) -> Result<DashboardSummary> {
        Ok(dashboard_summary(&self.store.list_goals()?))
    }

    pub fn report(&self) -> Result<FinancialReport> {
        let goals = self.store.list_goals()?;
        let transactions = self.store.list_transactions()?;
        Ok(build_report(&goals, &transactions))
    }

    /// Plans for every stored goal
    pub fn plans(&self, today: NaiveDate) -> Result<Vec<GoalPlan>> {
        Ok(self
            .store
            .list_goals()?
            .into_iter()
            .map(|g| GoalPlan::for_goal(g, today))
            .collect())
    }

    /// Plan for a single goal
    pub fn plan(&self, goal_id: i64, today: NaiveDate) -> Result<GoalPlan> {
        let goal = self
            .store
            .get_goal(goal_id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        Ok(GoalPlan::for_goal(goal, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i64, name: &str, target: f64, current: f64) -> Goal {
        Goal {
            id,
            name: name.to_string(),
            target,
            current,
            deadline: "2024-06-08".to_string(),
        }
    }

    fn tx(amount: f64, category: Category) -> Transaction {
        Transaction {
            id: 0,
            amount,
            category,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_dashboard_summary() {
        let goals = vec![goal(1, "Car", 12000.0, 2000.0), goal(2, "Trip", 3000.0, 500.0)];
        let summary = dashboard_summary(&goals);
        assert_eq!(summary.goal_count, 2);
        assert_eq!(summary.total_target, 15000.0);
        assert_eq!(summary.total_current, 2500.0);
        assert_eq!(summary.goals[1].name, "Trip");
    }

    #[test]
    fn test_expense_distribution_groups_and_orders() {
        let txs = vec![
            tx(40.0, Category::Transport),
            tx(100.0, Category::Kitchen),
            tx(60.0, Category::Transport),
            tx(800.0, Category::Rent),
        ];
        let dist = expense_distribution(&txs);
        let categories: Vec<Category> = dist.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![Category::Kitchen, Category::Rent, Category::Transport]
        );
        assert_eq!(dist[2].amount, 100.0);
        assert_eq!(dist[2].transaction_count, 2);
        assert_eq!(dist[1].percentage, 80.0);
    }

    #[test]
    fn test_goal_distribution() {
        let goals = vec![goal(1, "A", 750.0, 0.0), goal(2, "B", 250.0, 0.0)];
        let dist = goal_distribution(&goals);
        assert_eq!(dist[0].percentage, 75.0);
        assert_eq!(dist[1].percentage, 25.0);
    }

    #[test]
    fn test_build_report() {
        let goals = vec![goal(1, "Car", 1000.0, 250.0), goal(2, "Phone", 500.0, 250.0)];
        let txs = vec![tx(50.0, Category::Kitchen), tx(50.0, Category::Other)];
        let report = build_report(&goals, &txs);

        assert_eq!(report.total_savings, 500.0);
        assert_eq!(report.total_expenses, 100.0);
        assert_eq!(report.transaction_count, 2);
        // 500 / 100 * 10 = 50
        assert_eq!(report.health_score, 50);
        assert_eq!(report.goal_progress[0].completion_percentage, Some(25.0));
        assert_eq!(report.goal_progress[1].completion_percentage, Some(50.0));
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], &[]);
        assert!(report.goal_distribution.is_empty());
        assert!(report.expense_distribution.is_empty());
        assert_eq!(report.total_expenses, 0.0);
        assert_eq!(report.health_score, 0);
    }

    #[test]
    fn test_goal_plan() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        // Deadline 2024-06-08 is 90 days after 2024-03-10
        let plan = GoalPlan::for_goal(goal(1, "Car", 12000.0, 2000.0), today);
        assert_eq!(plan.advice.as_pair(), (3333.33, 3));
    }

    #[test]
    fn test_reporter_plan_by_id() {
        let db = crate::db::Database::in_memory().unwrap();
        db.add_goal(&NewGoal::new("Car", 12000.0, 2000.0, "2024-06-08"))
            .unwrap();
        let trip = db
            .add_goal(&NewGoal::new("Trip", 600.0, 0.0, "2024-05-09"))
            .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let reporter = Reporter::new(&db);
        let plan = reporter.plan(trip.id, today).unwrap();
        assert_eq!(plan.goal.name, "Trip");
        // 60 days ahead
        assert_eq!(plan.advice.as_pair(), (300.0, 2));

        assert!(matches!(
            reporter.plan(9999, today),
            Err(Error::NotFound(_))
        ));
    }
}
