//! Integration tests for fintrack-core
//!
//! These tests exercise the full planner → store → report workflow.

use chrono::{Duration, NaiveDate};
use fintrack_core::{
    advisor,
    models::{Category, NewGoal, NewTransaction},
    Clock, Database, FinanceStore, FixedClock, Reporter, SystemClock,
};

fn deadline_from(today: NaiveDate, days: i64) -> String {
    (today + Duration::days(days)).to_string()
}

// =============================================================================
// Advisor against the real clock
// =============================================================================

#[test]
fn test_advisor_scenarios_with_system_clock() {
    // Deadlines are built from one reading of the clock; a run that straddles
    // midnight is repeated so both readings agree.
    for _ in 0..2 {
        let today = SystemClock.today();
        let pairs = [
            advisor::calculate_now(12000.0, 2000.0, &deadline_from(today, 90)).as_pair(),
            advisor::calculate_now(5000.0, 5000.0, &deadline_from(today, 10)).as_pair(),
            advisor::calculate_now(1000.0, 1500.0, &deadline_from(today, 60)).as_pair(),
            advisor::calculate_now(1000.0, 0.0, "not-a-date").as_pair(),
        ];
        if SystemClock.today() != today {
            continue;
        }

        assert_eq!(
            pairs,
            [(3333.33, 3), (0.0, 1), (-250.0, 2), (0.0, 1)]
        );
        return;
    }
    panic!("system date changed on every attempt");
}

// =============================================================================
// Planner → Report workflow
// =============================================================================

#[test]
fn test_planner_to_report_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    // Planner: analyse and save two goals
    let car = db
        .add_goal(&NewGoal::new("New car", 12000.0, 2000.0, "2024-06-08"))
        .unwrap();
    db.add_goal(&NewGoal::new("Holiday", 3000.0, 1000.0, "2024-02-01"))
        .unwrap();

    // Expenses view
    for (amount, category) in [
        (1200.0, Category::Rent),
        (300.0, Category::Kitchen),
        (150.0, Category::Transport),
        (350.0, Category::Kitchen),
    ] {
        db.add_transaction_on(&NewTransaction::new(amount, category), today)
            .unwrap();
    }

    let reporter = Reporter::new(&db);

    // Dashboard
    let dashboard = reporter.dashboard().unwrap();
    assert_eq!(dashboard.goal_count, 2);
    assert_eq!(dashboard.total_target, 15000.0);
    assert_eq!(dashboard.total_current, 3000.0);

    // Report
    let report = reporter.report().unwrap();
    assert_eq!(report.total_expenses, 2000.0);
    // 3000 / 2000 * 10 = 15
    assert_eq!(report.health_score, 15);
    let kitchen = report
        .expense_distribution
        .iter()
        .find(|c| c.category == Category::Kitchen)
        .unwrap();
    assert_eq!(kitchen.amount, 650.0);
    assert_eq!(kitchen.transaction_count, 2);
    assert_eq!(report.goal_progress[1].completion_percentage, Some(33.3));

    // Plans: the car is 90 days out, the holiday deadline has passed
    let plans = reporter.plans(today).unwrap();
    assert_eq!(plans[0].goal.id, car.id);
    assert_eq!(plans[0].advice.as_pair(), (3333.33, 3));
    assert_eq!(plans[1].advice.as_pair(), (2000.0, 1));

    let plan = reporter.plan(car.id, today).unwrap();
    assert_eq!(plan.advice.months(), 3);
    assert!(reporter.plan(999, today).is_err());
}

#[test]
fn test_health_score_edge_cases() {
    let db = Database::in_memory().unwrap();
    let reporter = Reporter::new(&db);

    // No savings, no transactions
    assert_eq!(reporter.report().unwrap().health_score, 0);

    // 500 saved against 50 spent clamps to 100
    db.add_goal(&NewGoal::new("Fund", 1000.0, 500.0, "2030-01-01"))
        .unwrap();
    db.add_transaction_on(
        &NewTransaction::new(50.0, Category::Other),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .unwrap();
    assert_eq!(reporter.report().unwrap().health_score, 100);
}

#[test]
fn test_stored_malformed_deadline_falls_back() {
    let db = Database::in_memory().unwrap();
    let goal = db
        .add_goal(&NewGoal::new("Someday", 800.0, 0.0, "31.12.2030"))
        .unwrap();

    let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    let plan = Reporter::new(&db).plan(goal.id, clock.today()).unwrap();
    assert!(plan.advice.is_fallback());
    assert_eq!(plan.advice.as_pair(), (0.0, 1));
}
