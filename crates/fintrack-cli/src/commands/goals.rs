//! Goal planner command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fintrack_core::models::NewGoal;
use fintrack_core::{advisor, Advice, Config, Database, FinanceStore, Reporter};

use super::truncate;

/// Print the recommendation line for a piece of advice
fn print_advice(advice: &Advice, currency: &str) {
    println!("   💡 {}", advice.message(currency));
    if let Some(reason) = advice.fallback_reason() {
        println!("   ⚠️  Could not plan this goal ({})", reason);
    }
}

pub fn cmd_goals_list(db: &Database, config: &Config, today: NaiveDate) -> Result<()> {
    let plans = Reporter::new(db).plans(today)?;

    if plans.is_empty() {
        println!("No goals yet. Start from the goal planner:");
        println!("  fintrack goals add --name Car --target 12000 --deadline 2026-01-01");
        return Ok(());
    }

    let cur = &config.currency;

    println!();
    println!("🎯 Goals");
    println!("   ─────────────────────────────────────────────────────────────────────");
    println!(
        "   {:>4}  {:<20} {:>12} {:>12}  {:<10} {:>12}",
        "ID", "Name", "Target", "Saved", "Deadline", "Per month"
    );

    for plan in &plans {
        let goal = &plan.goal;
        println!(
            "   {:>4}  {:<20} {:>11.2}{} {:>11.2}{}  {:<10} {:>11.2}{} x{}",
            goal.id,
            truncate(&goal.name, 20),
            goal.target,
            cur,
            goal.current,
            cur,
            truncate(&goal.deadline, 10),
            plan.advice.monthly_amount(),
            cur,
            plan.advice.months(),
        );
    }

    println!();
    Ok(())
}

/// Analyse a goal, save it and print the advice
pub fn cmd_goals_add(
    db: &Database,
    config: &Config,
    today: NaiveDate,
    name: &str,
    target: f64,
    current: f64,
    deadline: &str,
) -> Result<()> {
    let goal = db
        .add_goal(&NewGoal::new(name, target, current, deadline))
        .context("Failed to save goal")?;

    let advice = advisor::calculate(goal.target, goal.current, &goal.deadline, today);

    println!("✅ Goal '{}' saved (id {})", goal.name, goal.id);
    print_advice(&advice, &config.currency);

    Ok(())
}

/// Run the advisor without persisting anything
pub fn cmd_advise(config: &Config, today: NaiveDate, target: f64, current: f64, deadline: &str) -> Result<()> {
    let advice = advisor::calculate(target, current, deadline, today);
    print_advice(&advice, &config.currency);
    Ok(())
}
