//! Dashboard and report command implementations

use anyhow::Result;
use fintrack_core::{Config, Database, Reporter};

use super::truncate;

const BAR_WIDTH: usize = 30;

/// Horizontal bar scaled against `max`
pub fn bar(value: f64, max: f64) -> String {
    if !(max > 0.0) || !(value > 0.0) {
        return String::new();
    }
    let filled = ((value / max).min(1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

pub fn cmd_dashboard(db: &Database, config: &Config) -> Result<()> {
    let summary = Reporter::new(db).dashboard()?;
    let cur = &config.currency;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💰 FinTrack Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Goals:           {}", summary.goal_count);
    println!("  Total target:    {:.2}{}", summary.total_target, cur);
    println!("  Total saved:     {:.2}{}", summary.total_current, cur);
    println!();

    if summary.goals.is_empty() {
        println!("  No data yet. Start from the goal planner:");
        println!("    fintrack goals add --name Car --target 12000 --deadline 2026-01-01");
        return Ok(());
    }

    println!("  📊 Target vs saved");
    let max = summary
        .goals
        .iter()
        .map(|g| g.target.max(g.current))
        .fold(0.0, f64::max);
    for goal in &summary.goals {
        println!(
            "   {:<20} target {:<30} {:.2}{}",
            truncate(&goal.name, 20),
            bar(goal.target, max),
            goal.target,
            cur
        );
        println!(
            "   {:<20} saved  {:<30} {:.2}{}",
            "",
            bar(goal.current, max),
            goal.current,
            cur
        );
    }
    println!();

    Ok(())
}

pub fn cmd_report(db: &Database, config: &Config) -> Result<()> {
    let report = Reporter::new(db).report()?;
    let cur = &config.currency;

    println!();
    println!("📈 Financial Report");
    println!("   ─────────────────────────────────────────────────────────────");

    println!();
    println!("   Goal distribution");
    if report.goal_distribution.is_empty() {
        println!("   (no goals)");
    }
    for share in &report.goal_distribution {
        println!(
            "   {:<20} {:<30} {:>5.1}%",
            truncate(&share.name, 20),
            bar(share.percentage, 100.0),
            share.percentage
        );
    }

    println!();
    println!("   Expense distribution");
    if report.expense_distribution.is_empty() {
        println!("   (no expenses)");
    }
    for total in &report.expense_distribution {
        println!(
            "   {:<20} {:<30} {:>5.1}%  {:.2}{} ({})",
            total.category.label(),
            bar(total.percentage, 100.0),
            total.percentage,
            total.amount,
            cur,
            total.transaction_count
        );
    }

    println!();
    println!("   Goal progress");
    for row in &report.goal_progress {
        let completion = row
            .completion_percentage
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:<20} {:>11.2}{} / {:>11.2}{}  {:>7}  due {}",
            truncate(&row.goal.name, 20),
            row.goal.current,
            cur,
            row.goal.target,
            cur,
            completion,
            row.goal.deadline
        );
    }

    println!();
    println!("   Total savings:   {:.2}{}", report.total_savings, cur);
    println!(
        "   Total expenses:  {:.2}{} ({} transactions)",
        report.total_expenses, cur, report.transaction_count
    );
    println!("   ❤️  Health score: {}/100", report.health_score);
    println!();

    Ok(())
}
