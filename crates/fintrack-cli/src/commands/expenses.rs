//! Expense command implementations (list, add, categories)

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use fintrack_core::advisor::DEADLINE_FORMAT;
use fintrack_core::models::{Category, NewTransaction};
use fintrack_core::{Config, Database, FinanceStore};

pub fn cmd_expenses_list(db: &Database, config: &Config, limit: Option<usize>) -> Result<()> {
    let transactions = match limit {
        Some(n) => db.recent_transactions(n)?,
        None => db.list_transactions()?,
    };

    if transactions.is_empty() {
        println!("No expenses recorded. Add one with:");
        println!("  fintrack expenses add --amount 42.50 --category kitchen");
        return Ok(());
    }

    println!();
    println!("💸 Expenses");
    println!("   ─────────────────────────────────────────────");

    for tx in &transactions {
        println!(
            "   {:>4}  {}  {:<14} {:>11.2}{}",
            tx.id,
            tx.date,
            tx.category.label(),
            tx.amount,
            config.currency
        );
    }

    println!();
    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    config: &Config,
    today: NaiveDate,
    amount: f64,
    category: &str,
    date: Option<&str>,
) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;

    let mut new_tx = NewTransaction::new(amount, category);
    if let Some(date) = date {
        let date = NaiveDate::parse_from_str(date, DEADLINE_FORMAT)
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", date))?;
        new_tx = new_tx.on(date);
    }

    let tx = db
        .add_transaction_on(&new_tx, today)
        .context("Failed to save expense")?;

    println!(
        "✅ Recorded {:.2}{} for {} on {} (id {})",
        tx.amount, config.currency, tx.category, tx.date, tx.id
    );

    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");
    for category in Category::all() {
        println!("   {:<14} {}", category.as_str(), category.label());
    }
    println!();
    Ok(())
}
