//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use fintrack_core::db::{Database, DB_KEY_ENV};

/// Open the database, encrypted when FINTRACK_DB_KEY is set
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).with_context(|| format!("Failed to open database at {}", db_path.display()))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    if db.is_encrypted() {
        println!("   🔒 Encryption: ENABLED ({})", DB_KEY_ENV);
    } else {
        println!("   Encryption: off (set {} to enable)", DB_KEY_ENV);
    }
    println!(
        "   Goals: {}, expenses: {}",
        db.count_goals()?,
        db.count_transactions()?
    );

    println!("✅ Database ready!");
    println!();
    println!("Next steps:");
    println!("  1. Plan a goal: fintrack goals add --name Car --target 12000 --deadline 2026-01-01");
    println!("  2. Start web UI: fintrack serve");

    Ok(())
}
