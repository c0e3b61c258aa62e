//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db)
//! - `goals` - Goal planner commands (list, add) and the stand-alone advisor
//! - `expenses` - Expense commands (list, add) and the category list
//! - `reports` - Dashboard and report views
//! - `export` - CSV/JSON export and full backup/restore
//! - `serve` - Web server command

pub mod core;
pub mod expenses;
pub mod export;
pub mod goals;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use goals::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
