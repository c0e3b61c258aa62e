//! Export and full backup/restore command implementations

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fintrack_core::{Database, ExportFormat, ExportKind, FullBackup};

/// Export goals or transactions to a file, or stdout when no file is given
pub fn cmd_export_table(
    db: &Database,
    kind: ExportKind,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let content = db.export(kind, format)?;

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(content.as_bytes())?;
            eprintln!("✅ Exported {} to {}", kind.as_str(), path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}

pub fn cmd_export_full(db: &Database, output: &Path) -> Result<()> {
    // Check output doesn't already exist
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    println!("📦 Exporting full database backup...");

    let backup = db.export_full_backup()?;

    let json =
        serde_json::to_string_pretty(&backup).context("Failed to serialize backup to JSON")?;

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    file.write_all(json.as_bytes())?;

    println!("✅ Full backup exported to: {}", output.display());
    println!("   Version: {}", backup.metadata.version);
    println!("   Total records: {}", backup.metadata.total_records);
    println!();
    println!("   Goals: {}", backup.goals.len());
    println!("   Transactions: {}", backup.transactions.len());

    Ok(())
}

/// Import a full JSON backup
pub fn cmd_import_full(db: &Database, input: &Path, clear: bool) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read backup file: {}", input.display()))?;
    let backup: FullBackup =
        serde_json::from_str(&json).context("Failed to parse backup file")?;

    println!(
        "📥 Importing backup (version {}, {} records)...",
        backup.metadata.version, backup.metadata.total_records
    );
    if clear {
        println!("   ⚠️  Clearing existing goals and expenses first");
    }

    let stats = db.import_full_backup(&backup, clear)?;

    println!("✅ Import complete");
    println!(
        "   Goals: {} imported, {} skipped",
        stats.goals_imported, stats.goals_skipped
    );
    println!(
        "   Transactions: {} imported, {} skipped",
        stats.transactions_imported, stats.transactions_skipped
    );

    Ok(())
}
