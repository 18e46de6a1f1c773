//! Command-line interface module for downsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Resolving the default downloads root
//! - The flat, non-recursive scan of the target directory
//! - Sort orchestration and dry-run analysis

use crate::organizer::{ConflictPolicy, MoveOutcome, Sorter};
use crate::output::OutputFormatter;
use crate::rules::{Category, RuleSet};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sort the files in a downloads directory into category subfolders.
#[derive(Debug, Parser)]
#[command(
    name = "downsort",
    version,
    about = "Sort a downloads directory into category subfolders by file extension"
)]
pub struct Cli {
    /// Directory to sort. Defaults to the user's Downloads folder.
    pub path: Option<PathBuf>,

    /// Analyze and report without creating folders or moving files.
    #[arg(long)]
    pub dry_run: bool,

    /// What to do when the destination already holds a same-named file.
    #[arg(long = "on-conflict", value_enum, default_value_t = ConflictPolicy::Skip)]
    pub on_conflict: ConflictPolicy,
}

/// Represents a scanned file with its classification.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// The name of the file.
    pub name: String,
    /// The full path to the file.
    pub path: PathBuf,
    /// The classified category, or `None` when no rule matches.
    pub category: Option<Category>,
}

/// Runs the CLI application with the given arguments.
///
/// This is the main entry point for CLI operations. It resolves the target
/// directory, builds the standard ruleset, and dispatches to the sort or
/// dry-run pass.
///
/// # Examples
///
/// ```no_run
/// use downsort::cli::{Cli, run_cli};
/// use downsort::organizer::ConflictPolicy;
/// use std::path::PathBuf;
///
/// let cli = Cli {
///     path: Some(PathBuf::from("/home/user/Downloads")),
///     dry_run: false,
///     on_conflict: ConflictPolicy::Skip,
/// };
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    let base_path = match &cli.path {
        Some(path) => path.clone(),
        None => downloads_root()?,
    };

    let rules = RuleSet::new();

    if cli.dry_run {
        dry_run_directory(&base_path, &rules)
    } else {
        sort_directory(&base_path, &rules, cli.on_conflict)
    }
}

/// Resolves the default downloads root, `<home>/Downloads`.
pub fn downloads_root() -> Result<PathBuf, String> {
    dirs::home_dir()
        .map(|home| home.join("Downloads"))
        .ok_or_else(|| "Could not determine the home directory".to_string())
}

/// Reads the flat listing of `base_path` and classifies each regular file.
///
/// Subdirectories are not entered; anything that is not a regular file is
/// ignored. Entries come back sorted by name so output order is stable.
fn scan_directory(base_path: &Path, rules: &RuleSet) -> Result<Vec<FileEntry>, String> {
    let entries = fs::read_dir(base_path)
        .map_err(|e| format!("Error reading directory {}: {}", base_path.display(), e))?;

    let mut files: Vec<FileEntry> = Vec::new();

    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            let name = entry.file_name().to_string_lossy().to_string();
            let category = rules.classify(&name);
            files.push(FileEntry {
                name,
                path: entry.path(),
                category,
            });
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Sorts the files of a directory into category subfolders.
///
/// This function:
/// 1. Reads the flat file listing of the directory
/// 2. Classifies each file against the ruleset (first match wins)
/// 3. Moves each classified file into its category folder, applying the
///    conflict policy when the destination name is taken
/// 4. Prints a per-category summary
///
/// Per-file failures are reported and the loop continues; unclassified files
/// are left untouched, so a second run over a sorted directory is a no-op.
pub fn sort_directory(
    base_path: &Path,
    rules: &RuleSet,
    policy: ConflictPolicy,
) -> Result<(), String> {
    OutputFormatter::info(&format!("Sorting contents of: {}", base_path.display()));

    let files = scan_directory(base_path, rules)?;
    let matched = files.iter().filter(|f| f.category.is_some()).count();
    let unmatched = files.len() - matched;

    if matched == 0 {
        OutputFormatter::plain("No files to sort.");
        if unmatched > 0 {
            OutputFormatter::plain(&format!(
                "{} file(s) left in place (no matching category).",
                unmatched
            ));
        }
        return Ok(());
    }

    let pb = OutputFormatter::create_progress_bar(matched as u64);
    let mut category_counts: HashMap<&'static str, usize> = HashMap::new();
    let mut sorted_total = 0usize;
    let mut skipped_total = 0usize;
    let mut sort_failed = false;

    for entry in &files {
        let Some(category) = entry.category else {
            continue;
        };
        let dir_name = category.dir_name();
        pb.set_message(entry.name.clone());

        match Sorter::move_to_category(base_path, &entry.path, dir_name, policy) {
            Ok(MoveOutcome::Moved { .. }) => {
                pb.println(format!(" ✓ {} moved to {}/", entry.name, dir_name));
                *category_counts.entry(dir_name).or_insert(0) += 1;
                sorted_total += 1;
            }
            Ok(MoveOutcome::Renamed { destination }) => {
                pb.println(format!(
                    " ⚠ {} already existed in {}/; moved as {}",
                    entry.name,
                    dir_name,
                    destination
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default()
                ));
                *category_counts.entry(dir_name).or_insert(0) += 1;
                sorted_total += 1;
            }
            Ok(MoveOutcome::Skipped { destination }) => {
                pb.println(format!(
                    " ⚠ {} skipped: {} already exists",
                    entry.name,
                    destination.display()
                ));
                skipped_total += 1;
            }
            Err(e) => {
                pb.println(format!(" ✗ {}: {}", entry.name, e));
                sort_failed = true;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    OutputFormatter::summary_table(&category_counts, sorted_total);

    if unmatched > 0 {
        OutputFormatter::plain(&format!(
            "{} file(s) left in place (no matching category).",
            unmatched
        ));
    }
    if skipped_total > 0 {
        OutputFormatter::warning(&format!(
            "{} file(s) skipped because the destination already exists.",
            skipped_total
        ));
    }
    if sort_failed {
        OutputFormatter::warning("Some files could not be sorted. Please review errors above.");
    } else {
        OutputFormatter::success("Sorting complete!");
    }

    Ok(())
}

/// Analyzes a directory without making any changes.
///
/// Performs the same scan and classification as [`sort_directory`] but moves
/// nothing and creates no folders; it prints each planned move and the
/// per-category summary.
pub fn dry_run_directory(base_path: &Path, rules: &RuleSet) -> Result<(), String> {
    OutputFormatter::dry_run_notice(&format!(
        "Analyzing contents of: {}",
        base_path.display()
    ));

    let files = scan_directory(base_path, rules)?;

    if files.iter().all(|f| f.category.is_none()) {
        OutputFormatter::plain("No files to sort.");
        return Ok(());
    }

    let mut category_counts: HashMap<&'static str, usize> = HashMap::new();
    let mut matched = 0usize;

    OutputFormatter::header("Planned moves");
    for entry in &files {
        let Some(category) = entry.category else {
            continue;
        };
        let dir_name = category.dir_name();
        OutputFormatter::plain(&format!(" - {} would move to {}/", entry.name, dir_name));
        *category_counts.entry(dir_name).or_insert(0) += 1;
        matched += 1;
    }

    OutputFormatter::summary_table(&category_counts, matched);

    let unmatched = files.len() - matched;
    if unmatched > 0 {
        OutputFormatter::plain(&format!(
            "{} file(s) would be left in place (no matching category).",
            unmatched
        ));
    }

    OutputFormatter::dry_run_notice("No files were modified.");
    Ok(())
}
