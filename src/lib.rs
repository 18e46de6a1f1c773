//! downsort - sort a downloads directory into category subfolders
//!
//! This library provides the pieces behind the `downsort` binary: suffix
//! classification rules, the folder-ensure and file-move primitives with an
//! explicit destination-conflict policy, and the CLI orchestration that ties
//! them together in a single synchronous pass over a flat file listing.

pub mod cli;
pub mod organizer;
pub mod output;
pub mod rules;

pub use organizer::{ConflictPolicy, MoveOutcome, SortError, SortResult, Sorter};
pub use rules::{Category, Rule, RuleSet};

pub use cli::{Cli, run_cli};
