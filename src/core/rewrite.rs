//! Rewrite engine — apply a rule set to a fixed list of files in place.
//!
//! Targets are processed strictly in order, one at a time: existence check,
//! full read, rule fold, truncating write, then the next target. A missing
//! target is an expected per-environment condition and is skipped silently.
//! Any other I/O failure (unreadable, unwritable, non-UTF-8 content)
//! propagates immediately and aborts the run; files already processed stay
//! mutated and later targets are never touched. Writes are not atomic.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::rules::RuleSet;

/// The infrastructure files this tool was built to normalize, relative to
/// the repo root. Fixed at build time, not discovered.
pub const DEFAULT_TARGETS: &[&str] = &[
    "infra/oracle/main.tf",
    "infra/oracle/outputs.tf",
    "infra/azure/main.tf",
    "infra/azure/outputs.tf",
];

/// Printed to stdout after every successful run, changed files or not.
pub const COMPLETION_MESSAGE: &str = "Singleton logic applied!";

/// Whether to write results back to disk or only report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Compute replacements without touching any file.
    Plan,
    /// Overwrite each existing target with its transformed text.
    Write,
}

/// What happened to a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// At least one replacement was made.
    Rewritten,
    /// File exists but no pattern matched.
    Unchanged,
    /// No regular file at this path; skipped.
    Missing,
}

/// Per-target outcome.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Target path relative to the root.
    pub file: String,
    pub status: FileStatus,
    /// Number of replacements across all rules.
    pub replacements: usize,
}

/// The full result of a rewrite run.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    pub files: Vec<FileReport>,
    pub total_replacements: usize,
    pub files_changed: usize,
    pub files_skipped: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

/// Apply `rules` to each of `targets` under `root`, in order.
///
/// In `Write` mode every existing target is overwritten with its transformed
/// text, replacements or not, exactly as the one-shot tool has always done.
/// In `Plan` mode nothing on disk changes.
pub fn rewrite(
    root: &Path,
    targets: &[&str],
    rules: &RuleSet,
    mode: RewriteMode,
) -> Result<RewriteReport> {
    let mut files = Vec::with_capacity(targets.len());
    let mut total_replacements = 0;
    let mut files_changed = 0;
    let mut files_skipped = 0;

    for target in targets {
        let path = root.join(target);

        if !path.is_file() {
            files_skipped += 1;
            files.push(FileReport {
                file: (*target).to_string(),
                status: FileStatus::Missing,
                replacements: 0,
            });
            continue;
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::target_read_failed(*target, e.to_string()))?;

        let (new_content, replacements) = rules.apply(&content);

        if mode == RewriteMode::Write {
            std::fs::write(&path, &new_content)
                .map_err(|e| Error::target_write_failed(*target, e.to_string()))?;
        }

        let status = if replacements > 0 {
            files_changed += 1;
            FileStatus::Rewritten
        } else {
            FileStatus::Unchanged
        };
        total_replacements += replacements;

        files.push(FileReport {
            file: (*target).to_string(),
            status,
            replacements,
        });
    }

    Ok(RewriteReport {
        files,
        total_replacements,
        files_changed,
        files_skipped,
        applied: mode == RewriteMode::Write,
    })
}
