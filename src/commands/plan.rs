use clap::Args;
use serde::Serialize;

use tfnorm::rewrite::{self, FileReport, FileStatus, RewriteMode, DEFAULT_TARGETS};
use tfnorm::rules::singleton_rules;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct PlanArgs {
    /// Directory containing the infra/ tree (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub root: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "command")]
pub enum PlanOutput {
    #[serde(rename = "plan")]
    Plan {
        root: String,
        dry_run: bool,
        files: Vec<FileReport>,
        total_replacements: usize,
        files_changed: usize,
        files_skipped: usize,
    },
}

pub fn run_json(args: PlanArgs) -> CmdResult<PlanOutput> {
    run(args)
}

pub fn run_raw(args: PlanArgs) -> tfnorm::Result<(String, i32)> {
    let (output, exit_code) = run(args)?;
    let PlanOutput::Plan {
        files,
        total_replacements,
        files_changed,
        ..
    } = output;

    let mut out = String::new();
    for file in &files {
        let line = match file.status {
            FileStatus::Rewritten => {
                format!("{}: {} replacement(s)\n", file.file, file.replacements)
            }
            FileStatus::Unchanged => format!("{}: unchanged\n", file.file),
            FileStatus::Missing => format!("{}: missing (skipped)\n", file.file),
        };
        out.push_str(&line);
    }
    out.push_str(&format!(
        "{} replacement(s) pending across {} file(s)\n",
        total_replacements, files_changed
    ));

    Ok((out, exit_code))
}

fn run(args: PlanArgs) -> CmdResult<PlanOutput> {
    let root = crate::commands::apply::resolve_root(&args.root)?;

    let report = rewrite::rewrite(
        &root,
        DEFAULT_TARGETS,
        &singleton_rules(),
        RewriteMode::Plan,
    )?;

    Ok((
        PlanOutput::Plan {
            root: args.root,
            dry_run: true,
            files: report.files,
            total_replacements: report.total_replacements,
            files_changed: report.files_changed,
            files_skipped: report.files_skipped,
        },
        0,
    ))
}
