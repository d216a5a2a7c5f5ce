use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use tfnorm::log_status;
use tfnorm::rewrite::{self, FileReport, RewriteMode, COMPLETION_MESSAGE, DEFAULT_TARGETS};
use tfnorm::rules::singleton_rules;
use tfnorm::Error;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ApplyArgs {
    /// Directory containing the infra/ tree (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub root: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "command")]
pub enum ApplyOutput {
    #[serde(rename = "apply")]
    Apply {
        root: String,
        files: Vec<FileReport>,
        total_replacements: usize,
        files_changed: usize,
        files_skipped: usize,
        applied: bool,
    },
}

pub fn run_json(args: ApplyArgs) -> CmdResult<ApplyOutput> {
    run(args)
}

pub fn run_raw(args: ApplyArgs) -> tfnorm::Result<(String, i32)> {
    let (_, exit_code) = run(args)?;
    Ok((format!("{}\n", COMPLETION_MESSAGE), exit_code))
}

fn run(args: ApplyArgs) -> CmdResult<ApplyOutput> {
    let root = resolve_root(&args.root)?;

    let report = rewrite::rewrite(
        &root,
        DEFAULT_TARGETS,
        &singleton_rules(),
        RewriteMode::Write,
    )?;

    log_status!(
        "apply",
        "{} file(s) rewritten, {} replacement(s), {} target(s) missing",
        report.files_changed,
        report.total_replacements,
        report.files_skipped
    );

    Ok((
        ApplyOutput::Apply {
            root: args.root,
            files: report.files,
            total_replacements: report.total_replacements,
            files_changed: report.files_changed,
            files_skipped: report.files_skipped,
            applied: report.applied,
        },
        0,
    ))
}

pub(crate) fn resolve_root(root: &str) -> tfnorm::Result<PathBuf> {
    let path = PathBuf::from(root);
    if !path.is_dir() {
        return Err(Error::validation_invalid_argument(
            "root",
            format!("'{}' is not a directory", root),
        )
        .with_hint("Pass --root pointing at the checkout that contains infra/"));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn apply_rewrites_and_reports() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("infra/oracle/outputs.tf");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "output \"vcn_id\" { value = oci_core_vcn.main.id }\n",
        )
        .unwrap();

        let (output, exit_code) = run_json(ApplyArgs {
            root: dir.path().to_string_lossy().to_string(),
        })
        .unwrap();

        assert_eq!(exit_code, 0);
        let ApplyOutput::Apply {
            files_changed,
            files_skipped,
            total_replacements,
            applied,
            ..
        } = output;
        assert_eq!(files_changed, 1);
        assert_eq!(files_skipped, 3);
        assert_eq!(total_replacements, 1);
        assert!(applied);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "output \"vcn_id\" { value = oci_core_vcn.this.id }\n");
    }

    #[test]
    fn apply_with_no_targets_still_succeeds() {
        let dir = TempDir::new().unwrap();

        let (message, exit_code) = run_raw(ApplyArgs {
            root: dir.path().to_string_lossy().to_string(),
        })
        .unwrap();

        // The completion line is unconditional, even when nothing existed.
        assert_eq!(message, "Singleton logic applied!\n");
        assert_eq!(exit_code, 0);
    }

    #[test]
    fn apply_rejects_bad_root() {
        let err = run_json(ApplyArgs {
            root: "/nonexistent/tfnorm-root".to_string(),
        })
        .unwrap_err();

        assert_eq!(err.code, tfnorm::ErrorCode::ValidationInvalidArgument);
    }
}
