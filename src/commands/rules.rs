use clap::Args;
use serde::Serialize;

use tfnorm::rewrite::DEFAULT_TARGETS;
use tfnorm::rules::{singleton_rules, ReplaceRule};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RulesArgs {}

#[derive(Debug, Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    Rules {
        rules: Vec<ReplaceRule>,
        disjoint: bool,
        targets: Vec<String>,
    },
}

pub fn run_json(_args: RulesArgs) -> CmdResult<RulesOutput> {
    let set = singleton_rules();

    Ok((
        RulesOutput::Rules {
            disjoint: set.is_disjoint(),
            rules: set.rules().to_vec(),
            targets: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
        },
        0,
    ))
}

pub fn run_raw(args: RulesArgs) -> tfnorm::Result<(String, i32)> {
    let (output, exit_code) = run_json(args)?;
    let RulesOutput::Rules { rules, targets, .. } = output;

    let mut out = String::new();
    for rule in &rules {
        out.push_str(&format!("'{}' -> '{}'\n", rule.pattern, rule.replacement));
    }
    out.push('\n');
    for target in &targets {
        out.push_str(&format!("{}\n", target));
    }

    Ok((out, exit_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_output_lists_fixed_set() {
        let (output, exit_code) = run_json(RulesArgs {}).unwrap();
        assert_eq!(exit_code, 0);

        let RulesOutput::Rules {
            rules,
            disjoint,
            targets,
        } = output;
        assert_eq!(rules.len(), 6);
        assert!(disjoint);
        assert_eq!(targets.len(), 4);
        assert_eq!(rules[0].pattern, " \"main\" {");
        assert_eq!(rules[0].replacement, " \"this\" {");
    }

    #[test]
    fn raw_output_shows_patterns_and_targets() {
        let (out, _) = run_raw(RulesArgs {}).unwrap();
        assert!(out.contains("' \"main\" {' -> ' \"this\" {'"));
        assert!(out.contains("infra/azure/outputs.tf"));
    }
}
