use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{apply, plan, rules};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

#[derive(Parser)]
#[command(name = "tfnorm")]
#[command(version = VERSION)]
#[command(about = "Normalize Terraform singleton resource and block names")]
struct Cli {
    /// Emit a JSON response envelope instead of plain output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the fixed infra files in place
    Apply(apply::ApplyArgs),
    /// Preview replacements without writing anything
    Plan(plan::PlanArgs),
    /// Show the active rule set and target files
    Rules(rules::RulesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mode = if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Raw
    };

    match mode {
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli.command);
            let _ = output::print_json_result(json_result);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
        ResponseMode::Raw => match commands::run_raw(cli.command) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                eprintln!("error[{}]: {}", err.code.as_str(), err.message);
                let exit_code = output::exit_code_for_error(err.code);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        },
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
