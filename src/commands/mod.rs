pub type CmdResult<T> = tfnorm::Result<(T, i32)>;

pub mod apply;
pub mod plan;
pub mod rules;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (tfnorm::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Apply(args) => dispatch!(args, apply),
        crate::Commands::Plan(args) => dispatch!(args, plan),
        crate::Commands::Rules(args) => dispatch!(args, rules),
    }
}

pub(crate) fn run_raw(command: crate::Commands) -> tfnorm::Result<(String, i32)> {
    match command {
        crate::Commands::Apply(args) => apply::run_raw(args),
        crate::Commands::Plan(args) => plan::run_raw(args),
        crate::Commands::Rules(args) => rules::run_raw(args),
    }
}
