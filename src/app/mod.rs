// Application layer: runs parsed commands against an inventory and renders results.

pub mod commands;
pub mod run;
pub mod shell;

pub use commands::{execute, render, CommandContext, Outcome};
pub use run::{resolve_config, run};
pub use shell::{run_shell, ShellSummary};
