use anyhow::Context;
use clap::Parser;
use gitcli::core::print_error;
use gitcli::{shell, GitRunner, COMMAND_TABLE, HOOK_CATALOG};

#[derive(Parser)]
#[command(name = "gitcli")]
#[command(about = "Interactive git shell with guided menus and smart workflows")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to run once (omit for the interactive shell)
    command: Option<String>,

    /// Arguments for the command, e.g. an inline commit message for `save`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let workdir = std::env::current_dir().context("cannot determine the current directory")?;
    log::debug!("working directory: {}", workdir.display());
    let runner = GitRunner::new(workdir);

    match cli.command {
        Some(command) => Ok(shell::run_single(
            &runner,
            &COMMAND_TABLE,
            &HOOK_CATALOG,
            &command,
            &cli.args,
        )?),
        None => {
            shell::run_interactive(&runner, &COMMAND_TABLE, &HOOK_CATALOG)?;
            Ok(true)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let code = match run(cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            print_error(&format!("{e:#}"));
            1
        }
    };
    std::process::exit(code);
}
