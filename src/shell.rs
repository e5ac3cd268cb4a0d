//! The interactive shell and single-shot command mode.
//!
//! # Public API
//! - [`run_interactive`]: Welcome screen, then prompt, normalize and dispatch
//!   until an exit word or end of input
//! - [`run_single`]: Execute one command from the process arguments
//! - [`parse_line`]: Split an input line into a canonical command and its
//!   arguments

use crate::commands::{dispatch, operations, print_unknown, print_welcome, Session};
use crate::core::{
    command_table::{normalize, CommandTable},
    dirs::get_history_file,
    error::{GitCliError, Result},
    hook_templates::HookCatalog,
    notify::Notifier,
    output::{print_error, print_info, print_menu, print_success, print_warning},
    prompt::{self, Prompter, StdinPrompter, Strength},
    query::RepoQuery,
    runner::CommandRunner,
};
use colored::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Commands that work outside a repository.
const REPOSITORY_FREE: [&str; 2] = ["clone", "help"];

/// Tab completion over the command table. Only the first word completes.
pub struct CommandCompleter {
    words: Vec<&'static str>,
}

impl CommandCompleter {
    pub fn new(table: &CommandTable) -> Self {
        Self {
            words: table.completion_words(),
        }
    }

    pub fn candidates(&self, prefix: &str) -> Vec<&'static str> {
        let prefix = prefix.to_lowercase();
        self.words
            .iter()
            .copied()
            .filter(|word| word.starts_with(&prefix))
            .collect()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        if before.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let pairs = self
            .candidates(before)
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((0, pairs))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}

/// Canonical command and trailing arguments for an input line. A line
/// whose words together name a command (`list branch`) is taken whole;
/// otherwise the first word is the command.
pub fn parse_line(table: &CommandTable, line: &str) -> Option<(String, Vec<String>)> {
    let mut words = line.split_whitespace();
    let first = words.next()?;

    let whole = normalize(table, line);
    if table.find(&whole).is_some() || table.is_exit(&whole) {
        return Some((whole, Vec::new()));
    }
    Some((normalize(table, first), words.map(str::to_string).collect()))
}

fn prompt_text(runner: &dyn CommandRunner) -> String {
    let branch = RepoQuery::new(runner).current_branch();
    format!("{} {} ", format!("[{branch}]").magenta(), ">".cyan())
}

/// Offer `git init`, clone or exit when started outside a repository.
/// Returns whether the shell should continue.
fn bootstrap_repository(
    runner: &dyn CommandRunner,
    prompter: &mut dyn Prompter,
    table: &CommandTable,
    hooks: &HookCatalog,
) -> Result<bool> {
    print_warning("Not a git repository.");
    print_info("Options:");
    print_menu(&[
        "Initialize git in current directory (git init)",
        "Clone a repository",
        "Exit",
    ]);

    match prompt::choose(prompter, "Choose option (1-3):", 3)? {
        Some(1) => {
            let question = format!("Initialize git in {}?", runner.workdir().display());
            if !prompt::confirm(prompter, &question, Strength::Low)? {
                print_info("Initialization canceled.");
                return Ok(false);
            }
            if runner.git(&["init"], false).is_none() {
                print_error("git init failed.");
                return Err(GitCliError::NotInGitRepo);
            }
            print_success("Git repository initialized!");
            Ok(true)
        }
        Some(2) => {
            let mut session = Session::new(runner, prompter, Notifier::from_env(), table, hooks);
            operations::clone(&mut session)?;
            Ok(false)
        }
        _ => Ok(false),
    }
}

pub fn run_interactive(
    runner: &dyn CommandRunner,
    table: &CommandTable,
    hooks: &HookCatalog,
) -> Result<()> {
    let mut prompter = StdinPrompter;
    if !RepoQuery::new(runner).is_repository()
        && !bootstrap_repository(runner, &mut prompter, table, hooks)?
    {
        return Ok(());
    }

    let mut editor = Editor::<CommandCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandCompleter::new(table)));
    let history = match get_history_file() {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("history disabled: {e}");
            None
        }
    };
    if let Some(path) = &history {
        if let Err(e) = editor.load_history(path) {
            log::debug!("no history loaded from {}: {e}", path.display());
        }
    }

    let query = RepoQuery::new(runner);
    print_welcome(&query.repo_name(), &query.current_branch());
    let notifier = Notifier::from_env();

    loop {
        let line = match editor.readline(&prompt_text(runner)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                print_info("Type 'quit' to exit.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let Some((token, args)) = parse_line(table, &line) else {
            continue;
        };
        if let Err(e) = editor.add_history_entry(line.trim()) {
            log::debug!("history entry not recorded: {e}");
        }

        if table.is_exit(&token) {
            break;
        }

        let mut session = Session::new(runner, &mut prompter, notifier, table, hooks);
        match dispatch(&mut session, &token, &args) {
            Ok(true) => {}
            Ok(false) => print_unknown(&token),
            Err(GitCliError::InputClosed) => break,
            Err(e) => print_error(&e.to_string()),
        }
    }

    print_info("Exiting GitCLI...");
    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            log::warn!("could not save history to {}: {e}", path.display());
        }
    }
    Ok(())
}

/// Run one command. Returns `false` for an unknown command or when a
/// repository is required and missing.
pub fn run_single(
    runner: &dyn CommandRunner,
    table: &CommandTable,
    hooks: &HookCatalog,
    command: &str,
    args: &[String],
) -> Result<bool> {
    let token = normalize(table, command);
    if !REPOSITORY_FREE.contains(&token.as_str()) && !RepoQuery::new(runner).is_repository() {
        print_error("Not a git repository.");
        return Ok(false);
    }

    let mut prompter = StdinPrompter;
    let mut session = Session::new(runner, &mut prompter, Notifier::from_env(), table, hooks);
    let handled = dispatch(&mut session, &token, args)?;
    if !handled {
        print_unknown(&token);
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command_table::COMMAND_TABLE;
    use crate::core::hook_templates::HOOK_CATALOG;
    use crate::core::runner::testing::ScriptedRunner;

    fn parsed(line: &str) -> Option<(String, Vec<String>)> {
        parse_line(&COMMAND_TABLE, line)
    }

    #[test]
    fn test_parse_line_splits_arguments() {
        let (token, args) = parsed("save fix the login bug").unwrap();
        assert_eq!(token, "save");
        assert_eq!(args, vec!["fix", "the", "login", "bug"]);

        let (token, args) = parsed("switchbranch develop").unwrap();
        assert_eq!(token, "switch-branch");
        assert_eq!(args, vec!["develop"]);
    }

    #[test]
    fn test_parse_line_accepts_spaced_command_names() {
        assert_eq!(parsed("  List  Branch "), Some(("list-branch".to_string(), Vec::new())));
        assert_eq!(parsed("stash pop"), Some(("stash-pop".to_string(), Vec::new())));
        assert_eq!(parsed("QUIT"), Some(("quit".to_string(), Vec::new())));
    }

    #[test]
    fn test_parse_line_ignores_blank_input() {
        assert_eq!(parsed("   "), None);
    }

    #[test]
    fn test_completion_candidates() {
        let completer = CommandCompleter::new(&COMMAND_TABLE);
        let stash = completer.candidates("stash-");
        assert!(stash.contains(&"stash-pop"));
        assert!(stash.iter().all(|w| w.starts_with("stash-")));
        assert!(completer.candidates("q").contains(&"quit"));
        assert!(completer.candidates("zzz").is_empty());
    }

    #[test]
    fn test_single_shot_outside_repository_fails() {
        let runner = ScriptedRunner::new().fail("git rev-parse --is-inside-work-tree", "fatal: not a git repository");
        let handled = run_single(&runner, &COMMAND_TABLE, &HOOK_CATALOG, "status", &[]).unwrap();
        assert!(!handled);
        assert_eq!(runner.calls(), vec!["git rev-parse --is-inside-work-tree"]);
    }

    #[test]
    fn test_single_shot_help_needs_no_repository() {
        let runner = ScriptedRunner::new().fail("git rev-parse --is-inside-work-tree", "fatal: not a git repository");
        assert!(run_single(&runner, &COMMAND_TABLE, &HOOK_CATALOG, "help", &[]).unwrap());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_single_shot_unknown_command() {
        let runner = ScriptedRunner::new().ok("git rev-parse --is-inside-work-tree", "true");
        assert!(!run_single(&runner, &COMMAND_TABLE, &HOOK_CATALOG, "frobnicate", &[]).unwrap());
    }
}
