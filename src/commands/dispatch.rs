//! Routes a normalized command token to its handler.

use crate::commands::{
    advanced, branches, conflicts, help, hooks, operations, session::Session, settings, stash,
    workflows,
};
use crate::core::{
    error::Result,
    output::{print_error, print_info},
};

fn first(args: &[String]) -> Option<&str> {
    args.first().map(String::as_str)
}

/// Run the handler for `token`. Returns `false` for an unknown token
/// without running anything.
pub fn dispatch(s: &mut Session, token: &str, args: &[String]) -> Result<bool> {
    log::debug!("dispatch '{token}' args={args:?}");

    match token {
        "save" => {
            let message = (!args.is_empty()).then(|| args.join(" "));
            workflows::save(s, message)?
        }
        "work" => {
            let branch = (!args.is_empty()).then(|| args.join(" "));
            workflows::work(s, branch.as_deref())?
        }
        "done" => workflows::done(s)?,
        "sync" => workflows::sync(s)?,
        "undo" => workflows::undo(s)?,
        "status" => workflows::status(s)?,
        "config" => settings::manage(s)?,

        "commit" => operations::commit(s)?,
        "push" => operations::push(s)?,
        "pull" => operations::pull(s)?,
        "fetch" => operations::fetch(s)?,
        "clone" => operations::clone(s)?,
        "stage" => operations::stage(s)?,
        "log" => operations::log(s)?,
        "diff" => operations::diff(s)?,
        "diff-staged" => operations::diff_staged(s)?,
        "quick-push" | "qp" => operations::quick_push(s)?,

        "switch-branch" => branches::switch_branch(s, first(args))?,
        "add-branch" => branches::add_branch(s, first(args))?,
        "delete-branch" => branches::delete_branch(s, first(args))?,
        "rename-branch" => branches::rename_branch(s)?,
        "list-branch" => branches::list_branches(s)?,

        "stash" => stash::stash(s)?,
        "stash-pop" => stash::stash_pop(s)?,
        "stash-apply" => stash::stash_apply(s)?,
        "stash-list" => stash::stash_list(s)?,
        "stash-drop" => stash::stash_drop(s)?,
        "stash-show" => stash::stash_show(s)?,

        "resolve-conflicts" => conflicts::resolve(s)?,
        "check-conflicts" => conflicts::check(s)?,
        "hooks" => hooks::manage(s)?,
        "list-hooks" => hooks::list(s)?,

        "remotes" => advanced::remotes(s)?,
        "reset" => advanced::reset(s)?,
        "amend" => advanced::amend(s)?,
        "help" => help::print_help(s.table),

        _ => return Ok(false),
    }
    Ok(true)
}

/// Report an unrecognized command.
pub fn print_unknown(token: &str) {
    print_error(&format!("Unknown command: {token}"));
    print_info("Type 'help' to see available commands or press Tab for auto-complete.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::testing::session;
    use crate::core::command_table::COMMAND_TABLE;
    use crate::core::prompt::testing::ScriptedPrompter;
    use crate::core::runner::testing::ScriptedRunner;

    #[test]
    fn test_unknown_token_runs_nothing() {
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::new(&[]);
        let handled = dispatch(&mut session(&runner, &mut prompter), "frobnicate", &[]).unwrap();
        assert!(!handled);
        assert!(runner.calls().is_empty());
        assert!(prompter.questions.is_empty());
    }

    #[test]
    fn test_help_is_handled_without_git() {
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::new(&[]);
        assert!(dispatch(&mut session(&runner, &mut prompter), "help", &[]).unwrap());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_every_table_command_is_routed() {
        // Handlers may prompt; a closed prompter still proves the route exists.
        for spec in COMMAND_TABLE.commands {
            let runner = ScriptedRunner::new();
            let mut prompter = ScriptedPrompter::new(&[]);
            let result = dispatch(&mut session(&runner, &mut prompter), spec.name, &[]);
            assert!(!matches!(result, Ok(false)), "{} is not routed", spec.name);
        }
    }

    #[test]
    fn test_save_joins_inline_message() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = ScriptedRunner::in_dir(dir.path()).ok("git diff --name-only", "a.txt");
        let mut prompter = ScriptedPrompter::new(&[]);
        let args = vec!["fix".to_string(), "the".to_string(), "bug".to_string()];
        dispatch(&mut session(&runner, &mut prompter), "save", &args).unwrap();
        assert!(runner.ran("git commit -m fix the bug"));
    }

    #[test]
    fn test_work_joins_branch_words() {
        let runner = ScriptedRunner::new().fail("git rev-parse --verify --quiet refs/heads/Login-Page", "");
        let mut prompter = ScriptedPrompter::new(&[""]);
        let args = vec!["Login".to_string(), "Page".to_string()];
        dispatch(&mut session(&runner, &mut prompter), "work", &args).unwrap();
        assert!(runner.ran("git checkout -b Login-Page"));
    }

    #[test]
    fn test_qp_alias_routes_to_quick_push() {
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::new(&[]);
        assert!(dispatch(&mut session(&runner, &mut prompter), "qp", &[]).unwrap());
        assert!(runner.ran("git remote"));
    }
}
