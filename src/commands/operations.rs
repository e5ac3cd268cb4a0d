//! Everyday git operations: commit, push, pull, fetch, clone, stage and the
//! read-only views.

use crate::commands::conflicts;
use crate::commands::session::Session;
use crate::core::{
    classify::{classify_merge, classify_push, MergeOutcome, PushOutcome},
    error::Result,
    notify::truncate,
    output::{print_error, print_info, print_menu, print_section_header, print_success, print_warning},
    prompt::Strength,
};

const NO_REMOTE: &str = "No remote repository configured.";

/// Print the standard notice and return `false` when no remote exists.
pub(crate) fn require_remote(s: &Session) -> bool {
    if s.query().has_remote() {
        true
    } else {
        print_error(NO_REMOTE);
        false
    }
}

pub(crate) fn stage_all(s: &Session) -> bool {
    if s.git(&["add", "."]) {
        print_success("All changes staged.");
        true
    } else {
        false
    }
}

pub(crate) fn commit_with_message(s: &Session, message: &str) -> bool {
    if s.git(&["commit", "-m", message]) {
        print_success(&format!("Changes committed with message: '{message}'"));
        s.notify(&format!("Commit successful: {}", truncate(message, 30)));
        true
    } else {
        print_error("Commit failed.");
        false
    }
}

/// Push the current branch, recovering from a diverged remote (force push
/// behind a `yes` gate) or a missing upstream. Returns whether the branch
/// ended up pushed.
pub(crate) fn push_current(s: &mut Session) -> Result<bool> {
    let branch = s.query().current_branch();
    print_info(&format!("Pushing branch '{branch}'..."));

    let output = s.runner.git_raw(&["push"]);
    match classify_push(&output) {
        PushOutcome::Success => {
            print_success(&format!("Changes pushed to '{branch}'!"));
            s.notify(&format!("Push to '{branch}' complete!"));
            Ok(true)
        }
        PushOutcome::NonFastForward => {
            print_warning("Push rejected: your branch is behind the remote branch.");
            if !s.confirm(
                "Do you want to force push and overwrite the remote?",
                Strength::High,
            )? {
                print_info("Force push canceled.");
                return Ok(false);
            }
            if s.git(&["push", "--force"]) {
                print_success(&format!("Force pushed to '{branch}'!"));
                s.notify(&format!("Force push to '{branch}' complete!"));
                Ok(true)
            } else {
                print_error("Force push failed.");
                Ok(false)
            }
        }
        PushOutcome::NoUpstream => {
            let Some(remote) = s.query().default_remote() else {
                print_error(NO_REMOTE);
                return Ok(false);
            };
            print_warning(&format!("Branch '{branch}' has no upstream branch."));
            if !s.confirm(
                &format!("Set upstream to '{remote}/{branch}' and push?"),
                Strength::Lenient,
            )? {
                print_info("Push canceled.");
                return Ok(false);
            }
            if s.git(&["push", "-u", &remote, &branch]) {
                print_success(&format!("Pushed '{branch}' and set upstream to '{remote}'."));
                s.notify(&format!("Push to '{branch}' complete!"));
                Ok(true)
            } else {
                print_error("Push failed.");
                Ok(false)
            }
        }
        PushOutcome::Failed(message) => {
            print_error(&format!("Push failed: {message}"));
            Ok(false)
        }
    }
}

pub fn commit(s: &mut Session) -> Result<()> {
    let query = s.query();
    if !query.has_staged_changes() {
        if !(query.has_unstaged_changes() || query.has_untracked_files()) {
            print_warning("No changes to commit.");
            return Ok(());
        }
        print_info("No staged changes.");
        if !s.confirm("Stage all changes?", Strength::Low)? {
            print_info("Commit canceled. Stage files with 'stage' first.");
            return Ok(());
        }
        if !stage_all(s) {
            return Ok(());
        }
    }

    let message = s.ask("Enter commit message:")?;
    if message.is_empty() {
        print_error("Commit message cannot be empty.");
        return Ok(());
    }
    commit_with_message(s, &message);
    Ok(())
}

pub fn push(s: &mut Session) -> Result<()> {
    if !require_remote(s) {
        return Ok(());
    }

    let query = s.query();
    if query.has_staged_changes() || query.has_unstaged_changes() {
        print_warning(
            "You have uncommitted changes. Commit them first or use 'quick-push' to do both.",
        );
        return Ok(());
    }

    push_current(s)?;
    Ok(())
}

pub fn pull(s: &mut Session) -> Result<()> {
    if !require_remote(s) {
        return Ok(());
    }

    let branch = s.query().current_branch();
    print_info(&format!("Pulling latest changes for '{branch}'..."));
    let output = s.runner.git_raw(&["pull"]);
    if !output.stdout.trim().is_empty() {
        println!("{}", output.stdout.trim_end());
    }

    match classify_merge(&output) {
        MergeOutcome::Clean => {
            print_success("Successfully pulled latest changes!");
            s.notify(&format!("Pull from '{branch}' complete!"));
        }
        MergeOutcome::Conflict => {
            print_warning("Pull produced merge conflicts.");
            conflicts::offer_resolution(s)?;
        }
        MergeOutcome::Failed(message) => print_error(&format!("Pull failed: {message}")),
    }
    Ok(())
}

pub fn fetch(s: &mut Session) -> Result<()> {
    if !require_remote(s) {
        return Ok(());
    }

    print_info("Fetching updates from remote...");
    if !s.git(&["fetch"]) {
        print_error("Fetch failed.");
        return Ok(());
    }
    print_success("Fetch complete.");

    let behind = s.query().behind_count();
    if behind > 0 {
        print_warning(&format!("Your branch is {behind} commit(s) behind remote."));
        print_info("Use 'pull' to merge remote changes.");
    }
    Ok(())
}

/// Directory `git clone <url>` creates when no folder is given.
pub fn clone_target_dir(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

pub fn clone(s: &mut Session) -> Result<()> {
    print_section_header("Clone Repository");
    let url = s.ask("Enter repository URL:")?;
    if url.is_empty() {
        print_error("URL cannot be empty.");
        return Ok(());
    }
    let folder = s.ask("Enter folder name (leave empty for default):")?;

    let mut args = vec!["clone", url.as_str()];
    if !folder.is_empty() {
        args.push(folder.as_str());
    }

    print_info("Cloning repository...");
    let output = s.runner.git_raw(&args);
    if output.is_success() {
        let target = if folder.is_empty() {
            clone_target_dir(&url)
        } else {
            folder
        };
        print_success("Repository cloned successfully!");
        print_info(&format!("Navigate to folder: cd {target}"));
    } else {
        print_error(&format!("Clone failed: {}", output.stderr.trim()));
    }
    Ok(())
}

pub fn stage(s: &mut Session) -> Result<()> {
    let query = s.query();
    if !(query.has_unstaged_changes() || query.has_untracked_files()) {
        print_warning("No unstaged changes to stage.");
        return Ok(());
    }

    print_section_header("Stage options");
    print_menu(&["Stage all changes (git add .)", "Stage specific files"]);
    match s.choose("Choose option (1/2):", 2)? {
        Some(1) => {
            stage_all(s);
        }
        Some(2) => {
            print_info("Changed files:");
            s.runner.git_show(&["status", "--short"]);
            let files = s.ask("Enter file paths (space-separated):")?;
            let paths: Vec<&str> = files.split_whitespace().collect();
            if paths.is_empty() {
                print_error("No files specified.");
                return Ok(());
            }
            let mut args = vec!["add", "--"];
            args.extend(&paths);
            if s.git(&args) {
                print_success(&format!("Files staged: {}", paths.join(" ")));
            }
        }
        _ => print_error("Invalid option."),
    }
    Ok(())
}

pub fn log(s: &mut Session) -> Result<()> {
    print_section_header("Recent Commits");
    s.runner
        .git_show(&["log", "--oneline", "--graph", "--decorate", "-10"]);
    Ok(())
}

pub fn diff(s: &mut Session) -> Result<()> {
    if !s.query().has_unstaged_changes() {
        print_warning("No unstaged changes to show.");
        return Ok(());
    }
    print_section_header("Unstaged Changes");
    s.runner.git_show(&["diff"]);
    Ok(())
}

pub fn diff_staged(s: &mut Session) -> Result<()> {
    if !s.query().has_staged_changes() {
        print_warning("No staged changes to show.");
        return Ok(());
    }
    print_section_header("Staged Changes");
    s.runner.git_show(&["diff", "--cached"]);
    Ok(())
}

pub fn quick_push(s: &mut Session) -> Result<()> {
    if !require_remote(s) {
        return Ok(());
    }
    if !s.query().has_any_changes() {
        print_warning("No changes to commit and push.");
        return Ok(());
    }

    print_section_header("Quick Push: Stage -> Commit -> Push");
    if !stage_all(s) {
        return Ok(());
    }

    let message = s.ask("Enter commit message:")?;
    if message.is_empty() {
        print_error("Commit message cannot be empty. Quick push canceled.");
        return Ok(());
    }
    if commit_with_message(s, &message) {
        push_current(s)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::testing::session;
    use crate::core::prompt::testing::ScriptedPrompter;
    use crate::core::runner::testing::ScriptedRunner;

    const REJECTED: &str = " ! [rejected]        main -> main (non-fast-forward)\nerror: failed to push some refs to 'origin'";

    fn clean_with_remote() -> ScriptedRunner {
        ScriptedRunner::new()
            .ok("git remote", "origin")
            .ok("git rev-parse --abbrev-ref HEAD", "main")
    }

    fn any_commit(runner: &ScriptedRunner) -> bool {
        runner.calls().iter().any(|c| c.starts_with("git commit"))
    }

    #[test]
    fn test_commit_declined_stage_all_changes_nothing() {
        let runner = ScriptedRunner::new().ok("git diff --name-only", "src/lib.rs");
        let mut prompter = ScriptedPrompter::new(&["n"]);
        commit(&mut session(&runner, &mut prompter)).unwrap();

        assert!(!runner.ran("git add ."));
        assert!(!any_commit(&runner));
        assert_eq!(prompter.questions, vec!["Stage all changes? (y/N):".to_string()]);
    }

    #[test]
    fn test_commit_empty_message_aborts() {
        let runner = ScriptedRunner::new().ok("git diff --cached --name-only", "a.txt");
        let mut prompter = ScriptedPrompter::new(&["   "]);
        commit(&mut session(&runner, &mut prompter)).unwrap();
        assert!(!any_commit(&runner));
    }

    #[test]
    fn test_commit_staged_changes() {
        let runner = ScriptedRunner::new().ok("git diff --cached --name-only", "a.txt");
        let mut prompter = ScriptedPrompter::new(&["Fix parser"]);
        commit(&mut session(&runner, &mut prompter)).unwrap();
        assert!(runner.ran("git commit -m Fix parser"));
    }

    #[test]
    fn test_commit_nothing_to_do_asks_nothing() {
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::new(&[]);
        commit(&mut session(&runner, &mut prompter)).unwrap();
        assert!(prompter.questions.is_empty());
    }

    #[test]
    fn test_push_refuses_with_uncommitted_changes() {
        let runner = clean_with_remote().ok("git diff --name-only", "a.txt");
        let mut prompter = ScriptedPrompter::new(&[]);
        push(&mut session(&runner, &mut prompter)).unwrap();
        assert!(!runner.calls().iter().any(|c| c.starts_with("git push")));
    }

    #[test]
    fn test_push_without_remote_never_touches_origin() {
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::new(&[]);
        push(&mut session(&runner, &mut prompter)).unwrap();

        assert!(runner.ran("git remote"));
        assert!(!runner.calls().iter().any(|c| c.contains("origin")));
        assert!(!runner.calls().iter().any(|c| c.starts_with("git push")));
    }

    #[test]
    fn test_force_push_gate_declined() {
        for answer in ["no", "y", ""] {
            let runner = clean_with_remote().fail("git push", REJECTED);
            let mut prompter = ScriptedPrompter::new(&[answer]);
            push(&mut session(&runner, &mut prompter)).unwrap();
            assert_eq!(runner.count("git push --force"), 0, "answer {answer:?}");
        }
    }

    #[test]
    fn test_force_push_gate_accepted_once() {
        let runner = clean_with_remote().fail("git push", REJECTED);
        let mut prompter = ScriptedPrompter::new(&["yes"]);
        push(&mut session(&runner, &mut prompter)).unwrap();

        assert_eq!(runner.count("git push"), 1);
        assert_eq!(runner.count("git push --force"), 1);
        assert_eq!(
            prompter.questions,
            vec!["Do you want to force push and overwrite the remote? (yes/N):".to_string()]
        );
    }

    #[test]
    fn test_push_sets_upstream_by_default() {
        let runner = ScriptedRunner::new()
            .ok("git remote", "origin")
            .ok("git rev-parse --abbrev-ref HEAD", "feature")
            .fail(
                "git push",
                "fatal: The current branch feature has no upstream branch.",
            );
        let mut prompter = ScriptedPrompter::new(&[""]);
        push(&mut session(&runner, &mut prompter)).unwrap();
        assert_eq!(runner.count("git push -u origin feature"), 1);
    }

    #[test]
    fn test_quick_push_empty_message_does_not_commit() {
        let runner = clean_with_remote().ok("git ls-files --others --exclude-standard", "new.rs");
        let mut prompter = ScriptedPrompter::new(&[""]);
        quick_push(&mut session(&runner, &mut prompter)).unwrap();
        assert!(runner.ran("git add ."));
        assert!(!any_commit(&runner));
        assert!(!runner.ran("git push"));
    }

    #[test]
    fn test_quick_push_commits_then_pushes() {
        let runner = clean_with_remote().ok("git diff --name-only", "a.txt");
        let mut prompter = ScriptedPrompter::new(&["Ship it"]);
        quick_push(&mut session(&runner, &mut prompter)).unwrap();
        let calls = runner.calls();
        let commit_at = calls.iter().position(|c| c == "git commit -m Ship it").unwrap();
        let push_at = calls.iter().position(|c| c == "git push").unwrap();
        assert!(commit_at < push_at);
    }

    #[test]
    fn test_stage_specific_files_splits_paths() {
        let runner = ScriptedRunner::new().ok("git diff --name-only", "a.txt\nb.txt");
        let mut prompter = ScriptedPrompter::new(&["2", "a.txt  b.txt"]);
        stage(&mut session(&runner, &mut prompter)).unwrap();
        assert!(runner.ran("git add -- a.txt b.txt"));
    }

    #[test]
    fn test_pull_conflict_offers_resolution() {
        let runner = clean_with_remote().on(
            "git pull",
            crate::core::runner::CommandOutput {
                code: 1,
                stdout: "CONFLICT (content): Merge conflict in a.txt".to_string(),
                stderr: String::new(),
            },
        );
        let mut prompter = ScriptedPrompter::new(&["n"]);
        pull(&mut session(&runner, &mut prompter)).unwrap();
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_clone_target_dir() {
        assert_eq!(clone_target_dir("https://github.com/rust-lang/cargo.git"), "cargo");
        assert_eq!(clone_target_dir("https://example.com/team/tool/"), "tool");
        assert_eq!(clone_target_dir("git@github.com:me/dotfiles.git"), "dotfiles");
        assert_eq!(clone_target_dir("git@host:repo.git"), "repo");
    }
}
