//! Smart workflows: multi-step sequences that pick the next git action
//! from the current repository state.
//!
//! Every workflow re-queries the repository at each decision point. The
//! commit message generator is a pure function over the recent commit
//! subjects and the staged paths so it can be tested without git.

use crate::commands::{
    branches::sanitize_branch_name,
    conflicts,
    operations::{commit_with_message, push_current, require_remote, stage_all},
    session::Session,
    stash::{push_stash, restore_stash, Restore},
};
use crate::core::{
    classify::{classify_merge, MergeOutcome},
    config::Config,
    error::Result,
    output::{print_error, print_hint, print_info, print_menu, print_rule, print_section_header, print_success, print_warning},
    prompt::Strength,
    state::RepositoryState,
};
use colored::*;
use std::path::Path;

const CONVENTIONAL_PREFIXES: [&str; 7] =
    ["feat:", "fix:", "docs:", "style:", "refactor:", "test:", "chore:"];
const HISTORY_DEPTH: usize = 5;
const PATTERN_THRESHOLD: usize = 3;
const FALLBACK_MESSAGE: &str = "Update files";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryPattern {
    Conventional,
    Wip,
}

fn history_pattern(subjects: &[String]) -> Option<HistoryPattern> {
    if subjects.len() < 2 {
        return None;
    }
    let conventional = subjects
        .iter()
        .filter(|s| CONVENTIONAL_PREFIXES.iter().any(|p| s.starts_with(p)))
        .count();
    if conventional >= PATTERN_THRESHOLD {
        return Some(HistoryPattern::Conventional);
    }
    let wip = subjects
        .iter()
        .filter(|s| s.to_lowercase().starts_with("wip"))
        .count();
    (wip >= PATTERN_THRESHOLD).then_some(HistoryPattern::Wip)
}

fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Default commit message from the last few commit subjects (newest
/// first) and the staged paths.
pub fn generate_commit_message(subjects: &[String], staged_files: &[String]) -> String {
    let Some(first) = staged_files.first() else {
        return FALLBACK_MESSAGE.to_string();
    };
    let count = staged_files.len();

    match history_pattern(subjects) {
        Some(HistoryPattern::Conventional) => {
            let prefix = if staged_files.iter().any(|f| f.to_lowercase().contains("test")) {
                "test"
            } else if staged_files
                .iter()
                .any(|f| f.ends_with(".md") || f.to_lowercase().contains("readme"))
            {
                "docs"
            } else if count == 1 {
                "feat"
            } else {
                "chore"
            };
            if count == 1 {
                format!("{prefix}: update {}", base_name(first))
            } else {
                format!("{prefix}: update {count} files")
            }
        }
        Some(HistoryPattern::Wip) => "WIP".to_string(),
        None if count <= 3 => {
            let names: Vec<&str> = staged_files.iter().map(|f| base_name(f)).collect();
            format!("Update {}", names.join(", "))
        }
        None => format!("Update {count} files"),
    }
}

/// Staged files over the configured size limit, with their sizes.
fn oversized_files(s: &Session, limit: u64) -> Vec<(String, u64)> {
    let query = s.query();
    let top = query.toplevel();
    query
        .staged_files()
        .into_iter()
        .filter_map(|file| {
            let size = std::fs::metadata(top.join(&file)).ok()?.len();
            (size > limit).then_some((file, size))
        })
        .collect()
}

/// Check the configured validation rules before committing.
fn validate(s: &Session, config: &Config, message: &str) -> bool {
    if let Some(min) = config.min_message_length() {
        if message.chars().count() < min {
            print_error(&format!("Commit message must be at least {min} characters."));
            return false;
        }
    }
    if let Some(limit) = config.max_file_bytes() {
        let oversized = oversized_files(s, limit);
        if !oversized.is_empty() {
            print_error(&format!(
                "Staged files exceed the {} MB limit:",
                config.validation_rules.max_file_size_mb
            ));
            for (file, size) in &oversized {
                println!("  • {} ({:.1} MB)", file.yellow(), *size as f64 / (1024.0 * 1024.0));
            }
            print_hint("Unstage them or raise the limit with 'config'.");
            return false;
        }
    }
    true
}

fn default_message(s: &Session, config: &Config) -> String {
    if config.learn_from_history {
        let query = s.query();
        generate_commit_message(&query.recent_subjects(HISTORY_DEPTH), &query.staged_files())
    } else {
        config
            .commit_message_template
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }
}

/// Stage, commit and offer to push, following the stored settings.
/// Returns whether a commit was made.
fn commit_and_push(s: &mut Session, message: Option<String>) -> Result<bool> {
    let config = Config::load(s.workdir());

    if config.auto_stage {
        if !stage_all(s) {
            return Ok(false);
        }
        let staged = s.query().staged_files();
        if !staged.is_empty() {
            print_success(&format!("{} file(s) staged", staged.len()));
        }
    } else if !s.query().has_staged_changes() {
        print_warning("Nothing staged. Use 'stage' first or enable auto-stage in 'config'.");
        return Ok(false);
    }

    let message = match message {
        Some(message) => message,
        None => {
            let default = default_message(s, &config);
            print_info("Commit message (press Enter to use default):");
            println!("{} \"{}\"", "Default:".yellow(), default);
            let answer = s.ask(">")?;
            if answer.is_empty() {
                print_success(&format!("Using: \"{default}\""));
                default
            } else {
                answer
            }
        }
    };

    if !validate(s, &config, &message) {
        return Ok(false);
    }
    if !commit_with_message(s, &message) {
        return Ok(false);
    }

    if !s.query().has_remote() {
        print_hint("No remote configured. Changes committed locally.");
    } else if !config.auto_push {
        print_hint("Auto-push is disabled. Use 'push' to push manually.");
    } else if s.confirm("Push to remote?", Strength::Lenient)? {
        push_current(s)?;
    } else {
        print_success("Staged and committed successfully!");
    }
    Ok(true)
}

/// Offer to push commits that are ahead of the upstream.
fn offer_push_ahead(s: &mut Session, question: &str) -> Result<bool> {
    let ahead = s.query().ahead_count();
    if ahead == 0 {
        return Ok(false);
    }
    print_info(&format!("You have {ahead} unpushed commit(s)."));
    if s.confirm(question, Strength::Lenient)? {
        push_current(s)?;
    }
    Ok(true)
}

pub fn save(s: &mut Session, message: Option<String>) -> Result<()> {
    let query = s.query();
    let branch = query.current_branch();

    if query.has_conflicts() {
        print_error("You have unresolved conflicts!");
        print_hint("Resolve them first before saving.");
        if s.confirm("Open conflict resolution helper?", Strength::Lenient)? {
            conflicts::resolve(s)?;
        }
        return Ok(());
    }

    if !query.has_any_changes() {
        if !query.has_remote() {
            print_success("No changes to save!");
            return Ok(());
        }
        let config = Config::load(s.workdir());
        if query.ahead_count() == 0 {
            print_success("Everything is saved and up to date!");
        } else if config.auto_push {
            offer_push_ahead(s, "Push to remote?")?;
        } else {
            print_info(&format!("You have {} unpushed commit(s) on '{branch}'", query.ahead_count()));
            print_hint("Auto-push is disabled. Use 'push' to push manually.");
        }
        return Ok(());
    }

    if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
        commit_and_push(s, Some(message))?;
        return Ok(());
    }

    loop {
        print_info(&format!("You have uncommitted changes on '{branch}'"));
        print_menu(&[
            "Commit and push (save permanently)",
            "Stash (save temporarily)",
            "Show changes first",
            "Cancel",
        ]);
        match s.choose("Choose option (1-4):", 4)? {
            Some(1) => {
                commit_and_push(s, None)?;
            }
            Some(2) => {
                let message = s.ask("Enter stash message (optional):")?;
                let message = (!message.is_empty()).then_some(message);
                if push_stash(s, message.as_deref()) {
                    print_success("Changes stashed successfully!");
                    s.notify("Changes stashed");
                }
            }
            Some(3) => {
                print_section_header("Your changes");
                s.runner.git_show(&["status", "-s"]);
                print_rule();
                continue;
            }
            _ => print_info("Save canceled."),
        }
        return Ok(());
    }
}

pub fn work(s: &mut Session, branch: Option<&str>) -> Result<()> {
    let raw = match branch {
        Some(name) => name.to_string(),
        None => s.ask("Enter branch name to work on:")?,
    };
    let target = sanitize_branch_name(&raw);
    if target.is_empty() {
        print_error("Branch name cannot be empty.");
        return Ok(());
    }

    let query = s.query();
    let current = query.current_branch();

    if query.has_any_changes() {
        print_warning(&format!("You have uncommitted changes on '{current}'"));
        print_menu(&["Stash and switch", "Commit and switch", "Cancel"]);
        match s.choose("Choose option (1-3):", 3)? {
            Some(1) => {
                let message = format!("Auto-stash from {current} before switching to {target}");
                if !push_stash(s, Some(&message)) {
                    print_error("Stash failed. Switch canceled.");
                    return Ok(());
                }
                print_success("Changes stashed!");
            }
            Some(2) => {
                let message = s.ask("Enter commit message:")?;
                if message.is_empty() {
                    print_error("Commit message required.");
                    return Ok(());
                }
                if !stage_all(s) || !commit_with_message(s, &message) {
                    return Ok(());
                }
            }
            _ => {
                print_info("Canceled.");
                return Ok(());
            }
        }
    }

    if query.branch_exists(&target) {
        print_info(&format!("Switching to existing branch '{target}'..."));
        if !s.git(&["checkout", &target]) {
            print_error(&format!("Could not switch to '{target}'."));
            return Ok(());
        }
        print_success(&format!("Switched to '{target}'"));

        if query.has_remote() && s.confirm("Pull latest changes?", Strength::Lenient)? {
            match classify_merge(&s.runner.git_raw(&["pull"])) {
                MergeOutcome::Clean => print_success("Up to date!"),
                MergeOutcome::Conflict => {
                    print_error("Conflicts detected!");
                    conflicts::resolve(s)?;
                }
                MergeOutcome::Failed(message) => print_error(&format!("Pull failed: {message}")),
            }
        }
    } else {
        print_info(&format!("Creating new branch '{target}'..."));
        print_info("Create from:");
        let current_label = format!("Current branch ({current})");
        print_menu(&[current_label.as_str(), "main", "master"]);
        let answer = s.ask("Choose option (1-3, default: 1):")?;
        let base = match answer.as_str() {
            "2" => "main".to_string(),
            "3" => "master".to_string(),
            _ => current.clone(),
        };

        if base != current {
            if !s.git(&["checkout", &base]) {
                print_error(&format!("Could not switch to base branch '{base}'."));
                return Ok(());
            }
            if query.has_remote() && !s.git(&["pull"]) {
                print_warning(&format!("Could not pull '{base}'. The new branch may start from a stale base."));
            }
        }
        if !s.git(&["checkout", "-b", &target]) {
            print_error(&format!("Could not create branch '{target}'."));
            return Ok(());
        }
        print_success(&format!("Created and switched to '{target}'"));
    }

    print_success(&format!("Ready to work on '{target}'!"));
    Ok(())
}

fn is_main_branch(branch: &str) -> bool {
    branch == "main" || branch == "master"
}

fn switch_to_main(s: &mut Session) {
    let branches = s.query().local_branches();
    let Some(main) = ["main", "master"]
        .into_iter()
        .find(|name| branches.iter().any(|b| b == *name))
    else {
        print_warning("No main/master branch found.");
        return;
    };

    if s.git(&["checkout", main]) {
        print_success(&format!("Switched to '{main}'"));
        if s.query().has_remote() {
            s.git(&["pull"]);
        }
    } else {
        print_error(&format!("Could not switch to '{main}'."));
    }
}

fn offer_switch_back(s: &mut Session, branch: &str) -> Result<()> {
    if !is_main_branch(branch) && s.confirm("Switch back to main?", Strength::Low)? {
        switch_to_main(s);
    }
    Ok(())
}

pub fn done(s: &mut Session) -> Result<()> {
    let query = s.query();
    let branch = query.current_branch();

    if !query.has_any_changes() {
        print_warning("No uncommitted changes.");
        if query.has_remote() && !offer_push_ahead(s, "Push them?")? {
            print_success("Everything is already saved and pushed!");
        }
        return offer_switch_back(s, &branch);
    }

    print_info(&format!("Finishing work on '{branch}'"));
    commit_and_push(s, None)?;
    offer_switch_back(s, &branch)?;
    print_success("Work completed!");
    Ok(())
}

pub fn sync(s: &mut Session) -> Result<()> {
    if !require_remote(s) {
        return Ok(());
    }
    let query = s.query();
    let branch = query.current_branch();
    print_info(&format!("Syncing '{branch}' with remote..."));

    let stashed = if query.has_any_changes() {
        print_warning("You have uncommitted changes. Stashing them temporarily...");
        if !push_stash(s, Some("Auto-stash for sync")) {
            print_error("Stash failed. Sync canceled.");
            return Ok(());
        }
        true
    } else {
        false
    };

    match classify_merge(&s.runner.git_raw(&["pull"])) {
        MergeOutcome::Clean => print_success("Pull complete!"),
        MergeOutcome::Conflict => {
            print_error("Conflicts detected!");
            conflicts::resolve(s)?;
            if stashed {
                print_warning("Your stashed changes are still saved.");
                print_hint("Run 'stash-pop' after resolving conflicts.");
            }
            return Ok(());
        }
        MergeOutcome::Failed(message) => {
            print_error(&format!("Pull failed: {message}"));
            if stashed {
                print_hint("Your changes are still in the stash. Use 'stash-pop' to restore them.");
            }
            return Ok(());
        }
    }

    if stashed {
        print_info("Restoring your changes...");
        match restore_stash(s, Restore::Pop, None) {
            MergeOutcome::Clean => print_success("Your changes restored!"),
            MergeOutcome::Conflict => {
                conflicts::resolve(s)?;
                return Ok(());
            }
            MergeOutcome::Failed(_) => {
                print_hint("Your changes are still in the stash. Use 'stash-pop' to restore them.");
                return Ok(());
            }
        }
    }

    offer_push_ahead(s, "Push now?")?;
    print_success("Sync complete!");
    s.notify(&format!("Synced '{branch}'"));
    Ok(())
}

fn undo_last_commit(s: &mut Session) -> Result<()> {
    let query = s.query();
    if !query.has_commits() {
        print_warning("No commits to undo.");
        return Ok(());
    }

    print_info("Last commit:");
    s.runner.git_show(&["log", "-1", "--oneline"]);

    if query.has_remote() && query.head_on_remote() {
        print_error("This commit has been pushed to remote!");
        print_warning("Undoing it will require force push and affect others.");
        print_info("Safer option: create a revert commit instead?");
        print_menu(&[
            "Revert (safe, creates new commit)",
            "Undo anyway (requires force push)",
            "Cancel",
        ]);
        match s.choose("Choose option (1-3):", 3)? {
            Some(1) => {
                if s.git(&["revert", "HEAD", "--no-edit"]) {
                    print_success("Revert commit created!");
                }
                return Ok(());
            }
            Some(2) => {}
            _ => {
                print_info("Canceled.");
                return Ok(());
            }
        }
    }

    if s.confirm("Undo last commit?", Strength::Low)? && s.git(&["reset", "--soft", "HEAD~1"]) {
        print_success("Last commit undone! Changes are still staged.");
    }
    Ok(())
}

pub fn undo(s: &mut Session) -> Result<()> {
    print_section_header("Undo Last Action");

    if !s.query().has_any_changes() {
        print_info("No uncommitted changes found.");
        return undo_last_commit(s);
    }

    print_warning("You have uncommitted changes.");
    print_menu(&[
        "Discard all uncommitted changes",
        "Discard specific files",
        "Undo last commit (keep changes)",
        "Cancel",
    ]);
    match s.choose("Choose option (1-4):", 4)? {
        Some(1) => {
            if s.confirm("Discard ALL uncommitted changes?", Strength::High)? {
                let reset = s.git(&["reset", "--hard", "HEAD"]);
                let cleaned = s.git(&["clean", "-fd"]);
                if reset && cleaned {
                    print_success("All changes discarded!");
                }
            } else {
                print_info("Discard canceled.");
            }
        }
        Some(2) => {
            print_info("Modified files:");
            s.runner.git_show(&["status", "-s"]);
            let answer = s.ask("Enter file paths (space-separated):")?;
            let files: Vec<&str> = answer.split_whitespace().collect();
            if !files.is_empty() {
                let mut args = vec!["checkout", "--"];
                args.extend(&files);
                if s.git(&args) {
                    print_success(&format!("Changes discarded for: {}", files.join(" ")));
                }
            }
        }
        Some(3) => undo_last_commit(s)?,
        _ => print_info("Canceled."),
    }
    Ok(())
}

pub fn status(s: &mut Session) -> Result<()> {
    let state = RepositoryState::capture(s.runner);

    print_section_header(&format!("Status for '{}'", state.current_branch));

    if state.has_conflicts() {
        print_error("CONFLICTS DETECTED!");
        for file in &state.conflicted_files {
            println!("  • {}", file.yellow());
        }
        print_hint("Run 'resolve-conflicts' to resolve them.");
    }

    print_info("\nWorking Directory:");
    s.runner.git_show(&["status", "-s"]);

    if state.has_remote {
        if state.ahead_count > 0 {
            print_warning(&format!("{} commit(s) ahead of remote (not pushed)", state.ahead_count));
        }
        if state.behind_count > 0 {
            print_warning(&format!("{} commit(s) behind remote (need to pull)", state.behind_count));
        }
        if state.ahead_count == 0 && state.behind_count == 0 && !state.has_changes() {
            print_success("Everything up to date!");
        }
    }

    if state.stash_count > 0 {
        print_info(&format!("\n{} stash(es) saved", state.stash_count));
        print_hint("Run 'stash-list' to manage them.");
    }

    print_info("\nRecent Commits:");
    s.runner
        .git_show(&["log", "--oneline", "--graph", "--decorate", "-5"]);
    print_rule();
    Ok(())
}
