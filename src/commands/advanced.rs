//! Remote management, hard reset and commit amending.

use crate::commands::{operations::stage_all, session::Session};
use crate::core::{
    error::Result,
    output::{print_error, print_hint, print_info, print_menu, print_section_header, print_success, print_warning},
    prompt::Strength,
};

pub fn remotes(s: &mut Session) -> Result<()> {
    print_section_header("Remote Management");
    print_menu(&["List remotes", "Add remote", "Remove remote", "View remote URLs"]);

    match s.choose("Choose option (1-4):", 4)? {
        Some(1) | Some(4) => {
            print_section_header("Remotes");
            s.runner.git_show(&["remote", "-v"]);
        }
        Some(2) => {
            let name = s.ask("Enter remote name (e.g., origin):")?;
            if name.is_empty() {
                print_error("Remote name cannot be empty.");
                return Ok(());
            }
            let url = s.ask("Enter remote URL:")?;
            if url.is_empty() {
                print_error("Remote URL cannot be empty.");
                return Ok(());
            }
            if s.git(&["remote", "add", &name, &url]) {
                print_success(&format!("Remote '{name}' added successfully."));
            }
        }
        Some(3) => {
            s.runner.git_show(&["remote", "-v"]);
            let name = s.ask("Enter remote name to remove:")?;
            if name.is_empty() {
                print_error("Remote name cannot be empty.");
                return Ok(());
            }
            if !s.confirm(
                &format!("Are you sure you want to remove remote '{name}'?"),
                Strength::Low,
            )? {
                print_info("Remove canceled.");
                return Ok(());
            }
            if s.git(&["remote", "remove", &name]) {
                print_success(&format!("Remote '{name}' removed successfully."));
            }
        }
        _ => print_error("Invalid option."),
    }
    Ok(())
}

/// Hard reset. The typed commit id is passed to git as-is.
pub fn reset(s: &mut Session) -> Result<()> {
    print_section_header("Reset Options");
    print_menu(&["Reset to last commit (hard reset)", "Reset to specific commit ID"]);
    print_warning("Hard reset will discard all uncommitted changes!");

    match s.choose("Choose option (1-2):", 2)? {
        Some(1) => {
            if !s.confirm(
                "Are you sure? This will discard ALL uncommitted changes!",
                Strength::High,
            )? {
                print_info("Reset canceled.");
                return Ok(());
            }
            if s.git(&["reset", "--hard", "HEAD"]) {
                print_success("Reset to last commit successfully.");
            }
        }
        Some(2) => {
            print_info("Recent commits:");
            s.runner.git_show(&["log", "--oneline", "-10"]);
            let commit = s.ask("Enter commit ID to reset to:")?;
            if commit.is_empty() {
                print_error("Commit ID cannot be empty.");
                return Ok(());
            }
            if !s.confirm(
                &format!("Are you sure? This will reset to '{commit}' and discard all changes after it!"),
                Strength::High,
            )? {
                print_info("Reset canceled.");
                return Ok(());
            }
            if s.git(&["reset", "--hard", &commit]) {
                print_success(&format!("Reset to commit '{commit}' successfully."));
            } else {
                print_error(&format!("Reset to '{commit}' failed."));
            }
        }
        _ => print_error("Invalid option."),
    }
    Ok(())
}

/// Stage pending changes for an amend. `false` when there is nothing to
/// add or the user declines.
fn prepare_amend_changes(s: &mut Session) -> Result<bool> {
    let query = s.query();
    if !(query.has_unstaged_changes() || query.has_staged_changes() || query.has_untracked_files()) {
        print_warning("No changes to add to the commit.");
        return Ok(false);
    }
    if query.has_unstaged_changes() || query.has_untracked_files() {
        if !s.confirm("Stage all changes?", Strength::Low)? {
            print_hint("Stage specific files using the 'stage' command first.");
            return Ok(false);
        }
        return Ok(stage_all(s));
    }
    Ok(true)
}

pub fn amend(s: &mut Session) -> Result<()> {
    if !s.query().has_commits() {
        print_error("No commits to amend.");
        return Ok(());
    }

    print_section_header("Amend Last Commit");
    print_info("Current last commit:");
    s.runner.git_show(&["log", "-1", "--oneline"]);
    print_menu(&[
        "Change commit message only",
        "Add more changes to commit (keep message)",
        "Add more changes and update message",
    ]);

    let amended = match s.choose("Choose option (1-3):", 3)? {
        Some(1) => {
            let message = s.ask("Enter new commit message:")?;
            if message.is_empty() {
                print_error("Commit message cannot be empty.");
                return Ok(());
            }
            s.git(&["commit", "--amend", "-m", &message])
        }
        Some(2) => {
            if !prepare_amend_changes(s)? {
                return Ok(());
            }
            s.git(&["commit", "--amend", "--no-edit"])
        }
        Some(3) => {
            if !prepare_amend_changes(s)? {
                return Ok(());
            }
            let message = s.ask("Enter new commit message:")?;
            if message.is_empty() {
                print_error("Commit message cannot be empty.");
                return Ok(());
            }
            s.git(&["commit", "--amend", "-m", &message])
        }
        _ => {
            print_error("Invalid option.");
            return Ok(());
        }
    };

    if amended {
        print_success("Commit amended successfully.");
        print_warning("If you already pushed this commit, you'll need to force push (git push --force).");
    }
    Ok(())
}
