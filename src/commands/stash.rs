//! Stash management.

use crate::commands::{conflicts, session::Session};
use crate::core::{
    classify::{classify_merge, MergeOutcome},
    error::Result,
    output::{print_error, print_hint, print_info, print_menu, print_rule, print_section_header, print_success, print_warning},
    prompt::Strength,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Restore {
    Pop,
    Apply,
}

impl Restore {
    fn verb(self) -> &'static str {
        match self {
            Restore::Pop => "pop",
            Restore::Apply => "apply",
        }
    }
}

/// `git stash push`, untracked files included. Returns whether a stash was
/// created.
pub(crate) fn push_stash(s: &Session, message: Option<&str>) -> bool {
    let mut args = vec!["stash", "push", "--include-untracked"];
    if let Some(message) = message {
        args.extend(["-m", message]);
    }
    s.git(&args)
}

/// Pop or apply a stash and classify the result. Conflicts and failures are
/// reported here; the caller decides what to do next.
pub(crate) fn restore_stash(s: &Session, mode: Restore, id: Option<&str>) -> MergeOutcome {
    let mut args = vec!["stash", mode.verb()];
    args.extend(id);
    let outcome = classify_merge(&s.runner.git_raw(&args));
    match &outcome {
        MergeOutcome::Clean => {}
        MergeOutcome::Conflict => print_error("Conflicts detected while applying stash!"),
        MergeOutcome::Failed(message) => {
            print_error(&format!("Failed to {} stash: {message}", mode.verb()))
        }
    }
    outcome
}

fn require_stashes(s: &Session) -> bool {
    if s.query().stash_entries().is_empty() {
        print_warning("No stashes found.");
        false
    } else {
        true
    }
}

fn show_list(s: &Session) {
    print_info("Available stashes:");
    s.runner.git_show(&["stash", "list"]);
}

fn ask_stash_id(s: &mut Session) -> Result<Option<String>> {
    let id = s.ask("Enter stash ID (e.g., stash@{0}):")?;
    if id.is_empty() {
        print_error("Stash ID cannot be empty.");
        Ok(None)
    } else {
        Ok(Some(id))
    }
}

pub fn stash(s: &mut Session) -> Result<()> {
    if !s.query().has_any_changes() {
        print_warning("No changes to stash.");
        return Ok(());
    }

    print_section_header("Stash Changes");
    let message = s.ask("Enter stash message (optional, press Enter to skip):")?;
    let message = (!message.is_empty()).then_some(message);
    if push_stash(s, message.as_deref()) {
        match message {
            Some(message) => print_success(&format!("Changes stashed with message: '{message}'")),
            None => print_success("Changes stashed successfully!"),
        }
    }
    Ok(())
}

fn restore_menu(s: &mut Session, mode: Restore) -> Result<()> {
    if !require_stashes(s) {
        return Ok(());
    }

    let (title, recent, specific) = match mode {
        Restore::Pop => ("Pop Stash (apply and remove)", "Pop most recent stash", "Pop specific stash"),
        Restore::Apply => ("Apply Stash (keep in stash list)", "Apply most recent stash", "Apply specific stash"),
    };
    print_section_header(title);
    show_list(s);
    print_menu(&[recent, specific]);

    let id = match s.choose("Choose option (1/2):", 2)? {
        Some(1) => None,
        Some(2) => match ask_stash_id(s)? {
            Some(id) => Some(id),
            None => return Ok(()),
        },
        _ => {
            print_error("Invalid option.");
            return Ok(());
        }
    };

    let label = id.as_deref().map_or("Stash".to_string(), |id| format!("Stash {id}"));
    match restore_stash(s, mode, id.as_deref()) {
        MergeOutcome::Clean => match mode {
            Restore::Pop => print_success(&format!("{label} applied and removed!")),
            Restore::Apply => {
                print_success(&format!("{label} applied successfully!"));
                print_hint("Stash is still saved. Use 'stash-drop' to remove it.");
            }
        },
        MergeOutcome::Conflict => conflicts::offer_resolution(s)?,
        MergeOutcome::Failed(_) => {}
    }
    Ok(())
}

pub fn stash_pop(s: &mut Session) -> Result<()> {
    restore_menu(s, Restore::Pop)
}

pub fn stash_apply(s: &mut Session) -> Result<()> {
    restore_menu(s, Restore::Apply)
}

pub fn stash_list(s: &mut Session) -> Result<()> {
    if !require_stashes(s) {
        return Ok(());
    }

    print_section_header("Stash List");
    s.runner.git_show(&["stash", "list"]);
    print_rule();

    if s.confirm("Show details for a stash?", Strength::Low)? {
        let id = s.ask("Enter stash ID (e.g., stash@{0}):")?;
        if !id.is_empty() {
            print_section_header(&format!("Details for {id}"));
            s.runner.git_show(&["stash", "show", "-p", &id]);
        }
    }
    Ok(())
}

pub fn stash_drop(s: &mut Session) -> Result<()> {
    if !require_stashes(s) {
        return Ok(());
    }

    print_section_header("Drop Stash");
    show_list(s);
    print_menu(&["Drop most recent stash", "Drop specific stash", "Drop all stashes"]);

    match s.choose("Choose option (1-3):", 3)? {
        Some(1) => {
            if s.confirm("Drop most recent stash?", Strength::Low)? && s.git(&["stash", "drop"]) {
                print_success("Stash dropped!");
            }
        }
        Some(2) => {
            let Some(id) = ask_stash_id(s)? else {
                return Ok(());
            };
            if s.confirm(&format!("Drop {id}?"), Strength::Low)? && s.git(&["stash", "drop", &id]) {
                print_success(&format!("Stash {id} dropped!"));
            }
        }
        Some(3) => {
            if s.confirm("Drop ALL stashes? This cannot be undone!", Strength::High)? {
                if s.git(&["stash", "clear"]) {
                    print_success("All stashes cleared!");
                }
            } else {
                print_info("Drop canceled.");
            }
        }
        _ => print_error("Invalid option."),
    }
    Ok(())
}

pub fn stash_show(s: &mut Session) -> Result<()> {
    if !require_stashes(s) {
        return Ok(());
    }

    print_section_header("Show Stash Contents");
    show_list(s);
    let id = s.ask("Enter stash ID (e.g., stash@{0}, or press Enter for most recent):")?;

    let mut args = vec!["stash", "show", "-p"];
    if !id.is_empty() {
        args.push(&id);
    }
    print_section_header("Stash Contents");
    s.runner.git_show(&args);
    Ok(())
}
