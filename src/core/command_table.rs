//! Command vocabulary: the static command table and input normalization.
//!
//! The table is an immutable static value built at compile time. The
//! dispatcher, the help screen and tab completion all read it through a
//! shared reference.
//!
//! # Public API
//! - [`CommandTable`] / [`COMMAND_TABLE`]: Ordered command list plus aliases
//! - [`CommandSpec`]: One command's name, usage string, group and description
//! - [`normalize`]: Free-form token to canonical command name

/// Section a command is listed under in the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Smart,
    Core,
    Branch,
    Stash,
    ConflictsAndHooks,
    Other,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 6] = [
        CommandGroup::Smart,
        CommandGroup::Core,
        CommandGroup::Branch,
        CommandGroup::Stash,
        CommandGroup::ConflictsAndHooks,
        CommandGroup::Other,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Smart => "Smart Workflows",
            CommandGroup::Core => "Everyday Commands",
            CommandGroup::Branch => "Branch Management",
            CommandGroup::Stash => "Stash Management",
            CommandGroup::ConflictsAndHooks => "Conflicts & Hooks",
            CommandGroup::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub group: CommandGroup,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct CommandTable {
    pub commands: &'static [CommandSpec],
    /// Joined spellings mapped to their canonical hyphenated names.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Words the interactive loop handles itself.
    pub exit_words: &'static [&'static str],
}

const fn spec(
    name: &'static str,
    usage: &'static str,
    group: CommandGroup,
    description: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        usage,
        group,
        description,
    }
}

use CommandGroup::*;

pub static COMMAND_TABLE: CommandTable = CommandTable {
    commands: &[
        spec("save", "save [message]", Smart, "Stage, commit and push in one guided step"),
        spec("work", "work [branch]", Smart, "Start work on a branch, carrying or parking changes"),
        spec("done", "done", Smart, "Finish a branch: push it and return to main"),
        spec("sync", "sync", Smart, "Stash, pull, restore and push"),
        spec("undo", "undo", Smart, "Discard changes or undo the last commit"),
        spec("status", "status", Smart, "Repository overview"),
        spec("config", "config", Smart, "Manage gitcli settings"),
        spec("commit", "commit", Core, "Commit staged changes"),
        spec("push", "push", Core, "Push commits to the remote"),
        spec("pull", "pull", Core, "Pull latest changes"),
        spec("fetch", "fetch", Core, "Fetch updates without merging"),
        spec("stage", "stage", Core, "Stage changes for commit"),
        spec("log", "log", Core, "View recent commit history"),
        spec("diff", "diff", Core, "Show unstaged changes"),
        spec("diff-staged", "diff-staged", Core, "Show staged changes"),
        spec("quick-push", "quick-push / qp", Core, "Stage, commit and push with a message"),
        spec("switch-branch", "switch-branch [name]", Branch, "Switch to another branch"),
        spec("add-branch", "add-branch [name]", Branch, "Create a new branch"),
        spec("delete-branch", "delete-branch [name]", Branch, "Delete a branch"),
        spec("rename-branch", "rename-branch", Branch, "Rename a branch"),
        spec("list-branch", "list-branch", Branch, "List all branches"),
        spec("stash", "stash", Stash, "Stash uncommitted changes"),
        spec("stash-pop", "stash-pop", Stash, "Apply and remove a stash"),
        spec("stash-apply", "stash-apply", Stash, "Apply a stash and keep it"),
        spec("stash-list", "stash-list", Stash, "List all stashes"),
        spec("stash-drop", "stash-drop", Stash, "Remove stashes"),
        spec("stash-show", "stash-show", Stash, "Show stash contents"),
        spec("resolve-conflicts", "resolve-conflicts", ConflictsAndHooks, "Resolve merge conflicts"),
        spec("check-conflicts", "check-conflicts", ConflictsAndHooks, "List conflicted files"),
        spec("hooks", "hooks", ConflictsAndHooks, "Manage git hooks"),
        spec("list-hooks", "list-hooks", ConflictsAndHooks, "List installed hooks"),
        spec("clone", "clone", Other, "Clone a repository"),
        spec("remotes", "remotes", Other, "Manage remote repositories"),
        spec("reset", "reset", Other, "Hard reset to HEAD or a commit"),
        spec("amend", "amend", Other, "Amend the last commit"),
        spec("help", "help", Other, "Show this help message"),
    ],
    aliases: &[
        ("listbranch", "list-branch"),
        ("switchbranch", "switch-branch"),
        ("addbranch", "add-branch"),
        ("deletebranch", "delete-branch"),
        ("renamebranch", "rename-branch"),
        ("quickpush", "quick-push"),
        ("diffstaged", "diff-staged"),
        ("listhooks", "list-hooks"),
        ("stashpop", "stash-pop"),
        ("stashapply", "stash-apply"),
        ("stashlist", "stash-list"),
        ("stashdrop", "stash-drop"),
        ("stashshow", "stash-show"),
        ("resolveconflicts", "resolve-conflicts"),
        ("checkconflicts", "check-conflicts"),
    ],
    exit_words: &["quit", "exit"],
};

impl CommandTable {
    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().filter(move |spec| spec.group == group)
    }

    pub fn is_exit(&self, token: &str) -> bool {
        self.exit_words.contains(&token)
    }

    /// Every word tab completion offers, in table order.
    pub fn completion_words(&self) -> Vec<&'static str> {
        let mut words: Vec<&'static str> = self.commands.iter().map(|spec| spec.name).collect();
        words.push("qp");
        words.extend_from_slice(self.exit_words);
        words
    }

    fn resolve_alias(&self, token: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == token)
            .map(|(_, canonical)| *canonical)
    }
}

/// Trim, lowercase, join whitespace runs with a single hyphen, then map
/// joined spellings through the alias table. Applying it twice yields the
/// same token.
pub fn normalize(table: &CommandTable, input: &str) -> String {
    let token = input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    match table.resolve_alias(&token) {
        Some(canonical) => canonical.to_string(),
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_match_hyphenated_form() {
        for (alias, canonical) in COMMAND_TABLE.aliases {
            assert_eq!(normalize(&COMMAND_TABLE, alias), *canonical);
            assert_eq!(normalize(&COMMAND_TABLE, &alias.to_uppercase()), *canonical);
            assert_eq!(normalize(&COMMAND_TABLE, canonical), *canonical);
        }
    }

    #[test]
    fn test_spacing_and_case_variants() {
        assert_eq!(normalize(&COMMAND_TABLE, "  List   Branch "), "list-branch");
        assert_eq!(normalize(&COMMAND_TABLE, "STASH pop"), "stash-pop");
        assert_eq!(normalize(&COMMAND_TABLE, "Resolve\tConflicts"), "resolve-conflicts");
        assert_eq!(normalize(&COMMAND_TABLE, "QuickPush"), "quick-push");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["list branch", "STASHPOP", "diff staged", "qp", "unknown thing", ""] {
            let once = normalize(&COMMAND_TABLE, input);
            assert_eq!(normalize(&COMMAND_TABLE, &once), once);
        }
    }

    #[test]
    fn test_every_alias_targets_a_command() {
        for (_, canonical) in COMMAND_TABLE.aliases {
            assert!(COMMAND_TABLE.find(canonical).is_some(), "{canonical}");
        }
    }

    #[test]
    fn test_every_command_has_a_group() {
        let grouped: usize = CommandGroup::ALL
            .iter()
            .map(|group| COMMAND_TABLE.in_group(*group).count())
            .sum();
        assert_eq!(grouped, COMMAND_TABLE.commands.len());
    }

    #[test]
    fn test_completion_words_include_shortcuts() {
        let words = COMMAND_TABLE.completion_words();
        assert!(words.contains(&"qp"));
        assert!(words.contains(&"quit"));
        assert!(words.contains(&"save"));
    }
}
