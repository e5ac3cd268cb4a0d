//! Point-in-time snapshot of the repository.
//!
//! A [`RepositoryState`] is captured fresh from the query layer whenever a
//! workflow needs several facts at once. It is never cached: every capture
//! re-runs the underlying git commands.

use crate::core::query::RepoQuery;
use crate::core::runner::CommandRunner;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryState {
    pub current_branch: String,
    pub has_staged_changes: bool,
    pub has_unstaged_changes: bool,
    pub has_untracked_files: bool,
    pub has_remote: bool,
    pub ahead_count: u32,
    pub behind_count: u32,
    pub conflicted_files: Vec<String>,
    pub stash_count: usize,
}

impl RepositoryState {
    pub fn capture(runner: &dyn CommandRunner) -> Self {
        let query = RepoQuery::new(runner);
        let has_remote = query.has_remote();
        let (ahead_count, behind_count) = if has_remote {
            (query.ahead_count(), query.behind_count())
        } else {
            (0, 0)
        };

        let state = Self {
            current_branch: query.current_branch(),
            has_staged_changes: query.has_staged_changes(),
            has_unstaged_changes: query.has_unstaged_changes(),
            has_untracked_files: query.has_untracked_files(),
            has_remote,
            ahead_count,
            behind_count,
            conflicted_files: query.conflicted_files(),
            stash_count: query.stash_entries().len(),
        };
        log::debug!("captured repository state: {state:?}");
        state
    }

    pub fn has_changes(&self) -> bool {
        self.has_staged_changes || self.has_unstaged_changes || self.has_untracked_files
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicted_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::testing::ScriptedRunner;

    #[test]
    fn test_capture_without_remote_skips_upstream_counts() {
        let runner = ScriptedRunner::new()
            .ok("git remote", "")
            .ok("git rev-parse --abbrev-ref HEAD", "develop");
        let state = RepositoryState::capture(&runner);
        assert_eq!(state.current_branch, "develop");
        assert!(!state.has_remote);
        assert_eq!(state.ahead_count, 0);
        assert!(!runner.ran("git rev-list --count @{u}..HEAD"));
    }

    #[test]
    fn test_capture_reports_changes_and_stashes() {
        let runner = ScriptedRunner::new()
            .ok("git remote", "origin")
            .ok("git rev-list --count @{u}..HEAD", "2")
            .ok("git ls-files --others --exclude-standard", "new.txt")
            .ok("git stash list", "stash@{0}: WIP on main\nstash@{1}: WIP on main");
        let state = RepositoryState::capture(&runner);
        assert!(state.has_remote);
        assert_eq!(state.ahead_count, 2);
        assert!(state.has_changes());
        assert!(!state.has_conflicts());
        assert_eq!(state.stash_count, 2);
    }
}
