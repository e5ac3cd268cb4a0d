//! Repository queries derived from `git` output.
//!
//! Each query runs one read-only command and interprets its text. Queries
//! never fail for "not applicable" states (no remote, no upstream, no
//! commits yet): they degrade to `false`, `0` or an empty list and leave the
//! user-facing message to the caller.

use crate::core::runner::CommandRunner;
use std::path::{Path, PathBuf};

/// Branch name reported when git cannot name the current branch.
pub const DEFAULT_BRANCH: &str = "main";

pub struct RepoQuery<'a> {
    runner: &'a dyn CommandRunner,
}

fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_count(text: Option<String>) -> u32 {
    text.and_then(|t| t.trim().parse().ok()).unwrap_or(0)
}

impl<'a> RepoQuery<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn non_empty(&self, args: &[&str]) -> bool {
        self.runner
            .git_query(args)
            .is_some_and(|out| !out.trim().is_empty())
    }

    fn list(&self, args: &[&str]) -> Vec<String> {
        self.runner
            .git_query(args)
            .map(|out| lines(&out))
            .unwrap_or_default()
    }

    pub fn is_repository(&self) -> bool {
        self.runner
            .git_query(&["rev-parse", "--is-inside-work-tree"])
            .is_some_and(|out| out == "true")
    }

    pub fn current_branch(&self) -> String {
        match self.runner.git_query(&["rev-parse", "--abbrev-ref", "HEAD"]) {
            Some(branch) if !branch.is_empty() && branch != "HEAD" => branch,
            _ => DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn repo_name(&self) -> String {
        self.runner
            .workdir()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string())
    }

    pub fn has_staged_changes(&self) -> bool {
        self.non_empty(&["diff", "--cached", "--name-only"])
    }

    pub fn has_unstaged_changes(&self) -> bool {
        self.non_empty(&["diff", "--name-only"])
    }

    pub fn has_untracked_files(&self) -> bool {
        self.non_empty(&["ls-files", "--others", "--exclude-standard"])
    }

    pub fn has_any_changes(&self) -> bool {
        self.has_staged_changes() || self.has_unstaged_changes() || self.has_untracked_files()
    }

    pub fn has_remote(&self) -> bool {
        self.non_empty(&["remote"])
    }

    /// `origin` when configured, otherwise the first listed remote.
    pub fn default_remote(&self) -> Option<String> {
        let remotes = self.list(&["remote"]);
        remotes
            .iter()
            .find(|name| name.as_str() == "origin")
            .or_else(|| remotes.first())
            .cloned()
    }

    pub fn ahead_count(&self) -> u32 {
        parse_count(self.runner.git_query(&["rev-list", "--count", "@{u}..HEAD"]))
    }

    pub fn behind_count(&self) -> u32 {
        parse_count(self.runner.git_query(&["rev-list", "--count", "HEAD..@{u}"]))
    }

    pub fn conflicted_files(&self) -> Vec<String> {
        self.list(&["diff", "--name-only", "--diff-filter=U"])
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicted_files().is_empty()
    }

    pub fn staged_files(&self) -> Vec<String> {
        self.list(&["diff", "--cached", "--name-only"])
    }

    pub fn local_branches(&self) -> Vec<String> {
        self.list(&["branch", "--list", "--format=%(refname:short)"])
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        let reference = format!("refs/heads/{name}");
        self.runner
            .git_query(&["rev-parse", "--verify", "--quiet", &reference])
            .is_some()
    }

    /// Subjects of the most recent `count` commits, newest first.
    pub fn recent_subjects(&self, count: usize) -> Vec<String> {
        let limit = format!("-{count}");
        self.list(&["log", &limit, "--pretty=format:%s"])
    }

    pub fn has_commits(&self) -> bool {
        self.last_commit_oneline().is_some()
    }

    pub fn last_commit_oneline(&self) -> Option<String> {
        self.runner
            .git_query(&["log", "-1", "--oneline"])
            .filter(|out| !out.is_empty())
    }

    /// Whether HEAD is contained in any remote-tracking branch.
    pub fn head_on_remote(&self) -> bool {
        self.non_empty(&["branch", "-r", "--contains", "HEAD"])
    }

    pub fn stash_entries(&self) -> Vec<String> {
        self.list(&["stash", "list"])
    }

    pub fn git_dir(&self) -> Option<PathBuf> {
        let dir = self.runner.git_query(&["rev-parse", "--git-dir"])?;
        if dir.is_empty() {
            return None;
        }
        let path = Path::new(&dir);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.runner.workdir().join(path)
        })
    }

    /// Top of the working tree. Paths printed by `git diff --name-only`
    /// are relative to it, not to the working directory.
    pub fn toplevel(&self) -> PathBuf {
        match self.runner.git_query(&["rev-parse", "--show-toplevel"]) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => self.runner.workdir().to_path_buf(),
        }
    }

    /// Pathspecs for top-relative paths that resolve the same way from any
    /// subdirectory.
    pub fn top_pathspecs(&self, files: &[&str]) -> Vec<String> {
        let at_top = self.toplevel() == self.runner.workdir();
        files
            .iter()
            .map(|file| if at_top { file.to_string() } else { format!(":(top){file}") })
            .collect()
    }

    pub fn hooks_dir(&self) -> Option<PathBuf> {
        self.git_dir().map(|dir| dir.join("hooks"))
    }

    pub fn merge_in_progress(&self) -> bool {
        self.git_dir()
            .is_some_and(|dir| dir.join("MERGE_HEAD").exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::testing::ScriptedRunner;

    #[test]
    fn test_current_branch_falls_back() {
        let runner = ScriptedRunner::new().fail("git rev-parse --abbrev-ref HEAD", "fatal");
        assert_eq!(RepoQuery::new(&runner).current_branch(), DEFAULT_BRANCH);

        let runner = ScriptedRunner::new().ok("git rev-parse --abbrev-ref HEAD", "HEAD");
        assert_eq!(RepoQuery::new(&runner).current_branch(), DEFAULT_BRANCH);

        let runner = ScriptedRunner::new().ok("git rev-parse --abbrev-ref HEAD", "feature/x\n");
        assert_eq!(RepoQuery::new(&runner).current_branch(), "feature/x");
    }

    #[test]
    fn test_counts_degrade_to_zero_without_upstream() {
        let runner = ScriptedRunner::new()
            .fail("git rev-list --count @{u}..HEAD", "fatal: no upstream configured")
            .ok("git rev-list --count HEAD..@{u}", "garbage");
        let query = RepoQuery::new(&runner);
        assert_eq!(query.ahead_count(), 0);
        assert_eq!(query.behind_count(), 0);
    }

    #[test]
    fn test_ahead_count_parses() {
        let runner = ScriptedRunner::new().ok("git rev-list --count @{u}..HEAD", "3\n");
        assert_eq!(RepoQuery::new(&runner).ahead_count(), 3);
    }

    #[test]
    fn test_change_detection() {
        let runner = ScriptedRunner::new()
            .ok("git diff --cached --name-only", "")
            .ok("git diff --name-only", "src/lib.rs\n");
        let query = RepoQuery::new(&runner);
        assert!(!query.has_staged_changes());
        assert!(query.has_unstaged_changes());
        assert!(query.has_any_changes());
    }

    #[test]
    fn test_conflicted_files_in_order() {
        let runner = ScriptedRunner::new()
            .ok("git diff --name-only --diff-filter=U", "b.txt\na.txt\n\n");
        assert_eq!(
            RepoQuery::new(&runner).conflicted_files(),
            vec!["b.txt".to_string(), "a.txt".to_string()]
        );
    }

    #[test]
    fn test_has_remote_false_when_failing() {
        let runner = ScriptedRunner::new().fail("git remote", "fatal: not a git repository");
        assert!(!RepoQuery::new(&runner).has_remote());
    }

    #[test]
    fn test_pathspecs_from_subdirectory_are_top_relative() {
        let runner = ScriptedRunner::in_dir("/work/repo/src")
            .ok("git rev-parse --show-toplevel", "/work/repo\n");
        let query = RepoQuery::new(&runner);
        assert_eq!(query.toplevel(), PathBuf::from("/work/repo"));
        assert_eq!(query.top_pathspecs(&["a.txt", "lib/b.rs"]), vec![":(top)a.txt", ":(top)lib/b.rs"]);

        let runner = ScriptedRunner::in_dir("/work/repo")
            .ok("git rev-parse --show-toplevel", "/work/repo");
        assert_eq!(RepoQuery::new(&runner).top_pathspecs(&["a.txt"]), vec!["a.txt"]);
    }

    #[test]
    fn test_toplevel_falls_back_to_workdir() {
        let runner = ScriptedRunner::in_dir("/work/repo").fail("git rev-parse --show-toplevel", "fatal");
        assert_eq!(RepoQuery::new(&runner).toplevel(), PathBuf::from("/work/repo"));
    }

    #[test]
    fn test_git_dir_is_resolved_against_workdir() {
        let runner = ScriptedRunner::in_dir("/work/repo").ok("git rev-parse --git-dir", ".git");
        assert_eq!(
            RepoQuery::new(&runner).hooks_dir(),
            Some(PathBuf::from("/work/repo/.git/hooks"))
        );
    }
}
