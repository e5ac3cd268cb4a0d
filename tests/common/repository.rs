//! Real repositories in temporary directories, and a handle on the binary.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// A repository that lives as long as its `TempDir`.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.path.join(".git").join("hooks")
    }
}

fn git(repo_path: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = StdCommand::new("git").args(args).current_dir(repo_path).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// An empty directory that is not a repository.
pub fn plain_dir() -> anyhow::Result<TempDir> {
    Ok(TempDir::new()?)
}

/// A freshly initialized repository with a local identity configured.
pub fn setup_test_repo() -> anyhow::Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();

    git(&path, &["init"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo { temp_dir, path })
}

/// A repository holding one commit of `initial.txt`.
pub fn setup_test_repo_with_initial_commit() -> anyhow::Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;
    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> anyhow::Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> anyhow::Result<()> {
    git(repo_path, &["add", filename]).map(|_| ())
}

pub fn git_commit(repo_path: &Path, message: &str) -> anyhow::Result<()> {
    git(repo_path, &["commit", "-m", message]).map(|_| ())
}

pub fn current_branch(repo_path: &Path) -> anyhow::Result<String> {
    git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
}

pub fn last_subject(repo_path: &Path) -> anyhow::Result<String> {
    git(repo_path, &["log", "-1", "--format=%s"])
}

pub fn short_status(repo_path: &Path) -> anyhow::Result<String> {
    git(repo_path, &["status", "--porcelain"])
}

pub fn stash_count(repo_path: &Path) -> anyhow::Result<usize> {
    Ok(git(repo_path, &["stash", "list"])?.lines().count())
}

/// The gitcli binary running in `dir`, with desktop notifications and
/// colors off.
pub fn gitcli(dir: &Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("gitcli")?;
    cmd.current_dir(dir)
        .env("GITCLI_NO_NOTIFY", "1")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    Ok(cmd)
}
