//! Interpretation of git's textual results.
//!
//! Git reports rejected pushes and merge conflicts only through
//! human-readable text. This module is the single place that text is
//! matched; handlers branch on the returned outcome.
//!
//! # Public API
//! - [`PushOutcome`] / [`classify_push`]: result of `git push`
//! - [`MergeOutcome`] / [`classify_merge`]: result of pull, stash pop/apply
//!   and other commands that merge content into the working tree

use crate::core::runner::CommandOutput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Success,
    /// Remote has commits the local branch lacks.
    NonFastForward,
    /// Current branch has no upstream configured.
    NoUpstream,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Clean,
    Conflict,
    Failed(String),
}

fn failure_text(output: &CommandOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        output.stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}

pub fn classify_push(output: &CommandOutput) -> PushOutcome {
    if output.is_success() {
        return PushOutcome::Success;
    }

    let text = output.stderr.to_lowercase();
    if text.contains("rejected")
        && (text.contains("non-fast-forward") || text.contains("fetch first"))
    {
        PushOutcome::NonFastForward
    } else if text.contains("no upstream") || text.contains("--set-upstream") {
        PushOutcome::NoUpstream
    } else {
        PushOutcome::Failed(failure_text(output))
    }
}

/// Conflicts can be reported on either pipe and with either exit code.
pub fn classify_merge(output: &CommandOutput) -> MergeOutcome {
    if output.combined().contains("CONFLICT") {
        MergeOutcome::Conflict
    } else if output.is_success() {
        MergeOutcome::Clean
    } else {
        MergeOutcome::Failed(failure_text(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(stderr: &str) -> CommandOutput {
        CommandOutput::failure(1, stderr)
    }

    #[test]
    fn test_push_success() {
        assert_eq!(classify_push(&CommandOutput::success("")), PushOutcome::Success);
    }

    #[test]
    fn test_push_non_fast_forward() {
        let output = failed(
            "To github.com:me/repo.git\n ! [rejected]        main -> main (non-fast-forward)\nerror: failed to push some refs",
        );
        assert_eq!(classify_push(&output), PushOutcome::NonFastForward);

        let output = failed(" ! [rejected]        main -> main (fetch first)");
        assert_eq!(classify_push(&output), PushOutcome::NonFastForward);
    }

    #[test]
    fn test_push_no_upstream() {
        let output = failed(
            "fatal: The current branch feature has no upstream branch.\nTo push the current branch and set the remote as upstream, use\n\n    git push --set-upstream origin feature",
        );
        assert_eq!(classify_push(&output), PushOutcome::NoUpstream);
    }

    #[test]
    fn test_push_unknown_failure_keeps_message() {
        let output = failed("fatal: unable to access 'https://example.com/': Could not resolve host\n");
        assert_eq!(
            classify_push(&output),
            PushOutcome::Failed(
                "fatal: unable to access 'https://example.com/': Could not resolve host".to_string()
            )
        );
    }

    #[test]
    fn test_non_fast_forward_without_rejection_is_failure() {
        assert!(matches!(
            classify_push(&failed("non-fast-forward")),
            PushOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_merge_conflict_on_stdout() {
        let output = CommandOutput {
            code: 1,
            stdout: "Auto-merging a.txt\nCONFLICT (content): Merge conflict in a.txt".to_string(),
            stderr: String::new(),
        };
        assert_eq!(classify_merge(&output), MergeOutcome::Conflict);
    }

    #[test]
    fn test_merge_clean_and_failed() {
        assert_eq!(
            classify_merge(&CommandOutput::success("Already up to date.")),
            MergeOutcome::Clean
        );
        assert_eq!(
            classify_merge(&failed("error: No stash entries found.")),
            MergeOutcome::Failed("error: No stash entries found.".to_string())
        );
    }
}
