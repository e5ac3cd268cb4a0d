//! Interactive merge conflict triage.
//!
//! The conflicted file list is re-read from git at the top of every menu
//! round, so edits made outside the shell are always reflected. Once the
//! list is empty the merge is completed.

use crate::commands::session::Session;
use crate::core::{
    colors::{classify_marker_line, format_conflict_line, MarkerKind},
    error::Result,
    output::{print_error, print_hint, print_info, print_menu, print_rule, print_section_header, print_success, print_warning},
    prompt::{parse_choice, Strength},
};
use colored::*;
use std::path::{Path, PathBuf};

const MENU: [&str; 7] = [
    "View conflicts in a file",
    "Open file in editor",
    "Accept ours (current branch)",
    "Accept theirs (incoming branch)",
    "Mark as resolved",
    "Abort merge",
    "Exit",
];

const FALLBACK_EDITORS: [&str; 4] = ["code", "nano", "vim", "vi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Ours,
    Theirs,
}

impl Side {
    fn flag(self) -> &'static str {
        match self {
            Side::Ours => "--ours",
            Side::Theirs => "--theirs",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Side::Ours => "current branch",
            Side::Theirs => "incoming branch",
        }
    }
}

enum Target {
    One(String),
    All,
}

/// Number of `<<<<<<<` markers in `content`.
pub fn count_conflicts(content: &str) -> usize {
    content
        .lines()
        .filter(|line| classify_marker_line(line) == Some(MarkerKind::Start))
        .count()
}

fn show_markers(path: &Path) -> usize {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            print_error(&format!("Error reading file: {e}"));
            return 0;
        }
    };

    let mut in_conflict = false;
    for (i, line) in content.lines().enumerate() {
        match classify_marker_line(line) {
            Some(MarkerKind::Start) => in_conflict = true,
            Some(MarkerKind::End) => {
                println!("{}", format_conflict_line(i + 1, line, true));
                in_conflict = false;
                continue;
            }
            _ => {}
        }
        if in_conflict {
            println!("{}", format_conflict_line(i + 1, line, true));
        }
    }
    count_conflicts(&content)
}

fn find_on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

/// `$VISUAL`, then `$EDITOR`, then the first fallback editor on `PATH`.
fn resolve_editor() -> Option<Vec<String>> {
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(value) = std::env::var(var) {
            let parts: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                return Some(parts);
            }
        }
    }

    FALLBACK_EDITORS
        .iter()
        .find(|editor| find_on_path(editor))
        .map(|editor| match *editor {
            "code" => vec!["code".to_string(), "--wait".to_string()],
            other => vec![other.to_string()],
        })
}

fn open_in_editor(s: &Session, path: &Path) -> bool {
    let Some(editor) = resolve_editor() else {
        print_error("No editor found. Set $EDITOR to choose one.");
        return false;
    };

    let file = path.to_string_lossy();
    let mut args: Vec<&str> = editor[1..].iter().map(String::as_str).collect();
    args.push(&file);
    log::debug!("opening {} with {}", file, editor[0]);
    s.runner.execute_inherited(&editor[0], &args)
}

fn print_files(files: &[String]) {
    print_section_header(&format!("Conflicted Files ({})", files.len()));
    for (i, file) in files.iter().enumerate() {
        println!("  {}. {}", i + 1, file.yellow());
    }
    print_rule();
}

fn pick_file(s: &mut Session, files: &[String], allow_all: bool) -> Result<Option<Target>> {
    let question = if allow_all {
        format!("Enter file number (1-{}, or 'all'):", files.len())
    } else {
        format!("Enter file number (1-{}):", files.len())
    };
    let answer = s.ask(&question)?;
    if allow_all && answer.eq_ignore_ascii_case("all") {
        return Ok(Some(Target::All));
    }
    match parse_choice(&answer, files.len()) {
        Some(n) => Ok(Some(Target::One(files[n - 1].clone()))),
        None => {
            print_error("Invalid file number.");
            Ok(None)
        }
    }
}

fn mark_resolved(s: &Session, files: &[&str]) -> bool {
    let specs = s.query().top_pathspecs(files);
    let mut args = vec!["add", "--"];
    args.extend(specs.iter().map(String::as_str));
    s.git(&args)
}

fn accept(s: &mut Session, files: &[String], side: Side) -> Result<()> {
    let Some(target) = pick_file(s, files, true)? else {
        return Ok(());
    };

    let (question, paths): (String, Vec<&str>) = match &target {
        Target::All => (
            format!("Accept {} version for ALL files?", side.label()),
            files.iter().map(String::as_str).collect(),
        ),
        Target::One(file) => (
            format!("Accept {} version for {file}?", side.label()),
            vec![file.as_str()],
        ),
    };
    if !s.confirm(&question, Strength::Low)? {
        print_info("Canceled.");
        return Ok(());
    }

    let specs = s.query().top_pathspecs(&paths);
    let mut args = vec!["checkout", side.flag(), "--"];
    args.extend(specs.iter().map(String::as_str));
    if s.git(&args) && mark_resolved(s, &paths) {
        print_success(&format!(
            "{} resolved with {} version.",
            paths.join(", "),
            side.label()
        ));
    }
    Ok(())
}

/// Finish the merge once nothing is conflicted.
pub fn complete_merge(s: &mut Session) -> Result<()> {
    print_info("Ready to complete merge!");
    if !s.query().merge_in_progress() {
        print_success("Changes staged. Use 'commit' to commit.");
        return Ok(());
    }

    let message = s.ask("Enter merge commit message (or press Enter for default):")?;
    let committed = if message.is_empty() {
        s.git(&["commit", "--no-edit"])
    } else {
        s.git(&["commit", "-m", &message])
    };
    if committed {
        print_success("Merge completed successfully!");
    } else {
        print_error("Merge commit failed.");
    }
    Ok(())
}

pub fn resolve(s: &mut Session) -> Result<()> {
    let mut first_round = true;
    loop {
        let files = s.query().conflicted_files();
        if files.is_empty() {
            if first_round {
                print_success("No conflicts detected!");
            } else {
                print_success("All conflicts resolved!");
                complete_merge(s)?;
            }
            return Ok(());
        }
        if first_round {
            print_warning("Merge conflicts detected!");
        }
        first_round = false;

        print_files(&files);
        print_menu(&MENU);
        match s.choose("Choose option (1-7):", MENU.len())? {
            Some(1) => {
                if let Some(Target::One(file)) = pick_file(s, &files, false)? {
                    print_section_header(&format!("Conflicts in {file}"));
                    let count = show_markers(&s.query().toplevel().join(&file));
                    print_rule();
                    print_warning(&format!("Found {count} conflict(s)"));
                    println!("  {}", "<<<<<<< Current changes (yours)".red());
                    println!("  {}", "======= Separator".yellow());
                    println!("  {}", ">>>>>>> Incoming changes (theirs)".green());
                }
            }
            Some(2) => {
                if let Some(Target::One(file)) = pick_file(s, &files, false)? {
                    let path: PathBuf = s.query().toplevel().join(&file);
                    print_info(&format!("Opening {file} in editor..."));
                    print_hint("Remove the conflict markers and save the file.");
                    if open_in_editor(s, &path)
                        && s.confirm("Mark this file as resolved?", Strength::Low)?
                        && mark_resolved(s, &[file.as_str()])
                    {
                        print_success(&format!("{file} marked as resolved!"));
                    }
                }
            }
            Some(3) => accept(s, &files, Side::Ours)?,
            Some(4) => accept(s, &files, Side::Theirs)?,
            Some(5) => {
                if let Some(Target::One(file)) = pick_file(s, &files, false)? {
                    if mark_resolved(s, &[file.as_str()]) {
                        print_success(&format!("{file} marked as resolved!"));
                    }
                }
            }
            Some(6) => {
                if s.confirm("Abort merge and return to pre-merge state?", Strength::High)? {
                    if s.git(&["merge", "--abort"]) {
                        print_success("Merge aborted!");
                    }
                } else {
                    print_info("Abort canceled.");
                    continue;
                }
                return Ok(());
            }
            Some(7) => {
                print_info("Exiting conflict resolution.");
                print_hint("Run 'resolve-conflicts' to continue later.");
                return Ok(());
            }
            _ => print_error("Invalid option."),
        }
    }
}

/// Ask whether to enter conflict resolution right away.
pub fn offer_resolution(s: &mut Session) -> Result<()> {
    if s.confirm("Resolve conflicts now?", Strength::Lenient)? {
        resolve(s)
    } else {
        print_hint("Run 'resolve-conflicts' when you are ready.");
        Ok(())
    }
}

pub fn check(s: &mut Session) -> Result<()> {
    let files = s.query().conflicted_files();
    if files.is_empty() {
        print_success("No conflicts detected!");
        return Ok(());
    }

    print_warning(&format!("{} file(s) with conflicts:", files.len()));
    for file in &files {
        println!("  • {}", file.yellow());
    }
    print_hint("Run 'resolve-conflicts' to resolve them.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::testing::session;
    use crate::core::prompt::testing::ScriptedPrompter;
    use crate::core::runner::testing::ScriptedRunner;
    use tempfile::TempDir;

    const CONFLICTS: &str = "git diff --name-only --diff-filter=U";

    fn merging_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git").join("MERGE_HEAD"), "abc123\n").unwrap();
        dir
    }

    #[test]
    fn test_count_conflicts() {
        let content = "a\n<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>> other\nb\n<<<<<<< HEAD\nx\n=======\ny\n>>>>>>> other\n";
        assert_eq!(count_conflicts(content), 2);
        assert_eq!(count_conflicts("clean\nfile\n"), 0);
    }

    #[test]
    fn test_accept_theirs_all_completes_merge() {
        let dir = merging_repo();
        let runner = ScriptedRunner::in_dir(dir.path())
            .ok(CONFLICTS, "a.txt\nb.txt")
            .ok(CONFLICTS, "")
            .ok("git rev-parse --git-dir", ".git");
        let mut prompter = ScriptedPrompter::new(&["4", "all", "y", ""]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();

        assert!(runner.ran("git checkout --theirs -- a.txt b.txt"));
        assert!(runner.ran("git add -- a.txt b.txt"));
        assert_eq!(runner.count("git commit --no-edit"), 1);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_resolved_without_merge_head_only_stages() {
        let dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::in_dir(dir.path())
            .ok(CONFLICTS, "a.txt")
            .ok(CONFLICTS, "")
            .ok("git rev-parse --git-dir", ".git");
        let mut prompter = ScriptedPrompter::new(&["5", "1"]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();

        assert!(runner.ran("git add -- a.txt"));
        assert!(!runner.calls().iter().any(|c| c.starts_with("git commit")));
    }

    #[test]
    fn test_accept_from_subdirectory_uses_top_pathspecs() {
        let top = merging_repo();
        let sub = top.path().join("src");
        std::fs::create_dir_all(&sub).unwrap();
        let runner = ScriptedRunner::in_dir(&sub)
            .ok(CONFLICTS, "a.txt")
            .ok(CONFLICTS, "")
            .ok("git rev-parse --show-toplevel", &top.path().display().to_string())
            .ok("git rev-parse --git-dir", &top.path().join(".git").display().to_string());
        let mut prompter = ScriptedPrompter::new(&["3", "1", "y", ""]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();

        assert!(runner.ran("git checkout --ours -- :(top)a.txt"));
        assert!(runner.ran("git add -- :(top)a.txt"));
        assert_eq!(runner.count("git commit --no-edit"), 1);
    }

    #[test]
    fn test_abort_requires_literal_yes() {
        let runner = ScriptedRunner::new().ok(CONFLICTS, "a.txt");
        let mut prompter = ScriptedPrompter::new(&["6", "y", "7"]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();
        assert!(!runner.ran("git merge --abort"));

        let runner = ScriptedRunner::new().ok(CONFLICTS, "a.txt");
        let mut prompter = ScriptedPrompter::new(&["6", "yes"]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();
        assert!(runner.ran("git merge --abort"));
    }

    #[test]
    fn test_declined_accept_changes_nothing() {
        let runner = ScriptedRunner::new().ok(CONFLICTS, "a.txt\nb.txt");
        let mut prompter = ScriptedPrompter::new(&["3", "2", "n", "7"]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();
        assert!(!runner.calls().iter().any(|c| c.starts_with("git checkout")));
    }

    #[test]
    fn test_list_is_recomputed_every_round() {
        let runner = ScriptedRunner::new().ok(CONFLICTS, "a.txt");
        let mut prompter = ScriptedPrompter::new(&["9", "7"]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();
        assert_eq!(runner.count(CONFLICTS), 2);
    }

    #[test]
    fn test_no_conflicts_asks_nothing() {
        let runner = ScriptedRunner::new();
        let mut prompter = ScriptedPrompter::new(&[]);
        resolve(&mut session(&runner, &mut prompter)).unwrap();
        assert!(prompter.questions.is_empty());
    }
}
