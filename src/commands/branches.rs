use crate::commands::session::Session;
use crate::core::{
    error::Result,
    output::{print_error, print_info, print_menu, print_section_header, print_success, print_warning},
    prompt::Strength,
};

/// Branch names typed by users: trimmed, inner spaces become hyphens.
pub fn sanitize_branch_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}

fn name_from(s: &mut Session, arg: Option<&str>, question: &str) -> Result<String> {
    let raw = match arg {
        Some(name) => name.to_string(),
        None => s.ask(question)?,
    };
    Ok(sanitize_branch_name(&raw))
}

pub fn switch_branch(s: &mut Session, name: Option<&str>) -> Result<()> {
    let branch = match name {
        Some(name) => sanitize_branch_name(name),
        None => {
            print_section_header("Available branches");
            s.runner.git_show(&["branch"]);
            s.ask("Enter branch name to switch to:")?
        }
    };
    if branch.is_empty() {
        print_error("Branch name cannot be empty.");
        return Ok(());
    }

    if !s.query().branch_exists(&branch) {
        print_warning(&format!("Branch '{branch}' doesn't exist locally."));
        if s.confirm("Would you like to create it?", Strength::Low)? {
            return add_branch(s, Some(&branch));
        }
        print_info("Switch canceled.");
        return Ok(());
    }

    if s.git(&["checkout", &branch]) {
        print_success(&format!("Switched to branch '{branch}'"));
    }
    Ok(())
}

pub fn add_branch(s: &mut Session, name: Option<&str>) -> Result<()> {
    let branch = name_from(s, name, "Enter new branch name:")?;
    if branch.is_empty() {
        print_error("Branch name cannot be empty.");
        return Ok(());
    }
    if s.query().branch_exists(&branch) {
        print_error(&format!("Branch '{branch}' already exists."));
        return Ok(());
    }

    if s.git(&["checkout", "-b", &branch]) {
        print_success(&format!("Branch '{branch}' created and switched to it."));
    }
    Ok(())
}

pub fn delete_branch(s: &mut Session, name: Option<&str>) -> Result<()> {
    let branch = name_from(s, name, "Enter branch name to delete:")?;
    if branch.is_empty() {
        print_error("Branch name cannot be empty.");
        return Ok(());
    }
    if branch == s.query().current_branch() {
        print_error("Cannot delete the branch you are currently on.");
        return Ok(());
    }

    print_info("Delete options:");
    print_menu(&["Normal delete (safe)", "Force delete (-D)"]);
    let flag = match s.choose("Choose option (1/2):", 2)? {
        Some(1) => "-d",
        Some(2) => "-D",
        _ => {
            print_error("Invalid option.");
            return Ok(());
        }
    };

    if !s.confirm(
        &format!("Are you sure you want to delete branch '{branch}'?"),
        Strength::Low,
    )? {
        print_info("Delete canceled.");
        return Ok(());
    }
    if s.git(&["branch", flag, &branch]) {
        print_success(&format!("Branch '{branch}' deleted."));
    }
    Ok(())
}

pub fn rename_branch(s: &mut Session) -> Result<()> {
    let old_name = s.ask("Enter branch name to rename (leave empty for current branch):")?;
    let old_name = if old_name.is_empty() {
        s.query().current_branch()
    } else {
        old_name
    };

    let new_name = sanitize_branch_name(&s.ask("Enter new branch name:")?);
    if new_name.is_empty() {
        print_error("New branch name cannot be empty.");
        return Ok(());
    }
    if s.git(&["branch", "-m", &old_name, &new_name]) {
        print_success(&format!("Branch '{old_name}' renamed to '{new_name}'"));
    }
    Ok(())
}

pub fn list_branches(s: &mut Session) -> Result<()> {
    print_section_header("Branches");
    s.runner.git_show(&["branch", "--all"]);
    Ok(())
}
