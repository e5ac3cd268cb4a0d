//! Help and welcome screens rendered from the command table.

use crate::core::command_table::{CommandGroup, CommandTable};
use crate::core::output::{print_hint, print_rule, RULE_WIDTH};
use colored::*;

const USAGE_WIDTH: usize = 22;

fn banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule.magenta().bold());
    println!("  {}", title.magenta().bold());
    println!("{}", rule.magenta().bold());
}

pub fn print_help(table: &CommandTable) {
    banner("GitCLI Commands");
    for group in CommandGroup::ALL {
        println!("\n{}", group.title().yellow().bold());
        print_rule();
        for spec in table.in_group(group) {
            println!("  {}{}", format!("{:<USAGE_WIDTH$}", spec.usage).green(), spec.description);
        }
    }
    println!(
        "  {}{}",
        format!("{:<USAGE_WIDTH$}", table.exit_words.join(" / ")).green(),
        "Exit GitCLI"
    );
    println!();
    print_hint("Tip: 'save' stages, commits and pushes in one go.");
}

pub fn print_welcome(repo: &str, branch: &str) {
    banner("GitCLI - Git Operations Automation");
    println!("  {} {}", "Repository:".cyan(), repo.white());
    println!("  {} {}", "Branch:".cyan(), branch.white());
    println!("{}", "=".repeat(RULE_WIDTH).magenta().bold());
    println!("\n{}", "Quick Start:".green());
    println!("  {}{}", format!("{:<16}", "save").cyan(), "Stage, commit, and push");
    println!("  {}{}", format!("{:<16}", "save <message>").cyan(), "Save with commit message");
    println!();
    print_hint("Type 'help' for all commands | Press Tab for auto-complete");
}
