//! Predicates over gitcli output.

#![allow(dead_code)]

use predicates::prelude::*;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not a git repository")
}

pub fn unknown_command(token: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Unknown command: {token}"))
}

/// Section header printed by `status`.
pub fn has_status_header(branch: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Status for '{branch}'"))
}

pub fn has_help_group(group: &str) -> impl Predicate<str> {
    predicates::str::contains(group)
}
