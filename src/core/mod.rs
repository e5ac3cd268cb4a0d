//! Core functionality for the gitcli shell.
//!
//! This module provides the building blocks every handler relies on: process
//! execution, repository queries, output classification, prompting, the
//! command table, persisted settings and hook management.

pub mod classify;
pub mod colors;
pub mod command_table;
pub mod config;
pub mod dirs;
pub mod error;
pub mod hook_templates;
pub mod hooks;
pub mod notify;
pub mod output;
pub mod prompt;
pub mod query;
pub mod runner;
pub mod state;

// === Error handling ===
pub use error::{GitCliError, Result};

// === Process execution ===
// All git invocations go through this seam
pub use runner::{CommandOutput, CommandRunner, GitRunner};

// === Repository queries ===
pub use query::RepoQuery;
pub use state::RepositoryState;

// === Output classification ===
// The only place git's human-readable results are matched
pub use classify::{classify_merge, classify_push, MergeOutcome, PushOutcome};

// === Prompting ===
pub use prompt::{ask, choose, confirm, Prompter, StdinPrompter, Strength};

// === Command vocabulary ===
pub use command_table::{normalize, CommandGroup, CommandSpec, CommandTable, COMMAND_TABLE};

// === Persisted settings ===
pub use config::{Config, ValidationRules};
pub use hooks::{HookConfig, HookInstaller, HookRecord, HookStore};
pub use hook_templates::{HookCatalog, HOOK_CATALOG};

// === Notifications ===
pub use notify::Notifier;

// === Output formatting ===
pub use output::{
    print_error, print_hint, print_info, print_menu, print_section_header, print_success,
    print_warning,
};
