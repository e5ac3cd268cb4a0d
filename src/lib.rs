//! GitCLI - an interactive git shell with guided menus and smart workflows.
//!
//! This library holds everything behind the `gitcli` binary: the process
//! runner and repository queries, the command table, the handlers and the
//! interactive shell. Handlers never talk to git directly; they go through
//! the [`CommandRunner`] seam so they can be driven by scripted doubles.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Process execution and repository queries
//! - Output classification for push and merge results
//! - Prompting with graded confirmations
//! - The static command table and hook catalog
//! - Persisted configuration and hook records
//! - Error handling and result types

pub mod commands;
pub mod core;
pub mod shell;

// Re-export the core public API for external users
pub use core::{
    classify_merge,
    classify_push,
    // Command vocabulary
    normalize,
    CommandOutput,
    // Process execution
    CommandRunner,
    CommandTable,
    // Persisted settings
    Config,
    // Error handling
    GitCliError,
    GitRunner,
    HookCatalog,
    HookConfig,
    HookInstaller,
    HookStore,
    MergeOutcome,
    PushOutcome,
    RepoQuery,
    RepositoryState,
    Result,
    Strength,
    COMMAND_TABLE,
    HOOK_CATALOG,
};
