//! Command handlers and the dispatcher that routes to them.
//!
//! Every handler takes the shared [`Session`] and returns `Result<()>`.
//! User mistakes and unmet preconditions are printed by the handler, which
//! then returns `Ok(())`; only internal failures travel up as errors.

pub mod advanced;
pub mod branches;
pub mod conflicts;
pub mod dispatch;
pub mod help;
pub mod hooks;
pub mod operations;
pub mod session;
pub mod settings;
pub mod stash;
pub mod workflows;

pub use dispatch::{dispatch, print_unknown};
pub use help::{print_help, print_welcome};
pub use session::Session;
pub use workflows::generate_commit_message;
