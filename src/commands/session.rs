//! Shared context handed to every handler.

use crate::core::{
    error::Result,
    hook_templates::HookCatalog,
    notify::Notifier,
    prompt::{self, Prompter, Strength},
    query::RepoQuery,
    runner::CommandRunner,
    command_table::CommandTable,
};
use std::path::Path;

pub struct Session<'a> {
    pub runner: &'a dyn CommandRunner,
    pub prompter: &'a mut dyn Prompter,
    pub notifier: Notifier,
    pub table: &'a CommandTable,
    pub hooks: &'a HookCatalog,
}

impl<'a> Session<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
        notifier: Notifier,
        table: &'a CommandTable,
        hooks: &'a HookCatalog,
    ) -> Self {
        Self {
            runner,
            prompter,
            notifier,
            table,
            hooks,
        }
    }

    pub fn query(&self) -> RepoQuery<'a> {
        RepoQuery::new(self.runner)
    }

    pub fn workdir(&self) -> &Path {
        self.runner.workdir()
    }

    pub fn ask(&mut self, question: &str) -> Result<String> {
        prompt::ask(self.prompter, question)
    }

    pub fn confirm(&mut self, question: &str, strength: Strength) -> Result<bool> {
        prompt::confirm(self.prompter, question, strength)
    }

    pub fn choose(&mut self, question: &str, count: usize) -> Result<Option<usize>> {
        prompt::choose(self.prompter, question, count)
    }

    /// Run git attached to the terminal; `true` on exit code 0.
    pub fn git(&self, args: &[&str]) -> bool {
        self.runner.git(args, false).is_some()
    }

    pub fn notify(&self, message: &str) {
        self.notifier.send(message);
    }
}
