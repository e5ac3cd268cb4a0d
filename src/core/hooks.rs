//! Hook script generation, installation and the `.gitcli-hooks.json` record.
//!
//! # Public API
//! - [`HookConfig`]: Configuration resolved for a generated template
//! - [`HookStore`]: Persisted installation records keyed by hook type
//! - [`HookInstaller`]: Installs and uninstalls scripts in a hooks directory
//! - [`detect_languages`] / [`generate_script`]: Pure helpers used by both
//!
//! # Backups
//! Installing over an existing hook renames it to `<hook>.backup`.
//! Uninstalling restores that file unchanged when it exists.

use crate::core::error::{GitCliError, Result};
use crate::core::hook_templates::{
    Generator, HookCatalog, HookTemplate, LanguageTools, TemplateBody, Tool,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const HOOKS_FILE_NAME: &str = ".gitcli-hooks.json";
const BACKUP_SUFFIX: &str = ".backup";
const SAMPLE_SUFFIX: &str = ".sample";
const STAGING_SUFFIX: &str = ".gitcli-new";

/// Tools chosen for one language, by tool key.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formatters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_runners: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build_commands: Vec<String>,
}

impl LanguageSelection {
    pub fn is_empty(&self) -> bool {
        self.linters.is_empty()
            && self.formatters.is_empty()
            && self.test_runners.is_empty()
            && self.build_commands.is_empty()
    }

    /// Non-empty tool lists with their field names, for display.
    pub fn groups(&self) -> Vec<(&'static str, &[String])> {
        [
            ("linters", &self.linters),
            ("formatters", &self.formatters),
            ("test_runners", &self.test_runners),
            ("build_commands", &self.build_commands),
        ]
        .into_iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(name, list)| (name, list.as_slice()))
        .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HookConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub languages: BTreeMap<String, LanguageSelection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_commands: Vec<String>,
}

impl HookConfig {
    pub fn custom(commands: Vec<String>) -> Self {
        Self {
            custom_commands: commands,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.languages.values().all(LanguageSelection::is_empty) && self.custom_commands.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HookRecord {
    pub template: String,
    #[serde(default)]
    pub config: HookConfig,
    #[serde(default)]
    pub installed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HookStore {
    #[serde(default)]
    pub enabled_hooks: BTreeMap<String, HookRecord>,
}

impl HookStore {
    pub fn path_in(workdir: &Path) -> PathBuf {
        workdir.join(HOOKS_FILE_NAME)
    }

    pub fn load(workdir: &Path) -> Result<Self> {
        let path = Self::path_in(workdir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| GitCliError::read_failed(&path, e))?;
        serde_json::from_str(&content).map_err(|e| GitCliError::parse_failed(&path, e))
    }

    pub fn save(&self, workdir: &Path) -> Result<()> {
        let path = Self::path_in(workdir);
        let content =
            serde_json::to_string_pretty(self).map_err(GitCliError::serialization_failed)?;
        std::fs::write(&path, content).map_err(|e| GitCliError::write_failed(&path, e))
    }
}

fn matches_pattern(names: &[String], root: &Path, pattern: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(ext) => {
            let suffix = format!(".{ext}");
            names.iter().any(|name| name.ends_with(&suffix))
        }
        None => root.join(pattern).exists(),
    }
}

/// Languages whose detection patterns match the top level of `root`, in
/// table order.
pub fn detect_languages<'c>(catalog: &'c HookCatalog, root: &Path) -> Vec<&'c LanguageTools> {
    let names: Vec<String> = match std::fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(e) => {
            log::debug!("cannot scan {}: {e}", root.display());
            Vec::new()
        }
    };

    catalog
        .languages
        .iter()
        .filter(|lang| {
            lang.detection
                .iter()
                .any(|pattern| matches_pattern(&names, root, pattern))
        })
        .collect()
}

fn push_tool_block(lines: &mut Vec<String>, tool: &Tool, label: &str, fail_fast: bool) {
    lines.push(format!("if command -v {} >/dev/null 2>&1; then", tool.binary()));
    lines.push(format!("    echo \"  -> {label} {}...\"", tool.key));
    if fail_fast {
        lines.push(format!("    {} || exit 1", tool.command));
    } else {
        lines.push(format!("    {}", tool.command));
        lines.push("    git add -u".to_string());
    }
    lines.push("fi".to_string());
}

fn push_command_block(lines: &mut Vec<String>, command: &str) {
    lines.push(format!("echo \"  -> {command}\""));
    lines.push(format!("{command} || exit 1"));
}

fn render_tools(
    lines: &mut Vec<String>,
    catalog: &HookCatalog,
    config: &HookConfig,
    generator: Generator,
) {
    for (lang_key, selection) in &config.languages {
        let Some(lang) = catalog.language(lang_key) else {
            log::warn!("skipping unknown language '{lang_key}' in hook config");
            continue;
        };

        let (available, chosen, label, fail_fast) = match generator {
            Generator::Linting => (lang.linters, &selection.linters, "Running", true),
            Generator::Formatting => (lang.formatters, &selection.formatters, "Formatting with", false),
            Generator::Tests => (lang.test_runners, &selection.test_runners, "Running", true),
            Generator::Build => {
                if !selection.build_commands.is_empty() {
                    lines.push(format!("# {}", lang.name));
                    for command in &selection.build_commands {
                        push_command_block(lines, command);
                    }
                    lines.push(String::new());
                }
                continue;
            }
            Generator::Custom => continue,
        };

        if chosen.is_empty() {
            continue;
        }
        lines.push(format!("# {}", lang.name));
        for key in chosen {
            match available.iter().find(|tool| tool.key == key.as_str()) {
                Some(tool) => push_tool_block(lines, tool, label, fail_fast),
                None => log::warn!("skipping unknown tool '{key}' for {}", lang.name),
            }
        }
        lines.push(String::new());
    }
}

/// Render the script for `template`. Static templates ignore `config`.
pub fn generate_script(catalog: &HookCatalog, template: &HookTemplate, config: &HookConfig) -> String {
    let generator = match template.body {
        TemplateBody::Static(script) => return script.to_string(),
        TemplateBody::Generated(generator) => generator,
    };

    let mut lines = vec![
        "#!/bin/sh".to_string(),
        format!("# GitCLI: {} Hook", template.name),
        String::new(),
    ];

    let (intro, outro) = match generator {
        Generator::Linting => ("Running linters...", "Linting passed."),
        Generator::Formatting => ("Auto-formatting code...", "Formatting complete."),
        Generator::Tests => ("Running tests...", "Tests passed."),
        Generator::Build => ("Building project...", "Build successful."),
        Generator::Custom => ("Running custom commands...", "Custom commands completed."),
    };
    lines.push(format!("echo \"{intro}\""));
    lines.push(String::new());

    if generator == Generator::Custom {
        for command in &config.custom_commands {
            push_command_block(&mut lines, command);
        }
        lines.push(String::new());
    } else {
        render_tools(&mut lines, catalog, config, generator);
    }

    lines.push(format!("echo \"{outro}\""));
    lines.join("\n") + "\n"
}

/// An existing file in the hooks directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledHook {
    pub name: String,
    pub executable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    NotInstalled,
    BackupRestored,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub hook_path: PathBuf,
    pub backup: Option<PathBuf>,
}

fn discard(path: &Path) {
    if path.is_file() {
        if let Err(e) = std::fs::remove_file(path) {
            log::debug!("could not remove {}: {e}", path.display());
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Writes hook scripts into `hooks_dir` and keeps the record file in
/// `workdir` in step.
pub struct HookInstaller<'a> {
    catalog: &'a HookCatalog,
    hooks_dir: PathBuf,
    workdir: PathBuf,
}

impl<'a> HookInstaller<'a> {
    pub fn new(catalog: &'a HookCatalog, hooks_dir: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            hooks_dir: hooks_dir.into(),
            workdir: workdir.into(),
        }
    }

    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn hook_path(&self, hook_type: &str) -> PathBuf {
        self.hooks_dir.join(hook_type)
    }

    fn backup_path(&self, hook_type: &str) -> PathBuf {
        self.hooks_dir.join(format!("{hook_type}{BACKUP_SUFFIX}"))
    }

    fn staging_path(&self, hook_type: &str) -> PathBuf {
        self.hooks_dir.join(format!("{hook_type}{STAGING_SUFFIX}"))
    }

    /// Write an executable script next to its final location.
    fn stage_script(&self, hook_type: &str, script: &str) -> Result<PathBuf> {
        let path = self.staging_path(hook_type);
        let written = std::fs::write(&path, script).and_then(|()| make_executable(&path));
        if let Err(e) = written {
            discard(&path);
            return Err(GitCliError::hook_install_failed(&path, e));
        }
        Ok(path)
    }

    pub fn install(&self, hook_type: &str, template_key: &str, config: HookConfig) -> Result<InstallReport> {
        let hook = self
            .catalog
            .hook_type(hook_type)
            .ok_or_else(|| GitCliError::unknown_hook_type(hook_type))?;
        let template = hook
            .template(template_key)
            .ok_or_else(|| GitCliError::unknown_template(hook_type, template_key))?;
        if !self.hooks_dir.is_dir() {
            return Err(GitCliError::HooksDirNotFound);
        }

        let mut store = HookStore::load(&self.workdir)?;
        let hook_path = self.hook_path(hook_type);
        let staged = self.stage_script(hook_type, &generate_script(self.catalog, template, &config))?;

        // A hook recorded as ours is replaced in place. Only a foreign hook
        // moves to the backup.
        let ours = store.enabled_hooks.contains_key(hook_type);
        let backup = if hook_path.exists() && !ours {
            let backup_path = self.backup_path(hook_type);
            if let Err(e) = std::fs::rename(&hook_path, &backup_path) {
                discard(&staged);
                return Err(GitCliError::hook_install_failed(&backup_path, e));
            }
            log::info!("backed up {} to {}", hook_path.display(), backup_path.display());
            Some(backup_path)
        } else {
            None
        };

        if let Err(e) = std::fs::rename(&staged, &hook_path) {
            discard(&staged);
            if let Some(backup_path) = &backup {
                if let Err(restore) = std::fs::rename(backup_path, &hook_path) {
                    log::warn!("could not restore {}: {restore}", backup_path.display());
                }
            }
            return Err(GitCliError::hook_install_failed(&hook_path, e));
        }

        store.enabled_hooks.insert(
            hook_type.to_string(),
            HookRecord {
                template: template_key.to_string(),
                config,
                installed_at: Some(Utc::now()),
            },
        );
        store.save(&self.workdir)?;

        Ok(InstallReport { hook_path, backup })
    }

    pub fn uninstall(&self, hook_type: &str) -> Result<UninstallOutcome> {
        let hook_path = self.hook_path(hook_type);
        if !hook_path.exists() {
            return Ok(UninstallOutcome::NotInstalled);
        }

        let backup_path = self.backup_path(hook_type);
        let outcome = if backup_path.exists() {
            std::fs::remove_file(&hook_path).map_err(|e| GitCliError::write_failed(&hook_path, e))?;
            std::fs::rename(&backup_path, &hook_path)
                .map_err(|e| GitCliError::write_failed(&hook_path, e))?;
            UninstallOutcome::BackupRestored
        } else {
            std::fs::remove_file(&hook_path).map_err(|e| GitCliError::write_failed(&hook_path, e))?;
            UninstallOutcome::Removed
        };

        let mut store = HookStore::load(&self.workdir)?;
        if store.enabled_hooks.remove(hook_type).is_some() {
            store.save(&self.workdir)?;
        }
        Ok(outcome)
    }

    /// Hook files present, excluding samples. Backups are included only
    /// when `include_backups` is set.
    pub fn installed(&self, include_backups: bool) -> Result<Vec<InstalledHook>> {
        let entries = std::fs::read_dir(&self.hooks_dir)
            .map_err(|e| GitCliError::read_failed(&self.hooks_dir, e))?;

        let mut hooks: Vec<InstalledHook> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.ends_with(SAMPLE_SUFFIX))
            .filter(|name| !name.ends_with(STAGING_SUFFIX))
            .filter(|name| include_backups || !name.ends_with(BACKUP_SUFFIX))
            .map(|name| InstalledHook {
                executable: is_executable(&self.hooks_dir.join(&name)),
                name,
            })
            .collect();
        hooks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hooks)
    }
}
