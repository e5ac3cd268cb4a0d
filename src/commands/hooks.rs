//! Interactive hook management: install, uninstall, list and browse
//! templates.

use crate::commands::session::Session;
use crate::core::{
    colors::get_flag_colored,
    error::Result,
    hook_templates::{Generator, HookTemplate, HookType, LanguageTools, TemplateBody, Tool},
    hooks::{detect_languages, HookConfig, HookInstaller, HookStore, LanguageSelection, UninstallOutcome},
    output::{print_error, print_hint, print_info, print_menu, print_rule, print_section_header, print_success, print_warning},
    prompt::Strength,
};
use colored::*;

/// Parse a whitespace separated list of 1-based numbers into 0-based
/// indices. Any entry out of range or not a number rejects the whole list.
pub fn parse_selection(answer: &str, count: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for word in answer.split_whitespace() {
        match word.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => {
                if !picked.contains(&(n - 1)) {
                    picked.push(n - 1);
                }
            }
            _ => return None,
        }
    }
    (!picked.is_empty()).then_some(picked)
}

fn installer<'s>(s: &Session<'s>) -> Option<HookInstaller<'s>> {
    match s.query().hooks_dir().filter(|dir| dir.is_dir()) {
        Some(dir) => Some(HookInstaller::new(s.hooks, dir, s.workdir())),
        None => {
            print_error("Not a git repository or hooks directory not found.");
            None
        }
    }
}

pub fn manage(s: &mut Session) -> Result<()> {
    print_section_header("Git Hooks Management");
    print_menu(&[
        "Install hook",
        "Uninstall hook",
        "List installed hooks",
        "View hook templates",
        "Back",
    ]);

    match s.choose("Choose option (1-5):", 5)? {
        Some(1) => install_menu(s),
        Some(2) => uninstall_menu(s),
        Some(3) => list(s),
        Some(4) => {
            view_templates(s);
            Ok(())
        }
        Some(5) => Ok(()),
        _ => {
            print_error("Invalid option.");
            Ok(())
        }
    }
}

fn install_menu(s: &mut Session) -> Result<()> {
    let Some(installer) = installer(s) else {
        return Ok(());
    };
    let hook_types = s.hooks.hook_types;

    print_section_header("Available Hook Types");
    let labels: Vec<String> = hook_types
        .iter()
        .map(|h| format!("{} - {}", h.name, h.description))
        .collect();
    print_menu(&labels.iter().map(String::as_str).collect::<Vec<_>>());
    let Some(n) = s.choose(&format!("Choose hook type (1-{}):", hook_types.len()), hook_types.len())? else {
        print_error("Invalid option.");
        return Ok(());
    };
    let hook = &hook_types[n - 1];

    let Some(template) = select_template(s, hook)? else {
        return Ok(());
    };

    let config = match template.body {
        TemplateBody::Static(_) => HookConfig::default(),
        TemplateBody::Generated(generator) => match configure(s, generator)? {
            Some(config) => config,
            None => {
                print_error("Configuration required. Installation canceled.");
                return Ok(());
            }
        },
    };

    print_info(&format!("Installing {}...", template.name));
    let report = installer.install(hook.key, template.key, config)?;
    if let Some(backup) = &report.backup {
        print_warning(&format!("Existing {} hook backed up to {}", hook.key, backup.display()));
    }
    print_success("Hook installed successfully!");
    print_hint(&format!("This hook will run automatically on {}", hook.key));
    Ok(())
}

fn select_template<'h>(s: &mut Session, hook: &'h HookType) -> Result<Option<&'h HookTemplate>> {
    print_section_header(&format!("Available Templates for {}", hook.name));
    let labels: Vec<String> = hook
        .templates
        .iter()
        .map(template_line)
        .collect();
    print_menu(&labels.iter().map(String::as_str).collect::<Vec<_>>());

    let count = hook.templates.len();
    match s.choose(&format!("Choose template (1-{count}):"), count)? {
        Some(n) => Ok(Some(&hook.templates[n - 1])),
        None => {
            print_error("Invalid option.");
            Ok(None)
        }
    }
}

fn configure(s: &mut Session<'_>, generator: Generator) -> Result<Option<HookConfig>> {
    if generator == Generator::Custom {
        return configure_custom_commands(s);
    }

    let Some(languages) = select_languages(s)? else {
        return Ok(None);
    };

    let mut config = HookConfig::default();
    for lang in languages {
        print_info(&format!("Configuring {}:", lang.name));
        let mut selection = LanguageSelection::default();
        match generator {
            Generator::Linting => {
                selection.linters = pick_tools(s, "linters", lang.linters, true)?;
            }
            Generator::Formatting => {
                selection.formatters = pick_tools(s, "formatters", lang.formatters, true)?;
            }
            Generator::Tests => {
                selection.test_runners = pick_tools(s, "test runner", lang.test_runners, false)?;
            }
            Generator::Build => {
                selection.build_commands = pick_build_commands(s, lang.build_commands)?;
            }
            Generator::Custom => {}
        }
        if !selection.is_empty() {
            config.languages.insert(lang.key.to_string(), selection);
        }
    }

    Ok((!config.is_empty()).then_some(config))
}

fn select_languages<'c>(s: &mut Session<'c>) -> Result<Option<Vec<&'c LanguageTools>>> {
    let catalog = s.hooks;
    let detected = detect_languages(catalog, s.workdir());

    if detected.is_empty() {
        print_warning("No supported languages detected in this repository.");
        print_info(&format!("Supported languages: {}", catalog.language_keys().join(", ")));
        if !s.confirm("Would you like to manually select languages?", Strength::Low)? {
            return Ok(None);
        }
    } else {
        let names: Vec<&str> = detected.iter().map(|l| l.name).collect();
        print_success(&format!("Detected languages: {}", names.join(", ")));
        if s.confirm("Use detected languages?", Strength::Lenient)? {
            return Ok(Some(detected));
        }
    }

    print_info("Select languages to configure:");
    for (i, lang) in catalog.languages.iter().enumerate() {
        let marker = if detected.iter().any(|d| d.key == lang.key) { "x" } else { " " };
        println!("  {}. [{marker}] {}", i + 1, lang.name);
    }
    let answer = s.ask("Enter numbers (space-separated, e.g., '1 2'):")?;
    match parse_selection(&answer, catalog.languages.len()) {
        Some(indices) => Ok(Some(indices.into_iter().map(|i| &catalog.languages[i]).collect())),
        None => {
            print_error("No valid languages selected.");
            Ok(None)
        }
    }
}

fn pick_tools(s: &mut Session, label: &str, tools: &[Tool], multiple: bool) -> Result<Vec<String>> {
    if tools.is_empty() {
        return Ok(Vec::new());
    }
    print_info(&format!("  Available {label}:"));
    for (i, tool) in tools.iter().enumerate() {
        println!("    {}. {}", i + 1, tool.key);
    }
    let question = if multiple {
        format!("  Select {label} (space-separated, e.g., '1 2'):")
    } else {
        format!("  Select {label} (enter number):")
    };
    let answer = s.ask(&question)?;

    let picked = parse_selection(&answer, tools.len()).filter(|p| multiple || p.len() == 1);
    match picked {
        Some(indices) => Ok(indices.into_iter().map(|i| tools[i].key.to_string()).collect()),
        None => {
            if !answer.is_empty() {
                print_warning("  Invalid selection, skipping.");
            }
            Ok(Vec::new())
        }
    }
}

fn pick_build_commands(s: &mut Session, commands: &[&str]) -> Result<Vec<String>> {
    if commands.is_empty() {
        return Ok(Vec::new());
    }
    print_info("  Available build commands:");
    for (i, command) in commands.iter().enumerate() {
        println!("    {}. {}", i + 1, command);
    }
    let answer = s.ask("  Select build commands (space-separated, e.g., '1'):")?;
    match parse_selection(&answer, commands.len()) {
        Some(indices) => Ok(indices.into_iter().map(|i| commands[i].to_string()).collect()),
        None => {
            if !answer.is_empty() {
                print_warning("  Invalid selection, skipping.");
            }
            Ok(Vec::new())
        }
    }
}

fn configure_custom_commands(s: &mut Session) -> Result<Option<HookConfig>> {
    print_section_header("Custom Commands Configuration");
    print_info("Enter commands to run (one per line, empty line to finish):");
    let mut commands = Vec::new();
    loop {
        let command = s.ask(">")?;
        if command.is_empty() {
            break;
        }
        commands.push(command);
    }
    if commands.is_empty() {
        print_error("No commands entered.");
        return Ok(None);
    }
    Ok(Some(HookConfig::custom(commands)))
}

fn uninstall_menu(s: &mut Session) -> Result<()> {
    let Some(installer) = installer(s) else {
        return Ok(());
    };
    let installed = installer.installed(false)?;
    if installed.is_empty() {
        print_warning("No hooks installed.");
        return Ok(());
    }

    print_section_header("Installed Hooks");
    let names: Vec<&str> = installed.iter().map(|h| h.name.as_str()).collect();
    print_menu(&names);
    let Some(n) = s.choose(&format!("Choose hook to uninstall (1-{}):", names.len()), names.len())? else {
        print_error("Invalid option.");
        return Ok(());
    };
    let hook_type = names[n - 1];

    if !s.confirm(&format!("Are you sure you want to uninstall {hook_type}?"), Strength::Low)? {
        print_info("Uninstall canceled.");
        return Ok(());
    }
    match installer.uninstall(hook_type)? {
        UninstallOutcome::NotInstalled => print_warning(&format!("Hook {hook_type} is not installed.")),
        UninstallOutcome::BackupRestored => {
            print_success(&format!("Hook {hook_type} uninstalled, previous hook restored."))
        }
        UninstallOutcome::Removed => print_success(&format!("Hook {hook_type} uninstalled successfully!")),
    }
    Ok(())
}

pub fn list(s: &mut Session) -> Result<()> {
    let Some(installer) = installer(s) else {
        return Ok(());
    };
    let installed = installer.installed(false)?;
    let store = HookStore::load(s.workdir())?;

    print_section_header("Installed Git Hooks");
    if installed.is_empty() {
        print_warning("No hooks installed.");
    }
    for hook in &installed {
        println!("  {:<20} executable: {}", hook.name, get_flag_colored(hook.executable));
        let Some(record) = store.enabled_hooks.get(&hook.name) else {
            continue;
        };
        let template_name = s
            .hooks
            .hook_type(&hook.name)
            .and_then(|h| h.template(&record.template))
            .map_or(record.template.as_str(), |t| t.name);
        println!("    Template: {}", template_name.cyan());
        if let Some(at) = record.installed_at {
            println!("    Installed: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        if !record.config.languages.is_empty() {
            let langs: Vec<&str> = record.config.languages.keys().map(String::as_str).collect();
            println!("    Languages: {}", langs.join(", "));
            for (lang, selection) in &record.config.languages {
                for (group, tools) in selection.groups() {
                    println!("      {} {group}: {}", lang.yellow(), tools.join(", "));
                }
            }
        }
        if !record.config.custom_commands.is_empty() {
            println!("    Custom commands:");
            for command in &record.config.custom_commands {
                println!("      - {}", command.yellow());
            }
        }
    }
    print_rule();
    Ok(())
}

/// Menu line for a template; generated ones are flagged as asking for setup.
fn template_line(template: &HookTemplate) -> String {
    let setup = if template.requires_config() { " [asks for setup]" } else { "" };
    format!("{} - {}{setup}", template.name, template.description)
}

fn view_templates(s: &Session) {
    print_section_header("Available Hook Templates");
    for hook in s.hooks.hook_types {
        println!("\n{} ({})", hook.name.magenta(), hook.key);
        print_info(hook.description);
        print_rule();
        for template in hook.templates {
            println!("  - {}", template_line(template));
        }
    }
    print_rule();
}
