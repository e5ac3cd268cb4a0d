//! The `config` menu over `.gitcli-config.json`.

use crate::commands::session::Session;
use crate::core::{
    colors::get_flag_colored,
    config::Config,
    error::Result,
    output::{print_error, print_info, print_menu, print_section_header, print_success},
};

fn state_word(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

fn show(config: &Config) {
    print_section_header("GitCLI Configuration");
    print_info("Current Settings:");
    let rules = &config.validation_rules;
    println!("  Auto-stage changes:          {}", get_flag_colored(config.auto_stage));
    println!("  Auto-push prompt:            {}", get_flag_colored(config.auto_push));
    println!("  Learn from commit history:   {}", get_flag_colored(config.learn_from_history));
    println!("  Validation:                  {}", get_flag_colored(rules.enabled));
    println!("  Block large files:           {}", get_flag_colored(rules.block_large_files));
    println!("  Max file size:               {} MB", rules.max_file_size_mb);
    if let Some(template) = &config.commit_message_template {
        println!("  Commit message template:     {template}");
    }
}

pub fn manage(s: &mut Session) -> Result<()> {
    let workdir = s.workdir().to_path_buf();
    let mut config = Config::load(&workdir);
    show(&config);

    print_info("\nOptions:");
    print_menu(&[
        "Toggle auto-stage",
        "Toggle auto-push prompt",
        "Toggle learn from history",
        "Toggle validation",
        "Set max file size",
        "Reset to defaults",
        "Back",
    ]);

    let message = match s.choose("Choose option (1-7):", 7)? {
        Some(1) => {
            config.auto_stage = !config.auto_stage;
            format!("Auto-stage {}!", state_word(config.auto_stage))
        }
        Some(2) => {
            config.auto_push = !config.auto_push;
            format!("Auto-push prompt {}!", state_word(config.auto_push))
        }
        Some(3) => {
            config.learn_from_history = !config.learn_from_history;
            format!("Learn from history {}!", state_word(config.learn_from_history))
        }
        Some(4) => {
            config.validation_rules.enabled = !config.validation_rules.enabled;
            format!("Validation {}!", state_word(config.validation_rules.enabled))
        }
        Some(5) => {
            let answer = s.ask("Enter max file size in MB:")?;
            match answer.parse::<u64>() {
                Ok(size) if size > 0 => {
                    config.validation_rules.max_file_size_mb = size;
                    format!("Max file size set to {size} MB!")
                }
                _ => {
                    print_error("Invalid size. Enter a positive whole number.");
                    return Ok(());
                }
            }
        }
        Some(6) => {
            config = Config::default();
            "Configuration reset to defaults!".to_string()
        }
        Some(7) => return Ok(()),
        _ => {
            print_error("Invalid option.");
            return Ok(());
        }
    };

    config.save(&workdir)?;
    print_success(&message);
    Ok(())
}
