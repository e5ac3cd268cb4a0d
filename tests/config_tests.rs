use gitcli::Config;
use predicates::prelude::*;

mod common;
use common::repository::*;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_menu_writes_settings_file() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        gitcli(&repo.path)?
            .arg("config")
            .write_stdin("2\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Auto-push prompt disabled!"));

        let config = Config::load(&repo.path);
        assert!(!config.auto_push);
        assert!(config.auto_stage);
        Ok(())
    }

    #[test]
    fn test_disabled_auto_stage_requires_staged_changes() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        Config {
            auto_stage: false,
            ..Config::default()
        }
        .save(&repo.path)?;
        create_file(&repo.path, "initial.txt", "edited\n")?;

        gitcli(&repo.path)?
            .args(["save", "edit", "initial"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing staged"));
        assert_eq!(last_subject(&repo.path)?, "Initial commit");

        git_add(&repo.path, "initial.txt")?;
        gitcli(&repo.path)?.args(["save", "edit", "initial"]).assert().success();
        assert_eq!(last_subject(&repo.path)?, "edit initial");
        Ok(())
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, ".gitcli-config.json", "{ not json")?;
        create_file(&repo.path, "notes.txt", "n\n")?;

        gitcli(&repo.path)?.args(["save", "add", "notes"]).assert().success();
        assert_eq!(last_subject(&repo.path)?, "add notes");
        Ok(())
    }
}
