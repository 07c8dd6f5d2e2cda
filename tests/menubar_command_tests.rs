use predicates::prelude::*;

mod common;
use common::{assertions, home::TestHome};

#[cfg(test)]
mod menubar_command_tests {
    use super::*;

    #[test]
    fn test_menubar_without_login_shows_error() -> anyhow::Result<()> {
        let home = TestHome::new()?;

        home.command()?
            .arg("menubar")
            .write_stdin("m\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Error"))
            .stdout(assertions::auth_required())
            .stdout(predicate::str::contains("Reload (r)"));

        assert!(!home.has_key("practice_menubar_words"));
        Ok(())
    }

    #[test]
    fn test_menubar_reuses_fresh_cache() -> anyhow::Result<()> {
        let home = TestHome::new()?;
        // No token and no reachable API: the words can only come from the cache
        home.seed_words(1, 0)?;

        home.command()?
            .arg("menubar")
            .write_stdin("m\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("hello"))
            .stdout(predicate::str::contains("2 of 3"))
            .stdout(predicate::str::contains("Pause Rotation (t)"))
            .stdout(predicate::str::contains("Sense: hello"));
        Ok(())
    }

    #[test]
    fn test_menubar_stale_cache_with_unreachable_api_fails_to_load() -> anyhow::Result<()> {
        let home = TestHome::new()?;
        home.login()?;
        home.seed_words(0, 2 * 3_600_000)?;

        home.command()?
            .arg("menubar")
            .write_stdin("m\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Failed to load practice words"));

        // Transport failures keep the token
        assert_eq!(home.read_key("auth_token").as_deref(), Some("test-token"));
        Ok(())
    }

    #[test]
    fn test_menubar_navigation_and_toggle_persist() -> anyhow::Result<()> {
        let home = TestHome::new()?;
        home.seed_words(0, 0)?;

        home.command()?
            .arg("menubar")
            .write_stdin("n\nn\nt\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Paused"));

        assert_eq!(home.read_key("practice_menubar_index").as_deref(), Some("2"));
        assert_eq!(
            home.read_key("practice_menubar_enabled").as_deref(),
            Some("false")
        );
        Ok(())
    }

    #[test]
    fn test_menubar_starts_paused_when_disabled() -> anyhow::Result<()> {
        let home = TestHome::new()?;
        home.seed_words(0, 0)?;
        home.write_key("practice_menubar_enabled", "false")?;

        home.command()?
            .arg("menubar")
            .write_stdin("m\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Paused"))
            .stdout(predicate::str::contains("Resume Rotation (t)"));
        Ok(())
    }
}
