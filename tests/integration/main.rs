//! Integration tests for registry-cache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use std::process;
    use tempfile::TempDir;

    fn registry_cache(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("registry-cache");
        cmd.env_remove("REGISTRY_CACHE_URL")
            .env_remove("REGISTRY_CACHE_HOME")
            .env_remove("REGISTRY_CACHE_CONFIG")
            .arg("--config")
            .arg(config_dir.path().join("config.toml"));
        cmd
    }

    fn git_available() -> bool {
        process::Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = process::Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Local registry index with one buildpack, `example/foo`, in two versions
    fn local_index() -> TempDir {
        let dir = TempDir::new().unwrap();
        let shard = dir.path().join("fo").join("o");
        std::fs::create_dir_all(&shard).unwrap();
        let digest = "sha256:".to_string() + &"ab".repeat(32);
        let lines = [
            format!(
                r#"{{"ns":"example","name":"foo","version":"0.9.0","yanked":false,"addr":"example.com/foo@{}"}}"#,
                "sha256:".to_string() + &"cd".repeat(32)
            ),
            format!(
                r#"{{"ns":"example","name":"foo","version":"1.0.0","yanked":false,"addr":"example.com/foo@{digest}"}}"#
            ),
        ];
        std::fs::write(shard.join("example_foo"), lines.join("\n") + "\n").unwrap();

        git(dir.path(), &["init", "--quiet"]);
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "--quiet", "-m", "index"]);
        dir
    }

    #[test]
    fn help_displays() {
        let config = TempDir::new().unwrap();
        registry_cache(&config)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("registry index cache"));
    }

    #[test]
    fn version_displays() {
        let config = TempDir::new().unwrap();
        registry_cache(&config)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("registry-cache"));
    }

    #[test]
    fn config_path() {
        let config = TempDir::new().unwrap();
        registry_cache(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let config = TempDir::new().unwrap();
        registry_cache(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[registry]"))
            .stdout(predicate::str::contains("buildpacks/registry-index"));
    }

    #[test]
    fn invalid_config_fails() {
        let config = TempDir::new().unwrap();
        std::fs::write(config.path().join("config.toml"), "[registry\n").unwrap();

        registry_cache(&config)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn path_is_stable_per_registry() {
        let config = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();

        let first = registry_cache(&config)
            .args(["path", "--registry", "https://example.com/index", "--home"])
            .arg(home.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let second = registry_cache(&config)
            .args(["path", "--registry", "https://example.com/index", "--home"])
            .arg(home.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let other = registry_cache(&config)
            .args(["path", "--registry", "https://example.com/other", "--home"])
            .arg(home.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(String::from_utf8_lossy(&first).contains("registry-"));
    }

    #[test]
    fn explicit_home_is_not_created() {
        let config = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        let home = parent.path().join("missing-home");

        registry_cache(&config)
            .args(["path", "--home"])
            .arg(&home)
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not accessible"))
            .stderr(predicate::str::contains("--home"));

        assert!(!home.exists());
    }

    #[test]
    fn unreachable_registry_fails() {
        let config = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let missing = home.path().join("no-such-index");

        registry_cache(&config)
            .args(["locate", "example/foo", "--registry"])
            .arg(&missing)
            .arg("--home")
            .arg(home.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("refreshing cache"));
    }

    #[test]
    fn locate_from_local_index() {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }
        let config = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let index = local_index();
        let url = index.path().to_str().unwrap();

        registry_cache(&config)
            .args(["locate", "example/foo", "--registry", url, "--home"])
            .arg(home.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "example.com/foo@sha256:{}",
                "ab".repeat(32)
            )));

        // Second run reuses the mirror and pulls
        registry_cache(&config)
            .args(["locate", "example/foo@0.9.0", "--format", "json", "--registry", url])
            .arg("--home")
            .arg(home.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""version": "0.9.0""#));

        registry_cache(&config)
            .args(["locate", "example/foo@2.0.0", "--registry", url, "--home"])
            .arg(home.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "could not find version for buildpack: example/foo@2.0.0",
            ));
    }
}
