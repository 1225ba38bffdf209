//! Integration tests for gencache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn gencache() -> Command {
        cargo_bin_cmd!("gencache")
    }

    /// Write a self-contained config into `dir` and return its path.
    ///
    /// The site origin points at the loopback discard port so every network
    /// fetch fails fast and deterministically.
    fn write_config(dir: &Path) -> PathBuf {
        let cache_dir = dir.join("cache");
        let content = format!(
            r#"
[cache]
name = "testapp"
version = "1.0.0"
dir = "{}"

[manifest]
assets = ["/", "/index.html"]

[network]
site_origin = "http://127.0.0.1:9"
external_origins = ["http://127.0.0.1:9/ext"]
"#,
            cache_dir.display()
        );
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        gencache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("generation-scoped caching proxy"));
    }

    #[test]
    fn version_displays() {
        gencache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("gencache"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        gencache()
            .args(["--config", config.to_str().unwrap(), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        gencache()
            .args(["--config", config.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("testapp"));
    }

    #[test]
    fn status_with_empty_store() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        gencache()
            .args(["--config", config.to_str().unwrap(), "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache generations found"));
    }

    #[test]
    fn clear_runs_on_empty_store() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        gencache()
            .args(["--config", config.to_str().unwrap(), "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared"));
    }

    #[test]
    fn fetch_local_offline_returns_synthetic_503() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        // Local-origin fetch with no network terminates in the synthetic
        // 503 response, not an error.
        gencache()
            .args(["--config", config.to_str().unwrap(), "fetch", "/index.html"])
            .assert()
            .success()
            .stdout(predicate::str::contains("503"))
            .stdout(predicate::str::contains("text/plain"));
    }

    #[test]
    fn fetch_external_offline_passes_failure_through() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        // External origin, no cached fallback: the network failure is
        // surfaced as-is.
        gencache()
            .args([
                "--config",
                config.to_str().unwrap(),
                "fetch",
                "http://127.0.0.1:9/ext/lib.js",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Fetch failed"));
    }

    #[test]
    fn deploy_offline_still_activates_and_gcs_old_generations() {
        let temp = TempDir::new().unwrap();
        let config = write_config(temp.path());

        // Seed a stale generation directory in the cache root.
        std::fs::create_dir_all(temp.path().join("cache").join("testapp-v0.9.0")).unwrap();

        // Manifest fetches all fail (offline) but the install proceeds and
        // the generation becomes current.
        gencache()
            .args(["--config", config.to_str().unwrap(), "deploy"])
            .assert()
            .success()
            .stdout(predicate::str::contains("0 assets cached"))
            .stdout(predicate::str::contains("removed old generation testapp-v0.9.0"))
            .stdout(predicate::str::contains("is active"));

        gencache()
            .args(["--config", config.to_str().unwrap(), "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("testapp-v1.0.0"))
            .stdout(predicate::str::contains("current"))
            .stdout(predicate::str::contains("testapp-v0.9.0").not());
    }
}
