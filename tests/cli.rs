mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::contains;

    use std::fs;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "linkscan";

    fn linkscan_in(dir: &std::path::Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir).env_remove("RUST_LOG");
        Ok(cmd)
    }

    #[test]
    fn test_output__when_file_matches() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("a.txt"),
            "see http://example.com/x and https://foo.bar/",
        )?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("*.txt");

        cmd.assert()
            .success()
            .stdout("a.txt: http://example.com/x\na.txt: https://foo.bar/\n");
        Ok(())
    }

    #[test]
    fn test_output__when_no_file_matches() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("b.bin"), "http://example.com")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("*.txt");

        cmd.assert().success().stdout("");
        Ok(())
    }

    #[test]
    fn test_output__when_no_patterns_provided() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.txt"), "http://example.com")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config");

        cmd.assert()
            .success()
            .stdout("")
            .stderr(contains("No patterns given"));
        Ok(())
    }

    #[test]
    fn test_output__when_invalid_pattern_provided() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.txt"), "http://example.com")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("*.md").arg("[invalid");

        cmd.assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr(contains("Invalid pattern: [invalid"));
        Ok(())
    }

    #[test]
    fn test_output__nested_paths_are_relative_to_root() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let docs = temp_dir.path().join("docs/guide");
        fs::create_dir_all(&docs)?;
        fs::write(docs.join("intro.md"), "[link](https://example.com/intro)")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--no-config")
            .arg("-C")
            .arg(temp_dir.path())
            .arg("**/*.md");

        cmd.assert()
            .success()
            .stdout("docs/guide/intro.md: https://example.com/intro\n");
        Ok(())
    }

    #[test]
    fn test_output__json_format() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.md"), "https://foo.bar/")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("--format").arg("json").arg("*.md");

        cmd.assert()
            .success()
            .stdout("{\"url\":\"https://foo.bar/\",\"path\":\"a.md\"}\n");
        Ok(())
    }

    #[test]
    fn test_output__replace_rewrites_urls() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.md"), "http://old.example/page")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config")
            .arg("-r")
            .arg("^http://=https://")
            .arg("--replace")
            .arg("old=new")
            .arg("*.md");

        cmd.assert()
            .success()
            .stdout("a.md: https://new.example/page\n");
        Ok(())
    }

    #[test]
    fn test_output__malformed_replace_is_rejected() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("-r").arg("no-equals").arg("*.md");

        cmd.assert()
            .failure()
            .stderr(contains("is not a REGEX=REPLACEMENT pair"));
        Ok(())
    }

    #[test]
    fn test_output__invalid_replace_regex_is_rejected() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("-r").arg("[bad=x").arg("*.md");

        cmd.assert().failure().code(1).stderr(contains("Regex error"));
        Ok(())
    }

    #[test]
    fn test_output__missing_root_fails() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config")
            .arg("-C")
            .arg("does-not-exist")
            .arg("*.md");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("is not a directory"));
        Ok(())
    }

    #[test]
    fn test_output__verbose_logs_scanned_files() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.txt"), "nothing here")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--no-config").arg("-v").arg("*.txt");

        cmd.assert()
            .success()
            .stdout("")
            .stderr(contains("scanning a.txt"));
        Ok(())
    }

    #[test]
    fn test_output__config_file_supplies_patterns() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.md"), "https://from.config/")?;
        fs::write(temp_dir.path().join("b.txt"), "https://not.scanned/")?;
        let config_path = temp_dir.path().join("custom.toml");
        fs::write(&config_path, "patterns = [\"*.md\"]\n")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--config").arg(&config_path);

        cmd.assert()
            .success()
            .stdout("a.md: https://from.config/\n");
        Ok(())
    }

    #[test]
    fn test_output__config_discovered_in_working_directory() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.md"), "http://example.com")?;
        fs::write(
            temp_dir.path().join(".linkscan.toml"),
            "patterns = [\"*.md\"]\n\n[[replace]]\npattern = \"^http:\"\nreplacement = \"https:\"\n",
        )?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.assert()
            .success()
            .stdout("a.md: https://example.com\n");
        Ok(())
    }

    #[test]
    fn test_output__bad_config_file_fails() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "patterns = [")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("--config").arg(&config_path).arg("*.md");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Could not load config file"))
            .stderr(contains("Error: TOML parsing error"));
        Ok(())
    }

    #[test]
    fn test_output__broken_discovered_config_is_reported() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.md"), "http://example.com")?;
        fs::write(temp_dir.path().join(".linkscan.toml"), "patterns = [")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("*.md");

        cmd.assert()
            .success()
            .stdout("a.md: http://example.com\n")
            .stderr(contains("Ignoring"))
            .stderr(contains(".linkscan.toml"));
        Ok(())
    }

    #[test]
    fn test_output__quiet_hides_config_warnings() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("a.md"), "http://example.com")?;
        fs::write(temp_dir.path().join(".linkscan.toml"), "patterns = [")?;
        let mut cmd = linkscan_in(temp_dir.path())?;

        cmd.arg("-q").arg("*.md");

        cmd.assert()
            .success()
            .stdout("a.md: http://example.com\n")
            .stderr("");
        Ok(())
    }
}
