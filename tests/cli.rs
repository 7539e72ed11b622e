mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::Command;
    use mockito::Server;
    use predicates::str::{contains, is_empty, starts_with};

    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "linch";

    fn file_with(content: &str) -> Result<NamedTempFile, std::io::Error> {
        let mut file = NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    fn stdin_for(paths: &[&Path]) -> String {
        paths
            .iter()
            .map(|path| format!("{}\n", path.display()))
            .collect()
    }

    fn linch() -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.args(["--no-config", "--no-color", "--quiet"]);
        Ok(cmd)
    }

    #[test]
    fn test_output__success() -> TestResult {
        let mut server = Server::new();
        let _m200 = server.mock("HEAD", "/ok").with_status(200).create();
        let endpoint = server.url() + "/ok";
        let file = file_with(&format!("See {endpoint} for details.\n"))?;

        linch()?
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(format!("SUCCE 200: {endpoint}\n"));
        Ok(())
    }

    #[test]
    fn test_output__failure_status() -> TestResult {
        let mut server = Server::new();
        let _m404 = server.mock("HEAD", "/missing").with_status(404).create();
        let endpoint = server.url() + "/missing";
        let file = file_with(&endpoint)?;

        linch()?
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(format!("ERROR 404: {endpoint}\n"));
        Ok(())
    }

    #[test]
    fn test_output__permanent_redirect_with_relative_location() -> TestResult {
        let mut server = Server::new();
        let _m301 = server
            .mock("HEAD", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create();
        let endpoint = server.url() + "/old";
        let file = file_with(&endpoint)?;

        linch()?
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(format!("REDIR 301: {endpoint} -> {}/new\n", server.url()));
        Ok(())
    }

    #[test]
    fn test_output__temporary_redirect() -> TestResult {
        let mut server = Server::new();
        let _m302 = server
            .mock("HEAD", "/tmp")
            .with_status(302)
            .with_header("location", "https://example.com/elsewhere")
            .create();
        let endpoint = server.url() + "/tmp";
        let file = file_with(&endpoint)?;

        linch()?
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(format!(
                "SEMIR 302: {endpoint} -> https://example.com/elsewhere\n"
            ));
        Ok(())
    }

    #[test]
    fn test_output__redirect_without_location_is_internal() -> TestResult {
        let mut server = Server::new();
        let _m301 = server.mock("HEAD", "/nowhere").with_status(301).create();
        let endpoint = server.url() + "/nowhere";
        let file = file_with(&endpoint)?;

        linch()?
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(format!(
                "INTER 301: {endpoint} (missing location in redirection)\n"
            ));
        Ok(())
    }

    #[test]
    fn test_output__duplicate_urls_are_checked_once() -> TestResult {
        let mut server = Server::new();
        let m200 = server
            .mock("HEAD", "/dup")
            .with_status(200)
            .expect(1)
            .create();
        let endpoint = server.url() + "/dup";
        let first = file_with(&format!("{endpoint} and {endpoint} again\n"))?;
        let second = file_with(&format!("[link]({endpoint})\n"))?;

        linch()?
            .write_stdin(stdin_for(&[first.path(), second.path()]))
            .assert()
            .success()
            .stdout(format!("SUCCE 200: {endpoint}\n"));
        m200.assert();
        Ok(())
    }

    #[test]
    fn test_output__fix_mode_prints_sed_command() -> TestResult {
        let mut server = Server::new();
        let _m308 = server
            .mock("HEAD", "/old")
            .with_status(308)
            .with_header("location", "/new")
            .create();
        let _m200 = server.mock("HEAD", "/fine").with_status(200).create();
        let endpoint = server.url() + "/old";
        let file = file_with(&format!("{endpoint}\n{}/fine\n", server.url()))?;

        let escaped_old = endpoint.replace('.', r"\.");
        let new = format!("{}/new", server.url());
        let expected = format!(
            "sed -i 's|{escaped_old}\\([^-a-zA-Z0-9@:%_+.~#?&/=]\\)|{new}\\1|g;s|{escaped_old}$|{new}|' '{}'\n",
            file.path().display()
        );

        linch()?
            .arg("--fix")
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(expected);
        Ok(())
    }

    #[test]
    fn test_output__fix_mode_sed_command_keeps_longer_urls() -> TestResult {
        let mut server = Server::new();
        let _m301 = server
            .mock("HEAD", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create();
        let _m200 = server.mock("HEAD", "/old/deeper").with_status(200).create();
        let base = server.url();
        let file = file_with(&format!(
            "{base}/old\n[docs]({base}/old) and {base}/old/deeper\n"
        ))?;

        let output = linch()?
            .arg("--fix")
            .write_stdin(stdin_for(&[file.path()]))
            .output()?;
        assert!(output.status.success());
        let script = String::from_utf8(output.stdout)?;
        assert_eq!(script.lines().count(), 1);

        let status = std::process::Command::new("sh")
            .arg("-c")
            .arg(&script)
            .status()?;
        assert!(status.success());

        let rewritten = std::fs::read_to_string(file.path())?;
        assert_eq!(
            rewritten,
            format!("{base}/new\n[docs]({base}/new) and {base}/old/deeper\n")
        );
        Ok(())
    }

    #[test]
    fn test_output__fix_mode_comments_internal_errors() -> TestResult {
        let file = file_with("http://127.0.0.1:1/unreachable\n")?;

        linch()?
            .arg("-f")
            .write_stdin(stdin_for(&[file.path()]))
            .assert()
            .success()
            .stdout(starts_with("# INTER XXX: http://127.0.0.1:1/unreachable ("));
        Ok(())
    }

    #[test]
    fn test_output__json_format() -> TestResult {
        let mut server = Server::new();
        let _m404 = server.mock("HEAD", "/gone").with_status(404).create();
        let endpoint = server.url() + "/gone";
        let file = file_with(&endpoint)?;

        let output = linch()?
            .args(["--format", "json"])
            .write_stdin(stdin_for(&[file.path()]))
            .output()?;

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout)?;
        let value: serde_json::Value = serde_json::from_str(stdout.trim_end())?;
        assert_eq!(value["url"], endpoint.as_str());
        assert_eq!(value["kind"], "failure");
        assert_eq!(value["status"], 404);
        assert_eq!(value["path"], file.path().display().to_string().as_str());
        Ok(())
    }

    #[test]
    fn test_output__missing_and_blank_paths_are_skipped() -> TestResult {
        linch()?
            .write_stdin("/definitely/not/here.md\n\n   \n")
            .assert()
            .success()
            .stdout(is_empty());
        Ok(())
    }

    #[test]
    fn test_output__empty_stdin() -> TestResult {
        linch()?
            .write_stdin("")
            .assert()
            .success()
            .stdout(is_empty());
        Ok(())
    }

    #[test]
    fn test_config__invalid_limit_exits_with_error() -> TestResult {
        linch()?
            .args(["--limit", "0"])
            .write_stdin("")
            .assert()
            .failure()
            .code(1)
            .stderr(contains("Concurrency cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_config__explicit_file_is_used() -> TestResult {
        let mut server = Server::new();
        let _m301 = server
            .mock("HEAD", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create();
        let endpoint = server.url() + "/old";
        let file = file_with(&endpoint)?;
        let config = file_with("output_format = \"json\"\ncolor = false\n")?;

        let mut cmd = Command::cargo_bin(NAME)?;
        let output = cmd
            .arg("--quiet")
            .arg("--config")
            .arg(config.path())
            .write_stdin(stdin_for(&[file.path()]))
            .output()?;

        assert!(output.status.success());
        let value: serde_json::Value =
            serde_json::from_str(String::from_utf8(output.stdout)?.trim_end())?;
        assert_eq!(value["kind"], "redirect-permanent");
        assert_eq!(value["target"], format!("{}/new", server.url()).as_str());
        Ok(())
    }

    #[test]
    fn test_config__broken_explicit_file_exits_with_error() -> TestResult {
        let config = file_with("concurrency = \"many\"\n")?;

        Command::cargo_bin(NAME)?
            .arg("--config")
            .arg(config.path())
            .write_stdin("")
            .assert()
            .failure()
            .code(1)
            .stderr(starts_with("Error:"));
        Ok(())
    }

    #[test]
    fn test_config__broken_local_file_warns_and_uses_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join(".linch.toml"), "concurrency = \"many\"\n")?;

        Command::cargo_bin(NAME)?
            .current_dir(dir.path())
            .arg("--no-color")
            .write_stdin("")
            .assert()
            .success()
            .stdout(is_empty())
            .stderr(contains("Ignoring config file"));
        Ok(())
    }

    #[test]
    fn test_completions__bash() -> TestResult {
        Command::cargo_bin(NAME)?
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(contains("linch"))
            .stdout(contains("--max-retries"));
        Ok(())
    }

    #[test]
    fn test_version() -> TestResult {
        Command::cargo_bin(NAME)?
            .arg("--version")
            .assert()
            .success()
            .stdout(starts_with("linch "));
        Ok(())
    }
}
