use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Runs the CLI in script mode against a throwaway home directory.
pub struct CliHarness {
    home: TempDir,
}

impl CliHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    #[allow(dead_code)]
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn run_script(&self, script: &str) -> CliOutput {
        self.run_script_with_env(script, &[])
    }

    pub fn run_script_with_env(&self, script: &str, extra_env: &[(&str, &str)]) -> CliOutput {
        let mut cmd = Command::cargo_bin("college_forms_cli").expect("binary exists");
        cmd.env("COLLEGE_FORMS_HOME", self.home.path())
            .env("COLLEGE_FORMS_CLI_SCRIPT", "1")
            .env_remove("COLLEGE_FORMS_TEST_INPUTS")
            .write_stdin(script.to_string());
        for (key, value) in extra_env {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("run script CLI");
        if !output.status.success() {
            panic!(
                "script CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
