//! Fluent wrapper around assert_cmd::Command.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `kvault` binary.
pub struct KvaultCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl KvaultCommand {
    /// Creates a new command for the `kvault` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--db` option.
    pub fn db(self, path: &Path) -> Self {
        self.args(["--db".to_string(), path.to_string_lossy().to_string()])
    }

    /// Sets the `--config` option.
    pub fn config(self, path: &Path) -> Self {
        self.args(["--config".to_string(), path.to_string_lossy().to_string()])
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the process on stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("kvault").expect("Failed to find kvault binary");
        cmd.args(&self.args)
            .env_remove("KVAULT_DB")
            .env_remove("KVAULT_CONFIG")
            .env_remove("RUST_LOG");
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `search` command with a query.
    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    /// Configures for `note show` with an ID.
    pub fn show(self, id: i64) -> Self {
        self.args(["note".to_string(), "show".to_string(), id.to_string()])
    }

    /// Configures for the `tree` command.
    pub fn tree(self) -> Self {
        self.args(["tree"])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for KvaultCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        KvaultCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_db() {
        let cmd = KvaultCommand::new().db(Path::new("/tmp/x.db"));
        assert_eq!(cmd.get_args(), ["--db", "/tmp/x.db"]);
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = KvaultCommand::new().search("milk").format_json();
        assert_eq!(cmd.get_args(), ["search", "milk", "--format", "json"]);
    }
}
