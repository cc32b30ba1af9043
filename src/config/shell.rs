use crate::domain::ports::CommandRunner;
use crate::utils::error::{DlparError, Result};
use std::process::Command;

fn collect_lines(command: &str, output: std::process::Output) -> Result<Vec<String>> {
    if !output.status.success() {
        // Tools like rpm report their failure on stdout.
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        return Err(DlparError::CommandError {
            command: command.to_string(),
            detail,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Runs commands over an already-trusted ssh target (`user@host`). Session
/// pooling, auth and timeouts stay with ssh itself.
#[derive(Debug, Clone)]
pub struct SshShell {
    target: String,
}

impl SshShell {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl CommandRunner for SshShell {
    fn run_command(&self, command: &str) -> Result<Vec<String>> {
        tracing::debug!("[{}] {}", self.target, command);
        let output = Command::new("ssh")
            .arg("-o")
            .arg("BatchMode=yes")
            .arg(&self.target)
            .arg(command)
            .output()?;
        collect_lines(command, output)
    }
}

/// Runs commands on the local machine, for invocations from the partition
/// under test itself.
#[derive(Debug, Clone, Default)]
pub struct LocalShell;

impl CommandRunner for LocalShell {
    fn run_command(&self, command: &str) -> Result<Vec<String>> {
        tracing::debug!("[local] {}", command);
        let output = Command::new("sh").arg("-c").arg(command).output()?;
        collect_lines(command, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_shell_splits_stdout_into_lines() {
        let lines = LocalShell.run_command("printf 'a\\nb\\n'").unwrap();
        assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn local_shell_surfaces_nonzero_exit() {
        let err = LocalShell.run_command("exit 3").unwrap_err();
        assert!(matches!(err, DlparError::CommandError { .. }));
    }

    #[test]
    fn local_shell_error_detail_falls_back_to_stdout() {
        let err = LocalShell
            .run_command("printf 'package foo is not installed'; exit 1")
            .unwrap_err();
        match err {
            DlparError::CommandError { detail, .. } => {
                assert_eq!(detail, "package foo is not installed");
            }
            other => panic!("expected CommandError, got {:?}", other),
        }
    }
}
