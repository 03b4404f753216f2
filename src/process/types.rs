use serde::Serialize;

/// Captured outcome of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub success: bool,
    pub exit_code: Option<i32>, // None when killed by a signal
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl ProcessResult {
    pub fn succeeded(stdout: Vec<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout,
            stderr: Vec::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: Vec<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stdout: Vec::new(),
            stderr,
        }
    }

    pub fn stdout_text(&self) -> String {
        self.stdout.join("\n")
    }

    pub fn stderr_text(&self) -> String {
        self.stderr.join("\n")
    }
}
