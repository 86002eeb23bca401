//! Subprocess command building and captured output

use std::process::ExitStatus;

/// Command builder for system utility invocations
#[derive(Debug, Clone)]
pub struct PlatformCommand {
    program: String,
    args: Vec<String>,
}

impl PlatformCommand {
    /// Create a new command
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<str>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Get the program name
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the arguments
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}

/// Output captured from a finished command
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Whether the command exited with status 0
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, if the process exited normally
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Captured stderr as lossy UTF-8, trimmed
    #[must_use]
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_args() {
        let cmd = PlatformCommand::new("/bin/rm")
            .arg("-rf")
            .arg("/tmp/some/path");
        assert_eq!(cmd.program(), "/bin/rm");
        assert_eq!(cmd.get_args(), ["-rf", "/tmp/some/path"]);
    }
}
