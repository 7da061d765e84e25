//! The grading mechanism: runs submitted code against test code and reports
//! the raw output.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

use crate::config::GraderConfig;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("grader command is empty")]
    EmptyCommand,

    #[error("failed to prepare grading directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to run grader '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("grader did not finish within {0} seconds")]
    Timeout(u64),
}

/// Runs an answer against test code and returns the raw textual output.
/// The final line of the output is `OK` when every test passed.
#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, code: &str, test_code: &str) -> Result<String, GradeError>;
}

/// Grader that launches an external command once per submission.
///
/// The answer and the test code are written into a fresh temporary directory
/// which is removed afterwards. The output is stdout followed by stderr.
#[derive(Debug, Clone)]
pub struct CommandGrader {
    config: GraderConfig,
}

impl CommandGrader {
    pub fn new(config: GraderConfig) -> Self {
        Self { config }
    }
}

fn substitute(arg: &str, dir: &str) -> String {
    arg.replace("{dir}", dir)
}

#[async_trait]
impl Grader for CommandGrader {
    async fn grade(&self, code: &str, test_code: &str) -> Result<String, GradeError> {
        let (program, args) = self
            .config
            .command
            .split_first()
            .ok_or(GradeError::EmptyCommand)?;

        let workdir = tempfile::tempdir()?;
        fs::write(workdir.path().join(&self.config.code_file), code).await?;
        fs::write(workdir.path().join(&self.config.test_file), test_code).await?;

        let dir = workdir.path().to_string_lossy();
        let program = substitute(program, &dir);

        let mut command = Command::new(&program);
        command
            .args(args.iter().map(|arg| substitute(arg, &dir)))
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let run = command.output();
        let result = if self.config.timeout_secs > 0 {
            tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), run)
                .await
                .map_err(|_| GradeError::Timeout(self.config.timeout_secs))?
        } else {
            run.await
        };
        let output = result.map_err(|source| GradeError::Spawn {
            program: program.clone(),
            source,
        })?;

        debug!(program = %program, status = %output.status, "Grader finished");

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        Ok(text)
    }
}
