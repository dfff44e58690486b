//! External-process runner for executable script steps.

use crate::error::{EngineError, EngineResult};
use std::path::Path;
use tokio::process::Command;

/// Captured output of a finished script
#[derive(Debug)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `path` as an external command with `envs` added to its environment,
/// capturing stdout and stderr separately.
///
/// A non-zero exit status (or a spawn failure) is an error carrying the
/// command, exit code, and both captured streams.
pub async fn run_script(path: &Path, envs: &[(String, String)]) -> EngineResult<ScriptOutput> {
    let command = path.display().to_string();

    let output = Command::new(path)
        .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .output()
        .await
        .map_err(|e| EngineError::Subprocess {
            command: command.clone(),
            code: -1,
            stdout: String::new(),
            stderr: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        // code() is None when the process was killed by a signal
        return Err(EngineError::Subprocess {
            command,
            code: output.status.code().unwrap_or(-1),
            stdout,
            stderr,
        });
    }

    Ok(ScriptOutput { stdout, stderr })
}
