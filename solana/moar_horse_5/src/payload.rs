use std::path::Path;

use tokio::process::Command;

use crate::SessionError;

/// The server silently truncates uploads longer than this.
pub const SERVER_MAX_LEN: usize = 100_000;

/// Compiles the solver program with `cargo build-sbf` inside `dir`.
pub async fn build(dir: &Path) -> Result<(), SessionError> {
    tracing::info!(dir = %dir.display(), "cargo build-sbf");
    let status = Command::new("cargo")
        .arg("build-sbf")
        .current_dir(dir)
        .status()
        .await
        .map_err(|e| {
            SessionError::Build(format!("cannot run cargo build-sbf in {}: {e}", dir.display()))
        })?;

    if !status.success() {
        return Err(SessionError::Build(format!("cargo build-sbf exited with {status}")));
    }
    Ok(())
}

pub async fn load(path: &Path) -> Result<Vec<u8>, SessionError> {
    let solve = tokio::fs::read(path)
        .await
        .map_err(|source| SessionError::PayloadMissing {
            path: path.to_path_buf(),
            source,
        })?;

    if solve.len() > SERVER_MAX_LEN {
        tracing::warn!(
            len = solve.len(),
            max = SERVER_MAX_LEN,
            "solver is larger than the server accepts, upload will be truncated"
        );
    }
    tracing::info!(path = %path.display(), len = solve.len(), "solver loaded");
    Ok(solve)
}
