// src/infrastructure/artifact.rs
use crate::domain::{Artifact, DomainError};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Write the artifact as pretty-printed JSON, replacing any previous file.
///
/// The file is written next to its destination and renamed into place, so
/// readers never observe a half-written artifact.
#[instrument(level = "debug", skip(artifact), fields(projects = artifact.projects.len()))]
pub fn write_artifact(path: impl AsRef<Path> + std::fmt::Debug, artifact: &Artifact) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(artifact).context("Failed to serialize artifact")?;
    write_atomically(path, json.as_bytes())
}

/// Read an artifact written by [`write_artifact`].
pub fn read_artifact(path: impl AsRef<Path>) -> Result<Artifact> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact {}", path.display()))?;
    let artifact = serde_json::from_str(&content)
        .map_err(|e| DomainError::Artifact(e.to_string()))
        .with_context(|| format!("Invalid artifact {}", path.display()))?;
    Ok(artifact)
}

/// Create parent directories, then swap a temp file into `path`.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(bytes)
        .context("Failed to write content to temporary file")?;
    temp.persist(path)
        .with_context(|| format!("Failed to move output into place at {}", path.display()))?;

    debug!(?path, bytes = bytes.len(), "Wrote file");
    Ok(())
}
