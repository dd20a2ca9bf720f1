use anyhow::{Context, Result};
use folio::domain::{Artifact, ProjectRecord};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary output directory, removed on drop
#[allow(dead_code)]
pub struct TestWorkspace {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path below the workspace; parent directories are not created
    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }
}

/// Project record with typical values
#[allow(dead_code)]
pub fn project(id: &str, title: &str, content: &[&str]) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        date: Some("2024-03-01".to_string()),
        tags: vec!["rust".to_string(), "cli".to_string()],
        status: "Done".to_string(),
        image: None,
        description: String::new(),
        last_edited: "2024-05-01T10:00:00.000Z".to_string(),
        url: format!("https://www.notion.so/{id}"),
        content: content.iter().map(|s| s.to_string()).collect(),
    }
}

#[allow(dead_code)]
pub fn artifact(projects: Vec<ProjectRecord>) -> Artifact {
    Artifact {
        projects,
        generated_at: "2024-05-02T08:00:00.000Z".to_string(),
    }
}
