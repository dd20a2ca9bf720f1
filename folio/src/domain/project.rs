// src/domain/project.rs
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// UI-facing representation of one database page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    pub last_edited: String,
    pub url: String,
    #[serde(default)]
    pub content: Vec<String>,
}

/// The static JSON document consumed by the site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub projects: Vec<ProjectRecord>,
    pub generated_at: String,
}

impl Artifact {
    /// Stamp the projects with the current time, millisecond precision, `Z` suffix.
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self {
            projects,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn given_new_artifact_when_stamping_then_timestamp_is_rfc3339_utc() {
        let artifact = Artifact::new(vec![]);

        assert!(artifact.generated_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&artifact.generated_at).is_ok());
    }
}
