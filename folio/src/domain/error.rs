use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Missing {0}")]
    MissingCredential(String),
    #[error("Notion API error {status} @ {method} {url} :: {body}")]
    Api {
        status: u16,
        method: String,
        url: String,
        body: String,
    },
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Artifact error: {0}")]
    Artifact(String),
}
