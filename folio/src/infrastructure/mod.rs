pub mod artifact;
pub mod browser;
pub mod config;
pub mod notion;

pub use config::{Config, Credentials, TableStyle};
pub use notion::NotionClient;
