pub mod block;
pub mod error;
pub mod line;
pub mod page;
pub mod project;

pub use block::{Block, BlockKind, FileSource, RichText};
pub use error::DomainError;
pub use line::{Attachment, Line, LineKind};
pub use page::{Page, Paginated, Property};
pub use project::{Artifact, ProjectRecord};
