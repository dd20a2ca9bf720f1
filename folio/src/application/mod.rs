pub mod exporter;
pub mod properties;
pub mod source;
pub mod transcoder;

pub use exporter::Exporter;
pub use properties::PropertyMapper;
pub use source::ContentSource;
pub use transcoder::Transcoder;
