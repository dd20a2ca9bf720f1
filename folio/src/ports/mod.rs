// src/ports/mod.rs
pub mod html;
pub mod line_parser;

pub use html::HtmlPresenter;
pub use line_parser::{parse_lines, Segment};
