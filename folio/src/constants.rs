// src/constants.rs
//
// Application-wide constants extracted from magic numbers and marker strings.
// Each constant is documented with its purpose and usage context.

/// Base URL of the Notion REST API.
///
/// Used in: `infrastructure/config.rs` (default for `[api] base_url`)
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API version pinned in the `Notion-Version` header.
///
/// Used in: `infrastructure/config.rs` (default for `[api] version`)
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Page size requested from the database query endpoint (the API maximum).
pub const QUERY_PAGE_SIZE: u32 = 100;

/// Environment variable holding the integration token.
pub const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Environment variable holding the database id.
pub const DATABASE_ENV: &str = "NOTION_DATABASE_ID";

/// Default artifact location, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "public/projects.json";

/// Default location of the rendered static page.
pub const DEFAULT_HTML_PATH: &str = "public/projects.html";

/// Indentation emitted per nesting level.
pub const INDENT_UNIT: &str = "  ";

/// Nesting depth beyond which lines are no longer indented further.
pub const MAX_INDENT_DEPTH: usize = 6;

/// Marks a content line whose remainder is pre-sanitized HTML.
///
/// Used in: `domain/line.rs`, `ports/line_parser.rs`
pub const HTML_SENTINEL: &str = "__HTML__:";

/// Class attribute opening the wrapper of rendered HTML tables.
///
/// Used in: `application/transcoder.rs`, `domain/line.rs`
pub const TABLE_WRAP_ATTR: &str = r#"class="notion-table-wrap""#;

/// Prefix of the line that follows an attachment label.
pub const URL_LINE_PREFIX: &str = "URL: ";

/// Captions of media and bookmark blocks are cut to this many characters.
pub const CAPTION_MAX_CHARS: usize = 90;

/// Attachment labels are cut to this many characters by the line parser.
pub const LABEL_MAX_CHARS: usize = 120;

/// Characters of the last url path segment kept in a short url.
pub const SHORT_URL_TAIL_CHARS: usize = 24;

/// Upper bound on an ASCII table column's display width.
pub const TABLE_MAX_COL_WIDTH: usize = 56;

/// Lower bound on an ASCII table column's display width.
pub const TABLE_MIN_COL_WIDTH: usize = 3;

/// Title used when a page has no title property.
pub const UNTITLED: &str = "(untitled)";

/// Status used when a page has no status or select property.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Icon for callouts without an emoji icon.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";
