pub mod fetch;
pub mod input;
pub mod parse;

pub use fetch::{CsvSource, HttpSource, cache_busted_url, fetch_text};
pub use input::{ResolvedSource, SourceRequest, TextSource, resolve_source};
pub use parse::{ParseReport, RawRecord, REQUIRED_COLUMNS, content_line_count, parse_csv};
