use std::fs;
use std::io::{IsTerminal, Read};

use crate::source::fetch::{CsvSource, HttpSource};
use crate::{ClientError, ClientResult};

/// CSV text that has already been read from a local file or stdin.
#[derive(Debug, Clone)]
pub struct TextSource {
    label: String,
    content: String,
}

impl TextSource {
    pub fn new(label: &str, content: String) -> Self {
        Self {
            label: label.to_string(),
            content,
        }
    }
}

impl CsvSource for TextSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> ClientResult<String> {
        Ok(self.content.clone())
    }
}

#[derive(Debug, Clone)]
pub enum ResolvedSource {
    Http(HttpSource),
    Text(TextSource),
}

impl ResolvedSource {
    /// See [`HttpSource::stamped_per_request`]. Local text is returned unchanged.
    pub fn stamped_per_request(self) -> Self {
        match self {
            Self::Http(source) => Self::Http(source.stamped_per_request()),
            Self::Text(source) => Self::Text(source),
        }
    }
}

impl CsvSource for ResolvedSource {
    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::Text(source) => source.describe(),
        }
    }

    fn load(&self) -> ClientResult<String> {
        match self {
            Self::Http(source) => source.load(),
            Self::Text(source) => source.load(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceRequest {
    pub url: Option<String>,
    pub file: Option<String>,
    pub configured_url: Option<String>,
    pub stdin_override: Option<String>,
}

/// Chooses where the CSV comes from: `--file`, then `--url`, then the
/// configured endpoint. A file path of `-` reads stdin.
pub fn resolve_source(request: SourceRequest, stamp: i64) -> ClientResult<ResolvedSource> {
    if request.file.is_some() && request.url.is_some() {
        return Err(ClientError::invalid_argument_with_recovery(
            "Both --file and --url were provided. Pass exactly one source.",
            vec!["Drop either `--file` or `--url` and rerun.".to_string()],
        ));
    }

    if let Some(path) = request.file {
        return read_text_source(&path, request.stdin_override).map(ResolvedSource::Text);
    }

    let url = request.url.or(request.configured_url);
    match url {
        Some(value) if !value.trim().is_empty() => {
            Ok(ResolvedSource::Http(HttpSource::new(value.trim(), stamp)))
        }
        _ => Err(ClientError::missing_source()),
    }
}

fn read_text_source(path: &str, stdin_override: Option<String>) -> ClientResult<TextSource> {
    if path == "-" {
        let body = read_stdin(stdin_override)?;
        return Ok(TextSource::new("stdin", body));
    }

    let body = fs::read_to_string(path)
        .map_err(|error| ClientError::source_read_failed(path, &error.to_string()))?;
    Ok(TextSource::new(path, body))
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<String> {
    if let Some(value) = stdin_override {
        return Ok(value);
    }

    if std::io::stdin().is_terminal() {
        return Err(ClientError::invalid_argument_with_recovery(
            "Path `-` means stdin input, but nothing was piped in.",
            vec!["Pipe CSV text into the command or pass a file path.".to_string()],
        ));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| ClientError::source_read_failed("stdin", &error.to_string()))?;
    Ok(buffer)
}
