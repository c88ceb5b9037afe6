use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{SourceFlags, current_stamp, load_with_source, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::pipeline::render_dashboard;

#[derive(Debug, Default)]
pub struct ShowOptions<'a> {
    pub url: Option<String>,
    pub file: Option<String>,
    pub now: Option<String>,
    pub config_path: Option<&'a Path>,
    pub stamp: Option<i64>,
    pub stdin_override: Option<String>,
}

pub fn run(
    url: Option<&str>,
    file: Option<&str>,
    now: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ShowOptions {
        url: url.map(std::string::ToString::to_string),
        file: file.map(std::string::ToString::to_string),
        now: now.map(std::string::ToString::to_string),
        ..ShowOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ShowOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let now = resolve_now(options.now.as_deref(), "show")?;
    let (loaded, source) = load_with_source(
        options.config_path,
        SourceFlags {
            url: options.url,
            file: options.file,
            stdin_override: options.stdin_override,
        },
        options.stamp.unwrap_or_else(current_stamp),
    )?;

    let model = render_dashboard(&source, &loaded.config, now)?;
    success("show", model)
}
