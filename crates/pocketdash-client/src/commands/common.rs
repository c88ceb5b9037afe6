use std::path::Path;

use chrono::{Local, NaiveDateTime, Utc};

use crate::{ClientError, ClientResult};
use crate::config::{LoadedConfig, load_config};
use crate::ledger::date::parse_now;
use crate::source::input::{ResolvedSource, SourceRequest, resolve_source};

pub(crate) struct SourceFlags {
    pub url: Option<String>,
    pub file: Option<String>,
    pub stdin_override: Option<String>,
}

/// `--now` when given, otherwise the local wall clock.
pub(crate) fn resolve_now(raw: Option<&str>, command: &str) -> ClientResult<NaiveDateTime> {
    let Some(value) = raw else {
        return Ok(Local::now().naive_local());
    };

    parse_now(value).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("Could not read `--now {value}`. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM."),
            Some(command),
        )
    })
}

pub(crate) fn current_stamp() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn load_with_source(
    config_path: Option<&Path>,
    flags: SourceFlags,
    stamp: i64,
) -> ClientResult<(LoadedConfig, ResolvedSource)> {
    let loaded = load_config(config_path)?;
    let source = resolve_source(
        SourceRequest {
            url: flags.url,
            file: flags.file,
            configured_url: loaded.config.source_url.clone(),
            stdin_override: flags.stdin_override,
        },
        stamp,
    )?;
    Ok((loaded, source))
}
