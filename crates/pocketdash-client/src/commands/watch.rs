use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};

use crate::commands::common::{SourceFlags, current_stamp, load_with_source, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{SnapshotData, WatchCycle, WatchData};
use crate::refresh::{Dashboard, RefreshOutcome, Snapshot};
use crate::source::fetch::CsvSource;
use crate::{ClientError, ClientResult};

pub const DEFAULT_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_COUNT: usize = 3;

#[derive(Debug)]
pub struct WatchOptions<'a> {
    pub url: Option<String>,
    pub file: Option<String>,
    pub now: Option<String>,
    pub config_path: Option<&'a Path>,
    pub interval: Duration,
    pub count: usize,
    pub stdin_override: Option<String>,
}

impl Default for WatchOptions<'_> {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            now: None,
            config_path: None,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            count: DEFAULT_COUNT,
            stdin_override: None,
        }
    }
}

#[doc(hidden)]
pub fn run_with_options(options: WatchOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.count == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "`--count` must be at least 1.",
            Some("watch"),
        ));
    }

    let fixed_now = match options.now.as_deref() {
        Some(value) => Some(resolve_now(Some(value), "watch")?),
        None => None,
    };
    let (loaded, source) = load_with_source(
        options.config_path,
        SourceFlags {
            url: options.url,
            file: options.file,
            stdin_override: options.stdin_override,
        },
        current_stamp(),
    )?;

    let dashboard = Dashboard::new(source.stamped_per_request(), loaded.config);
    let cycles = run_cycles(&dashboard, options.interval, options.count, fixed_now)?;
    success("watch", WatchData { cycles })
}

/// Fires `count` triggers `interval` apart. Each accepted trigger loads on
/// its own worker, so a slow load overlaps the next trigger and gets it
/// dropped.
pub fn run_cycles<S>(
    dashboard: &Dashboard<S>,
    interval: Duration,
    count: usize,
    fixed_now: Option<NaiveDateTime>,
) -> ClientResult<Vec<WatchCycle>>
where
    S: CsvSource + Sync,
{
    run_paced(dashboard, count, fixed_now, |_| thread::sleep(interval))
}

/// `pace(cycle)` runs before every trigger after the first.
fn run_paced<S, P>(
    dashboard: &Dashboard<S>,
    count: usize,
    fixed_now: Option<NaiveDateTime>,
    mut pace: P,
) -> ClientResult<Vec<WatchCycle>>
where
    S: CsvSource + Sync,
    P: FnMut(usize),
{
    thread::scope(|scope| {
        let mut triggers = Vec::with_capacity(count);
        for cycle in 1..=count {
            if cycle > 1 {
                pace(cycle);
            }
            let now = fixed_now.unwrap_or_else(|| Local::now().naive_local());
            let worker = dashboard
                .try_begin()
                .map(|ticket| scope.spawn(move || ticket.run(now)));
            triggers.push((cycle, worker));
        }

        let mut cycles = Vec::with_capacity(count);
        for (cycle, worker) in triggers {
            let outcome = match worker {
                Some(worker) => RefreshOutcome::Completed(worker.join().map_err(|_| {
                    ClientError::new(
                        "internal_error",
                        "A refresh worker stopped unexpectedly.",
                        vec!["Rerun the command.".to_string()],
                    )
                })?),
                None => RefreshOutcome::Skipped,
            };
            cycles.push(WatchCycle {
                cycle,
                outcome: outcome.as_str().to_string(),
                snapshot: outcome.into_snapshot().map(snapshot_data),
            });
        }
        Ok(cycles)
    })
}

fn snapshot_data(snapshot: Snapshot) -> SnapshotData {
    match snapshot {
        Snapshot::Ready(model) => SnapshotData::Ready { dashboard: model },
        Snapshot::Failed(error) => SnapshotData::Failed {
            code: error.code,
            message: error.message,
        },
    }
}
