//! `watch`: poll one router on an interval until Ctrl-C or `--count`.
//!
//! Every tick runs `FetchTelemetry` (recording the router's identity in an
//! in-memory store) and evaluates the fetched snapshot's health. A failed
//! tick is reported and the loop continues.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use rosmon_core::{
    ConnectionConfig, CriticalThresholds, FetchTelemetry, InMemoryRouterInfoStore,
    RouterInfoStore, RouterOsRepository, assess,
};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    config: &ConnectionConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = Arc::new(InMemoryRouterInfoStore::new());
    let use_case =
        FetchTelemetry::new(RouterOsRepository::new(config)).with_store(store.clone());
    let color = output::should_color(global.color);

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut polls: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break;
            }
        }

        let result = assess(&CriticalThresholds, &config.host, use_case.execute(config).await);
        let rendered = match global.output {
            OutputFormat::Table => output::render_tick(&config.host, &result, color),
            // One compact document per line.
            OutputFormat::Json | OutputFormat::JsonCompact => {
                output::render_result(OutputFormat::JsonCompact, &result, false)?
            }
            OutputFormat::Yaml => {
                format!("---\n{}", output::render_result(OutputFormat::Yaml, &result, false)?)
            }
        };
        output::print_output(&rendered, global.quiet);

        polls += 1;
        if args.count.is_some_and(|limit| polls >= limit) {
            break;
        }
    }

    if global.output == OutputFormat::Table && !store.is_empty() {
        output::print_output(&output::render_routers(&store.list()), global.quiet);
    }
    Ok(())
}
