//! `resource`: fetch and display `/system/resource` telemetry.

use rosmon_core::{ConnectionConfig, FetchTelemetry, RouterOsRepository, UseCaseResult};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(config: &ConnectionConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let use_case = FetchTelemetry::new(RouterOsRepository::new(config));
    let result = use_case.execute(config).await;

    let rendered = output::render_result(global.output, &result, output::should_color(global.color))?;
    output::print_output(&rendered, global.quiet);

    match result {
        UseCaseResult::Success { .. } => Ok(()),
        UseCaseResult::Failure(failure) => Err(failure.into()),
    }
}
