//! `health`: evaluate memory and CPU usage against critical thresholds.

use rosmon_core::{ConnectionConfig, EvaluateHealth, RouterOsRepository, UseCaseResult};

use crate::cli::{GlobalOpts, HealthArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    config: &ConnectionConfig,
    args: HealthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let use_case = EvaluateHealth::new(RouterOsRepository::new(config));
    let result = use_case.execute(config).await;

    let rendered = output::render_result(global.output, &result, output::should_color(global.color))?;
    output::print_output(&rendered, global.quiet);

    match result {
        UseCaseResult::Success { warnings, .. } if args.fail_on_warning && !warnings.is_empty() => {
            Err(CliError::Unhealthy {
                count: warnings.len(),
            })
        }
        UseCaseResult::Success { .. } => Ok(()),
        UseCaseResult::Failure(failure) => Err(failure.into()),
    }
}
