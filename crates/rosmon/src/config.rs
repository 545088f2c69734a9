//! CLI-side configuration: applies `GlobalOpts` overrides on top of the
//! profiles and credential chain from `rosmon-config`.
//!
//! Core never sees these types -- it receives a pre-built `ConnectionConfig`.

use rosmon_config::{Config, ConfigError, Profile};
use rosmon_core::ConnectionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `ConnectionConfig` for this invocation.
///
/// Sources, highest first: CLI flags, the active profile, then the
/// `ROUTEROS_*` environment variables when no profile or `--host` exists.
pub fn resolve_connection(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = rosmon_config::load_config_or_default();
    resolve_with(global, &cfg)
}

fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<ConnectionConfig, CliError> {
    let requested = global.profile.as_deref();

    match cfg.profile(requested) {
        Ok((name, profile)) => {
            let merged = apply_overrides(profile.clone(), global);
            return Ok(rosmon_config::profile_to_connection_config(
                &merged,
                name,
                &cfg.defaults,
            )?);
        }
        // An explicitly requested profile must exist.
        Err(ConfigError::UnknownProfile { name }) if requested.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(cfg),
            });
        }
        Err(_) => {}
    }

    let profile_name = active_profile_name(global, cfg);

    if global.host.is_some() {
        let merged = apply_overrides(Profile::default(), global);
        return Ok(rosmon_config::profile_to_connection_config(
            &merged,
            &profile_name,
            &cfg.defaults,
        )?);
    }

    if std::env::var(rosmon_config::ENV_HOST).is_ok() {
        return Ok(rosmon_config::config_from_env()?);
    }

    Err(CliError::NoConfig {
        path: rosmon_config::config_path().display().to_string(),
    })
}

/// Layer flag values over a profile. Unset flags leave the profile alone.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if global.port.is_some() {
        profile.port = global.port;
    }
    if global.username.is_some() {
        profile.username.clone_from(&global.username);
    }
    if global.password_env.is_some() {
        profile.password_env.clone_from(&global.password_env);
    }
    if global.tls {
        profile.use_tls = true;
    }
    if global.verify_tls {
        profile.verify_tls = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}
