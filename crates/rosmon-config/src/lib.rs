//! Shared configuration for rosmon.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `rosmon_core::ConnectionConfig`. The CLI layers its
//! flag overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rosmon_core::ConnectionConfig;

/// Keyring service name for stored router passwords.
pub const KEYRING_SERVICE: &str = "rosmon";

/// Environment variables understood without any config file.
pub const ENV_HOST: &str = "ROUTEROS_HOST";
pub const ENV_USERNAME: &str = "ROUTEROS_USERNAME";
pub const ENV_PASSWORD: &str = "ROUTEROS_PASSWORD";
pub const ENV_PORT: &str = "ROUTEROS_PORT";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Verify certificates when a profile enables TLS.
    #[serde(default)]
    pub verify_tls: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            verify_tls: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    5
}

/// A named router profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Hostname or IP address (e.g., "192.168.88.1").
    pub host: String,

    /// Override the port (default: 80, or 443 with TLS).
    pub port: Option<u16>,

    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Use the `www-ssl` service.
    #[serde(default)]
    pub use_tls: bool,

    /// Override certificate verification.
    pub verify_tls: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "rosmon").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rosmon");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file is not an error.
///
/// Env overrides use `ROSMON_` with `__` between nesting levels, e.g.
/// `ROSMON_DEFAULT_PROFILE=lab` or `ROSMON_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ROSMON_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the username: profile, then `ROUTEROS_USERNAME`.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var(ENV_USERNAME).ok())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the password from the credential chain (no CLI flag step).
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env -> env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. ROUTEROS_PASSWORD
    if let Ok(val) = std::env::var(ENV_PASSWORD) {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Keyring entry name for a profile's password.
pub fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

/// Build a `ConnectionConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_connection_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ConnectionConfig, ConfigError> {
    let host = profile.host.trim();
    if host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("profile '{profile_name}' has no host"),
        });
    }

    let username = resolve_username(profile, profile_name)?;
    let password = resolve_password(profile, profile_name)?;
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let mut config = ConnectionConfig::new(host, username, password).with_timeout(timeout);
    if profile.use_tls {
        config = config.with_tls(profile.verify_tls.unwrap_or(defaults.verify_tls));
    }
    if let Some(port) = profile.port {
        config = config.with_port(port);
    }
    Ok(config)
}

/// Build a `ConnectionConfig` from `ROUTEROS_*` variables alone.
pub fn config_from_env() -> Result<ConnectionConfig, ConfigError> {
    let host = std::env::var(ENV_HOST)
        .ok()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| ConfigError::Validation {
            field: ENV_HOST.into(),
            reason: "not set".into(),
        })?;

    let profile = Profile {
        host,
        port: parse_port_env()?,
        ..Profile::default()
    };
    profile_to_connection_config(&profile, "env", &Defaults::default())
}

fn parse_port_env() -> Result<Option<u16>, ConfigError> {
    match std::env::var(ENV_PORT) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Validation {
                field: ENV_PORT.into(),
                reason: format!("expected a port number, got '{raw}'"),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    fn lab_profile() -> Profile {
        Profile {
            host: "10.10.0.1".into(),
            username: Some("monitor".into()),
            password: Some("plain".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("missing.toml")).unwrap();
            assert_eq!(cfg.default_profile.as_deref(), Some("default"));
            assert_eq!(cfg.defaults.output, "table");
            assert_eq!(cfg.defaults.timeout, 5);
            assert!(cfg.profiles.is_empty());
            Ok(())
        });
    }

    #[test]
    fn profiles_from_toml_and_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "home"

                [defaults]
                timeout = 8

                [profiles.home]
                host = "192.168.88.1"
                username = "admin"
                password_env = "HOME_ROUTER_PW"

                [profiles.edge]
                host = "edge.example.net"
                use_tls = true
                verify_tls = true
                port = 8443
                "#,
            )?;
            jail.set_env("ROSMON_DEFAULTS__OUTPUT", "json");

            let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();
            assert_eq!(cfg.defaults.timeout, 8);
            assert_eq!(cfg.defaults.output, "json");

            let (name, home) = cfg.profile(None).unwrap();
            assert_eq!(name, "home");
            assert_eq!(home.host, "192.168.88.1");
            assert!(!home.use_tls);

            let (_, edge) = cfg.profile(Some("edge")).unwrap();
            assert_eq!(edge.port, Some(8443));
            assert_eq!(edge.verify_tls, Some(true));

            assert!(matches!(
                cfg.profile(Some("nope")),
                Err(ConfigError::UnknownProfile { .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn password_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("LAB_PW", "from-env");
            let profile = Profile {
                password_env: Some("LAB_PW".into()),
                ..lab_profile()
            };

            let pw = resolve_password(&profile, "lab").unwrap();
            assert_eq!(pw.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn missing_password_is_reported() {
        Jail::expect_with(|_jail| {
            let profile = Profile {
                password: None,
                ..lab_profile()
            };
            // No keyring entry exists for this profile name.
            let err = resolve_password(&profile, "rosmon-test-no-such-profile");
            if std::env::var(ENV_PASSWORD).is_err() {
                assert!(matches!(err, Err(ConfigError::NoCredentials { .. })));
            }
            Ok(())
        });
    }

    #[test]
    fn profile_translation() {
        let profile = Profile {
            use_tls: true,
            timeout: Some(12),
            ..lab_profile()
        };

        let cfg = profile_to_connection_config(&profile, "lab", &Defaults::default()).unwrap();
        assert_eq!(cfg.host, "10.10.0.1");
        assert_eq!(cfg.username, "monitor");
        assert_eq!(cfg.port, 443);
        assert!(cfg.use_tls);
        assert!(!cfg.verify_tls);
        assert_eq!(cfg.timeout, Duration::from_secs(12));
    }

    #[test]
    fn explicit_port_wins_over_tls_default() {
        let profile = Profile {
            use_tls: true,
            port: Some(8443),
            ..lab_profile()
        };

        let cfg = profile_to_connection_config(&profile, "lab", &Defaults::default()).unwrap();
        assert_eq!(cfg.port, 8443);
    }

    #[test]
    fn empty_host_is_rejected() {
        let profile = Profile {
            host: "  ".into(),
            ..lab_profile()
        };

        let err = profile_to_connection_config(&profile, "lab", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "host"));
    }

    #[test]
    fn env_only_config() {
        Jail::expect_with(|jail| {
            jail.set_env(ENV_HOST, "172.16.0.1");
            jail.set_env(ENV_USERNAME, "api");
            jail.set_env(ENV_PASSWORD, "secret");
            jail.set_env(ENV_PORT, "8080");

            let cfg = config_from_env().unwrap();
            assert_eq!(cfg.host, "172.16.0.1");
            assert_eq!(cfg.username, "api");
            assert_eq!(cfg.password.expose_secret(), "secret");
            assert_eq!(cfg.port, 8080);
            assert!(!cfg.use_tls);
            Ok(())
        });
    }

    #[test]
    fn env_port_must_be_numeric() {
        Jail::expect_with(|jail| {
            jail.set_env(ENV_HOST, "172.16.0.1");
            jail.set_env(ENV_PORT, "http");

            let err = config_from_env().unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == ENV_PORT));
            Ok(())
        });
    }

    #[test]
    fn save_then_load() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");
            let mut cfg = Config::default();
            cfg.profiles.insert("lab".into(), lab_profile());

            save_config_to(&cfg, &path).unwrap();
            let loaded = load_config_from(&path).unwrap();

            let (_, lab) = loaded.profile(Some("lab")).unwrap();
            assert_eq!(lab.host, "10.10.0.1");
            assert_eq!(lab.username.as_deref(), Some("monitor"));
            Ok(())
        });
    }
}
