//! What happens to unhandled exceptions.
//!
//! The configuration is resolved once per process, the first time it's needed: either from an
//! explicit [`init`] call, or from the environment.
//!
//! | Variable              | Values                       | Default |
//! |-----------------------|------------------------------|---------|
//! | `STRUCTEX_FATAL`      | `exit`, `abort`              | `exit`  |
//! | `STRUCTEX_EXIT_CODE`  | non-zero integer             | `70`    |
//! | `STRUCTEX_BACKTRACE`  | `0`, `1`, `true`, `false`    | `0`     |

use super::error::ConfigError;
use std::sync::OnceLock;

/// Exit status of a process terminated by an unhandled exception, unless configured otherwise.
pub const UNHANDLED_EXIT_CODE: i32 = 70;

const FATAL_VAR: &str = "STRUCTEX_FATAL";
const EXIT_CODE_VAR: &str = "STRUCTEX_EXIT_CODE";
const BACKTRACE_VAR: &str = "STRUCTEX_BACKTRACE";

/// How the process is terminated after an unhandled exception is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum FatalAction {
    /// [`std::process::exit`] with [`FatalConfig::exit_code`]. Destructors don't run.
    #[default]
    Exit,
    /// [`std::process::abort`].
    Abort,
}

/// Unhandled-exception configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct FatalConfig {
    pub action: FatalAction,
    /// Only used with [`FatalAction::Exit`]. Never zero.
    pub exit_code: i32,
    /// Whether to print a backtrace of the throw site after the diagnostics.
    pub backtrace: bool,
}

impl Default for FatalConfig {
    #[inline]
    fn default() -> Self {
        Self {
            action: FatalAction::Exit,
            exit_code: UNHANDLED_EXIT_CODE,
            backtrace: false,
        }
    }
}

impl FatalConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the variables is set to an invalid value.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Read the configuration from an arbitrary variable source. Unset variables keep their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the variables is set to an invalid value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use structex::{FatalAction, FatalConfig};
    ///
    /// let config = FatalConfig::from_lookup(|variable| match variable {
    ///     "STRUCTEX_FATAL" => Some("abort".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.action, FatalAction::Abort);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(FATAL_VAR) {
            config.action = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::UnknownAction(value.clone()))?;
        }
        if let Some(value) = lookup(EXIT_CODE_VAR) {
            config.exit_code = parse_exit_code(&value)?;
        }
        if let Some(value) = lookup(BACKTRACE_VAR) {
            config.backtrace = parse_flag(BACKTRACE_VAR, &value)?;
        }
        Ok(config)
    }

    #[inline]
    #[must_use]
    pub const fn with_action(mut self, action: FatalAction) -> Self {
        self.action = action;
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroExitCode`] if `exit_code` is zero.
    #[inline]
    pub fn with_exit_code(mut self, exit_code: i32) -> Result<Self, ConfigError> {
        if exit_code == 0 {
            return Err(ConfigError::ZeroExitCode);
        }
        self.exit_code = exit_code;
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub const fn with_backtrace(mut self, backtrace: bool) -> Self {
        self.backtrace = backtrace;
        self
    }
}

fn parse_exit_code(value: &str) -> Result<i32, ConfigError> {
    let code = value
        .trim()
        .parse::<i32>()
        .map_err(|source| ConfigError::InvalidExitCode {
            value: value.to_string(),
            source,
        })?;
    if code == 0 {
        return Err(ConfigError::ZeroExitCode);
    }
    Ok(code)
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            variable,
            value: value.to_string(),
        }),
    }
}

static CONFIG: OnceLock<FatalConfig> = OnceLock::new();

/// Set the process-wide configuration.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyInitialized`] if the configuration was already set, or already
/// resolved from the environment by an unhandled exception.
#[inline]
pub fn init(config: FatalConfig) -> Result<(), ConfigError> {
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The process-wide configuration, resolving it from the environment if [`init`] wasn't called.
///
/// Invalid environment values are logged and replaced by the defaults.
#[inline]
#[must_use]
pub fn get() -> FatalConfig {
    *CONFIG.get_or_init(|| {
        FatalConfig::from_env().unwrap_or_else(|err| {
            log::warn!("ignoring unhandled-exception configuration from environment: {err}");
            FatalConfig::default()
        })
    })
}
