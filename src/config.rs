//! Runtime settings read once at startup from the environment.
//!
//! Nothing is persisted between invocations.

use std::env;

use tracing::warn;

/// Environment variable naming the git executable.
pub const GIT_ENV_VAR: &str = "RAVEN_GIT";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "RAVEN_LOG";

const DEFAULT_GIT: &str = "git";
const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "raven=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub git_binary: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            git_binary: DEFAULT_GIT.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the environment; `verbose` overrides the log filter.
    pub fn from_env(verbose: bool) -> Self {
        let git_binary = match env::var(GIT_ENV_VAR) {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            Ok(_) => {
                warn!("{} is empty, using '{}'", GIT_ENV_VAR, DEFAULT_GIT);
                DEFAULT_GIT.to_string()
            }
            Err(_) => DEFAULT_GIT.to_string(),
        };

        let log_filter = if verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            env::var(LOG_ENV_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        Self {
            git_binary,
            log_filter,
        }
    }
}
