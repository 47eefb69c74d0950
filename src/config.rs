//! Runtime configuration.
//!
//! Constants used across the crate plus [`Settings`] read from the
//! environment (a `.env` file is honoured by `main`).

/// Pause between paginated Azure Graph requests.
pub const SLEEP_MSEC: u64 = 200;

/// Rows requested per Azure Graph page.
pub const AZ_PAGE_SIZE: u32 = 100;

/// Largest accepted stdout from a CLI command, in bytes.
pub const MAX_CLI_OUTPUT: usize = 500_000;

/// Most primary-sized blocks the parent network is split into.
pub const MAX_SPLIT: usize = 8;

/// Number of blocks the utility block is split into.
pub const SECONDARY_SPLIT: usize = 8;

pub const CACHE_FILE_PREFIX: &str = "vpc_cache";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Environment variable naming a VNet cache file.
pub const ENV_VPC_CACHE: &str = "SUBNET_VPC_CACHE";

/// Environment variable naming the log4rs config file.
pub const ENV_LOG_CONFIG: &str = "SUBNET_LOG_CONFIG";

/// Settings taken from the environment; command line flags take precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub vpc_cache: Option<String>,
    pub log_config: String,
}

impl Settings {
    pub fn from_env() -> Settings {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Settings {
            vpc_cache: non_empty(ENV_VPC_CACHE),
            log_config: non_empty(ENV_LOG_CONFIG).unwrap_or_else(|| DEFAULT_LOG_CONFIG.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.vpc_cache, None);
        assert_eq!(settings.log_config, "log4rs.yml");
    }

    #[test]
    fn test_settings_from_values() {
        let settings = Settings::from_lookup(|key| match key {
            ENV_VPC_CACHE => Some("cache.json".to_string()),
            ENV_LOG_CONFIG => Some("".to_string()),
            _ => None,
        });
        assert_eq!(settings.vpc_cache.as_deref(), Some("cache.json"));
        assert_eq!(settings.log_config, "log4rs.yml");
    }
}
