//! Infrastructure constants

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_FILENAME: &str = "pdiary.toml";

/// Directory holding the configuration under the working or user config directory
pub const DEFAULT_CONFIG_DIR: &str = "pdiary";

/// Prefix of configuration environment variables (`PDIARY_LOGGING__LEVEL`)
pub const CONFIG_ENV_PREFIX: &str = "PDIARY";

/// Separator between nested keys in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "PDIARY_LOG";

/// Log level used when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name stem of rolling log files
pub const DEFAULT_LOG_FILE_STEM: &str = "pdiary";

/// State store used when none is configured
pub const DEFAULT_STORAGE_PROVIDER: &str = "filesystem";

/// State store used when the platform has no user data directory
pub const FALLBACK_STORAGE_PROVIDER: &str = "memory";

/// Directory name of the filesystem store under the user data directory
pub const DEFAULT_DATA_DIR: &str = "pdiary";
