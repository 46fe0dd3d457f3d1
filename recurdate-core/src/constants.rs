/// Maximum number of occurrences returned by a preview.
pub const DEFAULT_MAX_OCCURRENCES: usize = 10;

/// How many years past the anchor date the expander scans before giving up.
/// Rules that can never match (e.g. an empty weekday set) stop here.
pub const DEFAULT_HORIZON_YEARS: u32 = 100;

/// Default tracing filter for the CLI.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Prefix for environment variable overrides (RECURDATE_MAX_OCCURRENCES, ...)
pub const ENV_PREFIX: &str = "RECURDATE";
