//! Analysis constants and configuration defaults.

/// Date assigned to mobile-format messages seen before any date marker.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Number of distinct keywords counted before the display slice is taken.
pub const DEFAULT_KEYWORD_POOL_SIZE: usize = 50;

/// Number of keywords carried in an analysis report.
pub const DEFAULT_KEYWORD_DISPLAY_SIZE: usize = 10;

/// Hourly buckets in a time distribution.
pub const HOURS_PER_DAY: u32 = 24;

/// Minimum character length of a counted keyword.
pub const MIN_KEYWORD_CHARS: usize = 2;

/// Starting point of the interest score before lexicon adjustments.
pub const BASE_INTEREST_SCORE: i32 = 50;

/// Upper bound of the interest score.
pub const MAX_INTEREST_SCORE: i32 = 100;

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "talkscope";

/// File name of the default configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
