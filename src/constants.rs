//! Centralized constants used across the application.
//!
//! This module contains names and configuration values that are used in multiple
//! places or would benefit from being named constants.

/// Singular noun used in every user-facing message
pub const MARKER_NOUN: &str = "BA Tile";

/// Config group that owns every stored marker key
pub const CONFIG_GROUP: &str = "baTiles";

/// Prefix of the per-region key inside [`CONFIG_GROUP`]
pub const REGION_KEY_PREFIX: &str = "region_";

/// Log filter used for the log file when `RUST_LOG` is not set
pub const DEFAULT_FILE_LOG_FILTER: &str = "info,ba_tiles=debug";

/// Log filter used for stderr when `RUST_LOG` is not set
pub const DEFAULT_STDERR_LOG_FILTER: &str = "warn";
