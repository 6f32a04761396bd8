//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and shared defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Kalamine";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "kalamine";

/// Geometry used when a layout source does not name one.
pub const DEFAULT_GEOMETRY: &str = "ISO";

/// Output directory for generated drivers.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Longest XKB keysym name that fits a symbol column.
pub const XKB_SYMBOL_WIDTH: usize = 16;
