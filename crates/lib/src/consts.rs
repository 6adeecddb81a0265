//! Shared constants.

pub const APP_NAME: &str = "trimbuild";

/// Directory name of the rewrite root inside the OS temp directory.
pub const REWRITE_DIR_NAME: &str = "go-rewrite";

/// Overrides the rewrite root when set.
pub const REWRITE_ROOT_ENV: &str = "TRIMBUILD_REWRITE_ROOT";

/// Overrides the Go executable used for builds.
pub const GO_BINARY_ENV: &str = "TRIMBUILD_GO";

pub const DEFAULT_GO_BINARY: &str = "go";

pub const DEFAULT_SHELL: &str = "bash";

/// Non-directory entries above this size are left out of overlays (10 MiB).
pub const MAX_OVERLAY_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const DEFAULT_OUTPUT: &str = "exec.bin";
pub const DEFAULT_DEBUG_OUTPUT: &str = "debug.bin";
