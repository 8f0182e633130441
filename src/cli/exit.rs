//! Semantic exit codes for the demo binary.
//!
//! Codes stay in the range 0-125; 126-255 are reserved by shells.

/// Semantic exit codes.
pub struct ExitCode;

impl ExitCode {
    /// Operation completed without errors.
    pub const SUCCESS: i32 = 0;

    /// Bad arguments or invalid configuration.
    pub const USER_ERROR: i32 = 1;

    /// A container operation failed while the demo was running.
    pub const RUNTIME_ERROR: i32 = 2;

    /// Bug in the tool itself, such as a worker thread panicking.
    pub const INTERNAL_ERROR: i32 = 3;

    /// Get human-readable description of an exit code.
    #[must_use]
    pub const fn description(code: i32) -> &'static str {
        match code {
            0 => "success",
            1 => "user error (invalid input/arguments)",
            2 => "runtime error",
            3 => "internal error (bug)",
            _ => "unknown",
        }
    }

    /// Check if an exit code indicates success (code 0).
    #[must_use]
    pub const fn is_success(code: i32) -> bool {
        code == Self::SUCCESS
    }
}
