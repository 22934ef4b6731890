//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//! clap itself exits 2 on usage errors.

/// Success - run completed and output was written.
pub const EXIT_SUCCESS: u8 = 0;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime failure: unreadable input, unwritable output, CSV errors.
pub const EXIT_RUNTIME: u8 = 4;
