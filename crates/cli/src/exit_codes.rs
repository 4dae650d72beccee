//! CLI Exit Code Registry
//!
//! This is the single source of truth for all geovet exit codes.
//! Exit codes are part of the shell contract — wrapper scripts rely on
//! them to tell fatal startup errors apart from completed runs.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success (including runs with degraded rows) |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 10-19   | input            | Input file errors                        |
//! | 20-29   | config           | Credential/configuration errors          |
//! | 30-39   | output           | Output file errors                       |
//!
//! Per-row classifier and parse failures never surface as exit codes:
//! they degrade the affected row and the run still exits 0.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// Produced by clap's own error path, listed here for the contract.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Input (10-19)
// =============================================================================

/// Input file missing, unreadable, or not parseable as CSV.
pub const EXIT_INPUT_READ: u8 = 10;

/// Input file lacks a required column.
pub const EXIT_INPUT_SCHEMA: u8 = 11;

// =============================================================================
// Config (20-29)
// =============================================================================

/// No API key provided (neither flag nor env var).
pub const EXIT_CONFIG_NO_KEY: u8 = 20;

// =============================================================================
// Output (30-39)
// =============================================================================

/// Output file could not be created or written.
pub const EXIT_OUTPUT_IO: u8 = 30;
