//! Stable error codes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Maps an error variant to a stable, machine-readable code.
///
/// Hosts use the code to pick a user-facing message without matching on
/// the Rust type; the `Display` text is the human-readable half.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
