/// Numeric conversion helpers.
///
/// This module provides safe functions for converting evaluated `f64`
/// parameters into counts and seeds without silent truncation, and counts back
/// into `f64` for geometry.
///
/// Fallible functions return a `Result` that is `Ok` if the conversion is
/// lossless and valid, or the caller-supplied error otherwise.
pub mod num;
