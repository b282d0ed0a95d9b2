/// Builtin function implementations.
///
/// Contains the pure numeric functions registered in the namespace.
pub mod builtin;

/// Call resolution and dispatch.
pub mod core;
