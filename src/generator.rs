/// Placement output records.
///
/// Defines `Point` and `PlacementRecord`, the unit handed to downstream
/// consumers.
pub mod record;
/// Template lookup.
///
/// The read-only seam through which a generation call learns the geometry of
/// the object it replicates.
pub mod template;
/// Generator specs.
///
/// The closed set of generator kinds, one record per kind, with validation and
/// construction from an evaluated parameter list.
pub mod spec;
/// Reading spec fields out of an evaluated parameter list.
pub mod fields;
/// Deterministic loop patterns: circle, spiral, line and grid.
pub mod pattern;
/// Seeded granulometric size sampling.
pub mod granulo;
/// Optional packing post-pass for granulometric populations.
pub mod packing;
/// Entry point dispatching a spec to its generator.
pub mod engine;

pub use self::{
    engine::generate,
    packing::{Container, Packing, PackingPolicy},
    record::{PlacementRecord, Point},
    spec::{GeneratorKind, GeneratorSpec},
    template::{Template, TemplateResolver},
};
use crate::error::GenerateError;

/// Result type used by the generator engine.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Upper bound on the number of records a single generation call may produce.
///
/// Requests above this bound fail with [`GenerateError::InvalidSpec`] before
/// any record is generated.
pub const MAX_GENERATED_RECORDS: usize = 1_000_000;
