/// Copies evenly spaced on a circle.
pub mod circle;
/// Copies on an outward spiral.
pub mod spiral;
/// Copies along a straight line, by endpoints or by pitch.
pub mod line;
/// Copies on a rectangular 2D or 3D array.
pub mod grid;

use crate::generator::{record::{PlacementRecord, Point}, template::Template};

pub use self::{circle::circle, grid::grid, line::line, spiral::spiral};

/// A record replicating `template` at `position`.
///
/// Loop patterns copy the template's radius; they do not resize instances.
pub(crate) const fn replica(position: Point, template: &Template, index: usize) -> PlacementRecord {
    PlacementRecord { position,
                      size: template.radius,
                      template: index }
}
