use serde::{Deserialize, Serialize};

/// A 2D or 3D coordinate.
///
/// `z` is `None` for planar scenes. Distances treat a missing `z` as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    /// A planar point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// A spatial point.
    #[must_use]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// The planar origin.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns `true` if the point carries a `z` coordinate.
    #[must_use]
    pub const fn is_3d(&self) -> bool {
        self.z.is_some()
    }

    /// Euclidean distance to `other`.
    ///
    /// # Example
    /// ```
    /// use scenegen::generator::Point;
    ///
    /// assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    /// assert_eq!(Point::new(0.0, 0.0).distance(&Point::new_3d(0.0, 0.0, 2.0)), 2.0);
    /// ```
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dz = self.z.unwrap_or(0.0) - other.z.unwrap_or(0.0);
        (self.x - other.x).hypot(self.y - other.y).hypot(dz)
    }

    /// Returns `true` if every present coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_none_or(f64::is_finite)
    }
}

/// One generated instance.
///
/// Records are produced in order and never mutated once returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Where the instance goes.
    pub position: Point,
    /// Per-instance radius or size, if the kind assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size:     Option<f64>,
    /// Index of the template the instance replicates.
    pub template: usize,
}
