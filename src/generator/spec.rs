use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::GenerateError,
    generator::{GenerateResult, packing::Packing, record::Point},
    util::num::usize_to_f64,
};

/// The closed set of generator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Circle,
    Spiral,
    Line,
    Grid,
    Granulo,
}

impl GeneratorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [Self::Circle, Self::Spiral, Self::Line, Self::Grid, Self::Granulo];

    /// Lower-case name used in parameter text and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Spiral => "spiral",
            Self::Line => "line",
            Self::Grid => "grid",
            Self::Granulo => "granulo",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
                 .find(|kind| kind.name().eq_ignore_ascii_case(s))
                 .ok_or_else(|| GenerateError::invalid(format!("unknown generator kind '{s}'")))
    }
}

/// A fully specified generation request.
///
/// Built from already evaluated numbers, immutable once built, and consumed by
/// exactly one call to [`generate`](crate::generator::generate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorSpec {
    Circle(CircleSpec),
    Spiral(SpiralSpec),
    Line(LineSpec),
    Grid(GridSpec),
    Granulo(GranuloSpec),
}

/// `count` copies evenly spaced on a circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub count:    usize,
    pub radius:   f64,
    pub center:   Point,
    /// Angle of the first copy, in radians.
    #[serde(default)]
    pub offset:   f64,
    pub template: usize,
}

/// `count` copies on a spiral whose radius grows by `factor` per copy.
///
/// Copy `i` sits at angle `2π·i / max(1, count / 5)` (integer division) and
/// radius `radius + i·factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralSpec {
    pub count:    usize,
    pub radius:   f64,
    pub factor:   f64,
    pub center:   Point,
    pub template: usize,
}

/// Axis along which a pitched line advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// How a line is laid out. Exactly one mode per spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LineMode {
    /// Evenly spaced between two endpoints, both included.
    Endpoints { start: Point, end: Point },
    /// Uniform pitch from a start point along one axis.
    Pitch { start: Point, step: f64, axis: Axis },
}

/// `count` copies along a straight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub count:    usize,
    #[serde(flatten)]
    pub mode:     LineMode,
    pub template: usize,
}

/// A rectangular `rows × columns [× layers]` array.
///
/// Columns advance along x by `dx`, rows along y by `dy`, layers along z by
/// `dz`. Cells are filled row-major, x fastest, and at most `limit` of them
/// are emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows:     usize,
    pub columns:  usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers:   Option<usize>,
    pub dx:       f64,
    pub dy:       f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dz:       Option<f64>,
    pub origin:   Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit:    Option<usize>,
    pub template: usize,
}

impl GridSpec {
    /// `count` copies on the smallest square grid that holds them.
    ///
    /// The side is `⌈√count⌉`; only as many rows as needed are used and the
    /// last row may be partial.
    ///
    /// # Example
    /// ```
    /// use scenegen::generator::{Point, spec::GridSpec};
    ///
    /// let grid = GridSpec::square(10, 1.0, Point::origin(), 0);
    /// assert_eq!((grid.columns, grid.rows, grid.limit), (4, 3, Some(10)));
    /// ```
    #[must_use]
    pub fn square(count: usize, step: f64, origin: Point, template: usize) -> Self {
        let mut side = count.isqrt();
        if side * side < count {
            side += 1;
        }
        let rows = if side == 0 { 0 } else { count.div_ceil(side) };

        Self { rows,
               columns: side,
               layers: None,
               dx: step,
               dy: step,
               dz: None,
               origin,
               limit: Some(count),
               template }
    }

    /// Number of cells in the full grid, if it fits in `usize`.
    #[must_use]
    pub fn cells(&self) -> Option<usize> {
        self.rows
            .checked_mul(self.columns)?
            .checked_mul(self.layers.unwrap_or(1))
    }
}

/// Distribution sizes are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum DistributionLaw {
    /// Continuous uniform on `[min, max]`.
    Uniform,
    /// Log-normal discretized into `classes` geometric size classes.
    LogNormal { median: f64, sigma: f64, classes: usize },
}

/// When sampling stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoppingCriterion {
    /// After exactly this many sizes.
    Count(usize),
    /// At the first size whose running total of area (2D) or volume (3D)
    /// reaches this value.
    TotalVolume(f64),
}

/// Whether sizes are radii of discs or of spheres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    #[default]
    #[serde(rename = "2d")]
    Two,
    #[serde(rename = "3d")]
    Three,
}

impl Dimension {
    /// Area of a disc (2D) or volume of a sphere (3D) of radius `r`.
    #[must_use]
    pub fn measure(self, r: f64) -> f64 {
        match self {
            Self::Two => std::f64::consts::PI * r * r,
            Self::Three => 4.0 / 3.0 * std::f64::consts::PI * r.powi(3),
        }
    }
}

/// A granulometric population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranuloSpec {
    pub min:       f64,
    pub max:       f64,
    pub law:       DistributionLaw,
    pub stop:      StoppingCriterion,
    pub seed:      u64,
    #[serde(default)]
    pub dimension: Dimension,
    /// Packing post-pass; without it every record sits at the template center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing:   Option<Packing>,
    pub template:  usize,
}

impl GeneratorSpec {
    /// The kind tag.
    #[must_use]
    pub const fn kind(&self) -> GeneratorKind {
        match self {
            Self::Circle(_) => GeneratorKind::Circle,
            Self::Spiral(_) => GeneratorKind::Spiral,
            Self::Line(_) => GeneratorKind::Line,
            Self::Grid(_) => GeneratorKind::Grid,
            Self::Granulo(_) => GeneratorKind::Granulo,
        }
    }

    /// Index of the template being replicated.
    #[must_use]
    pub const fn template(&self) -> usize {
        match self {
            Self::Circle(CircleSpec { template, .. })
            | Self::Spiral(SpiralSpec { template, .. })
            | Self::Line(LineSpec { template, .. })
            | Self::Grid(GridSpec { template, .. })
            | Self::Granulo(GranuloSpec { template, .. }) => *template,
        }
    }

    /// Number of records the spec asks for, when known before generation.
    ///
    /// Volume-stopped granulometric specs return `None`: their length depends
    /// on the draws.
    #[must_use]
    pub fn planned_records(&self) -> Option<usize> {
        match self {
            Self::Circle(CircleSpec { count, .. })
            | Self::Spiral(SpiralSpec { count, .. })
            | Self::Line(LineSpec { count, .. }) => Some(*count),
            Self::Grid(grid) => grid.limit.or_else(|| grid.cells()),
            Self::Granulo(granulo) => match granulo.stop {
                StoppingCriterion::Count(n) => Some(n),
                StoppingCriterion::TotalVolume(_) => None,
            },
        }
    }

    /// Checks the kind-specific preconditions.
    ///
    /// # Errors
    /// [`GenerateError::InvalidSpec`] naming the first offending field.
    pub fn validate(&self) -> GenerateResult<()> {
        match self {
            Self::Circle(circle) => {
                positive_count("count", circle.count)?;
                non_negative("radius", circle.radius)?;
                finite_point("center", &circle.center)?;
                finite("offset", circle.offset)
            },
            Self::Spiral(spiral) => {
                positive_count("count", spiral.count)?;
                non_negative("radius", spiral.radius)?;
                finite("factor", spiral.factor)?;
                finite_point("center", &spiral.center)?;
                let last = spiral.radius + usize_to_f64(spiral.count - 1) * spiral.factor;
                ensure(last >= 0.0, "spiral radius becomes negative before the last copy")
            },
            Self::Line(line) => {
                positive_count("count", line.count)?;
                match &line.mode {
                    LineMode::Endpoints { start, end } => {
                        finite_point("start", start)?;
                        finite_point("end", end)?;
                        ensure(start.is_3d() == end.is_3d(),
                               "start and end must both be 2D or both be 3D")
                    },
                    LineMode::Pitch { start, step, .. } => {
                        finite_point("start", start)?;
                        finite("step", *step)
                    },
                }
            },
            Self::Grid(grid) => validate_grid(grid),
            Self::Granulo(granulo) => validate_granulo(granulo),
        }
    }
}

fn validate_grid(grid: &GridSpec) -> GenerateResult<()> {
    positive_count("rows", grid.rows)?;
    positive_count("columns", grid.columns)?;
    if let Some(layers) = grid.layers {
        positive_count("layers", layers)?;
    }
    ensure(grid.layers.is_some() == grid.dz.is_some(),
           "dz is required with layers and only with layers")?;

    non_negative("dx", grid.dx)?;
    non_negative("dy", grid.dy)?;
    if let Some(dz) = grid.dz {
        non_negative("dz", dz)?;
    }
    finite_point("origin", &grid.origin)?;

    let cells = grid.cells()
                    .ok_or_else(|| GenerateError::invalid("grid has more cells than fit in memory"))?;
    if let Some(limit) = grid.limit {
        positive_count("limit", limit)?;
        ensure(limit <= cells,
               format!("limit {limit} exceeds the {cells} cells of the grid"))?;
    }
    Ok(())
}

pub(crate) fn validate_granulo(granulo: &GranuloSpec) -> GenerateResult<()> {
    finite("rmin", granulo.min)?;
    finite("rmax", granulo.max)?;
    ensure(granulo.min > 0.0, "rmin must be > 0")?;
    ensure(granulo.min < granulo.max,
           format!("rmin ({}) must be < rmax ({})", granulo.min, granulo.max))?;

    match granulo.stop {
        StoppingCriterion::Count(n) => positive_count("count", n)?,
        StoppingCriterion::TotalVolume(v) => {
            finite("volume", v)?;
            ensure(v > 0.0, "volume must be > 0")?;
        },
    }

    if let DistributionLaw::LogNormal { median,
                                        sigma,
                                        classes, } = granulo.law
    {
        finite("median", median)?;
        finite("sigma", sigma)?;
        ensure(median > 0.0, "median must be > 0")?;
        ensure(sigma > 0.0, "sigma must be > 0")?;
        positive_count("classes", classes)?;
    }

    if let Some(packing) = &granulo.packing {
        ensure(granulo.dimension == Dimension::Two,
               "packing containers are planar; dimension must be 2")?;
        packing.validate()?;
    }
    Ok(())
}

pub(crate) fn ensure(condition: bool, reason: impl Into<String>) -> GenerateResult<()> {
    if condition {
        Ok(())
    } else {
        Err(GenerateError::invalid(reason))
    }
}

pub(crate) fn finite(name: &str, value: f64) -> GenerateResult<()> {
    ensure(value.is_finite(), format!("{name} must be a finite number"))
}

pub(crate) fn non_negative(name: &str, value: f64) -> GenerateResult<()> {
    finite(name, value)?;
    ensure(value >= 0.0, format!("{name} must be >= 0"))
}

fn positive_count(name: &str, value: usize) -> GenerateResult<()> {
    ensure(value > 0, format!("{name} must be > 0"))
}

fn finite_point(name: &str, point: &Point) -> GenerateResult<()> {
    ensure(point.is_finite(), format!("{name} must have finite coordinates"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(count: usize, radius: f64) -> GeneratorSpec {
        GeneratorSpec::Circle(CircleSpec { count,
                                           radius,
                                           center: Point::origin(),
                                           offset: 0.0,
                                           template: 0 })
    }

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.name().parse::<GeneratorKind>(), Ok(kind));
        }
        assert!("hexagon".parse::<GeneratorKind>().is_err());
    }

    #[test]
    fn circle_preconditions() {
        assert!(circle(1, 0.0).validate().is_ok());
        assert!(circle(0, 1.0).validate().is_err());
        assert!(circle(3, -1.0).validate().is_err());
        assert!(circle(3, f64::NAN).validate().is_err());
    }

    #[test]
    fn square_grid_has_enough_cells() {
        for count in 1..50 {
            let grid = GridSpec::square(count, 1.0, Point::origin(), 0);
            assert!(grid.cells().unwrap() >= count);
            assert!(GeneratorSpec::Grid(grid).validate().is_ok());
        }
        assert!(GeneratorSpec::Grid(GridSpec::square(0, 1.0, Point::origin(), 0)).validate()
                                                                                 .is_err());
    }

    #[test]
    fn grid_dz_requires_layers() {
        let mut grid = GridSpec::square(4, 1.0, Point::origin(), 0);
        grid.dz = Some(1.0);
        assert!(GeneratorSpec::Grid(grid.clone()).validate().is_err());
        grid.layers = Some(2);
        assert!(GeneratorSpec::Grid(grid).validate().is_ok());
    }

    #[test]
    fn granulo_rejects_inverted_bounds() {
        let spec = GranuloSpec { min:       2.0,
                                 max:       1.0,
                                 law:       DistributionLaw::Uniform,
                                 stop:      StoppingCriterion::Count(10),
                                 seed:      1,
                                 dimension: Dimension::Two,
                                 packing:   None,
                                 template:  0, };
        let err = GeneratorSpec::Granulo(spec).validate().unwrap_err();
        assert!(err.to_string().contains("rmin"));
    }

    #[test]
    fn measure_is_area_or_volume() {
        assert!((Dimension::Two.measure(1.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((Dimension::Three.measure(1.0) - 4.0 / 3.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
