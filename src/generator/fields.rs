use std::collections::HashSet;

use crate::{
    error::GenerateError,
    generator::{
        GenerateResult,
        record::Point,
        spec::{
            Axis, CircleSpec, Dimension, DistributionLaw, GeneratorKind, GeneratorSpec,
            GranuloSpec, GridSpec, LineMode, LineSpec, SpiralSpec, StoppingCriterion,
        },
    },
    interpreter::evaluator::Parameters,
    util::num::{f64_to_u64_checked, f64_to_usize_checked},
};

/// Pulls named fields out of an evaluated parameter list.
///
/// Every name asked for is remembered, so [`FieldReader::finish`] can reject
/// the ones nobody asked for. A misspelled field is an error, not a silently
/// ignored default.
pub(crate) struct FieldReader<'a> {
    params: &'a Parameters,
    owner:  &'static str,
    used:   HashSet<&'a str>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(params: &'a Parameters, owner: &'static str) -> Self {
        Self { params,
               owner,
               used: HashSet::new() }
    }

    pub(crate) fn optional(&mut self, name: &'static str) -> Option<f64> {
        self.used.insert(name);
        self.params.get(name)
    }

    pub(crate) fn required(&mut self, name: &'static str) -> GenerateResult<f64> {
        self.optional(name).ok_or_else(|| {
                               GenerateError::invalid(format!("{} requires '{name}'", self.owner))
                           })
    }

    pub(crate) fn or(&mut self, name: &'static str, default: f64) -> f64 {
        self.optional(name).unwrap_or(default)
    }

    /// Returns `true` if any of `names` is present, without consuming them.
    pub(crate) fn any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.params.contains(name))
    }

    pub(crate) fn count(&mut self, name: &'static str) -> GenerateResult<usize> {
        let value = self.required(name)?;
        to_count(name, value)
    }

    pub(crate) fn optional_count(&mut self, name: &'static str) -> GenerateResult<Option<usize>> {
        self.optional(name).map(|value| to_count(name, value)).transpose()
    }

    /// A point from two required and one optional coordinate.
    pub(crate) fn point(&mut self,
                        x: &'static str,
                        y: &'static str,
                        z: &'static str)
                        -> GenerateResult<Point> {
        Ok(Point { x: self.required(x)?,
                   y: self.required(y)?,
                   z: self.optional(z) })
    }

    /// Fails on the first parameter that was never asked for.
    pub(crate) fn finish(self) -> GenerateResult<()> {
        match self.params.names().find(|name| !self.used.contains(name)) {
            Some(name) => Err(GenerateError::invalid(format!("unknown field '{name}' for {}",
                                                             self.owner))),
            None => Ok(()),
        }
    }
}

fn to_count(name: &str, value: f64) -> GenerateResult<usize> {
    f64_to_usize_checked(value,
                         GenerateError::invalid(format!("{name} must be a non-negative whole number, got {value}")))
}

impl GeneratorSpec {
    /// Builds a spec of `kind` from an evaluated parameter list.
    ///
    /// Field names are fixed per kind (`[..]` marks optional fields):
    ///
    /// | kind | fields |
    /// |------|--------|
    /// | circle | `count, radius, cx, cy, [cz], [offset]` |
    /// | spiral | `count, radius, factor, cx, cy, [cz]` |
    /// | line | `count, x0, y0, [z0]` and either `x1, y1, [z1]` or `step, [axis]` |
    /// | grid | `rows, columns, [layers], dx, dy, [dz], [x0], [y0], [z0], [limit]` |
    /// | granulo | `rmin, rmax, seed`, one of `count` / `volume`, `[median, sigma, classes]`, `[dimension]` |
    ///
    /// The returned spec has been validated.
    ///
    /// # Errors
    /// [`GenerateError::InvalidSpec`] for a missing, unknown or out-of-range
    /// field.
    ///
    /// # Example
    /// ```
    /// use scenegen::{
    ///     evaluate_parameter_list,
    ///     generator::{GeneratorKind, GeneratorSpec},
    /// };
    ///
    /// let params = evaluate_parameter_list("count=12, radius=3, cx=0, cy=0").unwrap();
    /// let spec = GeneratorSpec::from_parameters(GeneratorKind::Circle, &params, 0).unwrap();
    /// assert_eq!(spec.planned_records(), Some(12));
    ///
    /// let typo = evaluate_parameter_list("count=12, raduis=3, cx=0, cy=0").unwrap();
    /// assert!(GeneratorSpec::from_parameters(GeneratorKind::Circle, &typo, 0).is_err());
    /// ```
    pub fn from_parameters(kind: GeneratorKind,
                           params: &Parameters,
                           template: usize)
                           -> GenerateResult<Self> {
        let mut fields = FieldReader::new(params, kind.name());

        let spec = match kind {
            GeneratorKind::Circle => Self::Circle(CircleSpec { count: fields.count("count")?,
                                                               radius: fields.required("radius")?,
                                                               center: fields.point("cx", "cy", "cz")?,
                                                               offset: fields.or("offset", 0.0),
                                                               template }),
            GeneratorKind::Spiral => Self::Spiral(SpiralSpec { count: fields.count("count")?,
                                                               radius: fields.required("radius")?,
                                                               factor: fields.required("factor")?,
                                                               center: fields.point("cx", "cy", "cz")?,
                                                               template }),
            GeneratorKind::Line => Self::Line(line_from(&mut fields, template)?),
            GeneratorKind::Grid => Self::Grid(grid_from(&mut fields, template)?),
            GeneratorKind::Granulo => Self::Granulo(granulo_from(&mut fields, template)?),
        };

        fields.finish()?;
        spec.validate()?;
        Ok(spec)
    }
}

fn line_from(fields: &mut FieldReader<'_>, template: usize) -> GenerateResult<LineSpec> {
    let endpoints = fields.any(&["x1", "y1", "z1"]);
    let pitch = fields.any(&["step", "axis"]);
    if endpoints == pitch {
        return Err(GenerateError::invalid("line takes either end point fields (x1, y1, [z1]) \
                                           or pitch fields (step, [axis]), not both or neither"));
    }

    let count = fields.count("count")?;
    let start = fields.point("x0", "y0", "z0")?;
    let mode = if endpoints {
        LineMode::Endpoints { start,
                              end: fields.point("x1", "y1", "z1")? }
    } else {
        let axis = match fields.optional_count("axis")? {
            None | Some(0) => Axis::X,
            Some(1) => Axis::Y,
            Some(2) => Axis::Z,
            Some(other) => {
                return Err(GenerateError::invalid(format!("axis must be 0, 1 or 2, got {other}")));
            },
        };
        LineMode::Pitch { start,
                          step: fields.required("step")?,
                          axis }
    };

    Ok(LineSpec { count,
                  mode,
                  template })
}

fn grid_from(fields: &mut FieldReader<'_>, template: usize) -> GenerateResult<GridSpec> {
    let rows = fields.count("rows")?;
    let columns = fields.count("columns")?;
    let layers = fields.optional_count("layers")?;
    let dx = fields.required("dx")?;
    let dy = fields.required("dy")?;
    let dz = fields.optional("dz");
    let x0 = fields.or("x0", 0.0);
    let y0 = fields.or("y0", 0.0);
    let z0 = fields.optional("z0");
    let origin = match (layers, z0) {
        (Some(_), z) => Point::new_3d(x0, y0, z.unwrap_or(0.0)),
        (None, z) => Point { x: x0, y: y0, z },
    };

    Ok(GridSpec { rows,
                  columns,
                  layers,
                  dx,
                  dy,
                  dz,
                  origin,
                  limit: fields.optional_count("limit")?,
                  template })
}

fn granulo_from(fields: &mut FieldReader<'_>, template: usize) -> GenerateResult<GranuloSpec> {
    let min = fields.required("rmin")?;
    let max = fields.required("rmax")?;
    let seed = fields.required("seed")?;
    let seed = f64_to_u64_checked(seed,
                                  GenerateError::invalid(format!("seed must be a non-negative whole number, got {seed}")))?;

    let stop = match (fields.optional_count("count")?, fields.optional("volume")) {
        (Some(n), None) => StoppingCriterion::Count(n),
        (None, Some(v)) => StoppingCriterion::TotalVolume(v),
        _ => return Err(GenerateError::invalid("granulo takes exactly one of 'count' or 'volume'")),
    };

    let law = match (fields.optional("median"), fields.optional("sigma"), fields.optional_count("classes")?) {
        (None, None, None) => DistributionLaw::Uniform,
        (Some(median), Some(sigma), Some(classes)) => DistributionLaw::LogNormal { median,
                                                                                  sigma,
                                                                                  classes },
        _ => {
            return Err(GenerateError::invalid("log-normal law needs all of 'median', 'sigma' and 'classes'"));
        },
    };

    let dimension = match fields.optional_count("dimension")? {
        None | Some(2) => Dimension::Two,
        Some(3) => Dimension::Three,
        Some(other) => {
            return Err(GenerateError::invalid(format!("dimension must be 2 or 3, got {other}")));
        },
    };

    Ok(GranuloSpec { min,
                     max,
                     law,
                     stop,
                     seed,
                     dimension,
                     packing: None,
                     template })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_parameter_list;

    fn build(kind: GeneratorKind, text: &str) -> GenerateResult<GeneratorSpec> {
        let params = evaluate_parameter_list(text).unwrap();
        GeneratorSpec::from_parameters(kind, &params, 0)
    }

    #[test]
    fn line_modes_are_exclusive() {
        assert!(build(GeneratorKind::Line, "count=3, x0=0, y0=0, x1=1, y1=1").is_ok());
        assert!(build(GeneratorKind::Line, "count=3, x0=0, y0=0, step=0.5, axis=1").is_ok());
        assert!(build(GeneratorKind::Line, "count=3, x0=0, y0=0").is_err());
        assert!(build(GeneratorKind::Line, "count=3, x0=0, y0=0, x1=1, y1=1, step=1").is_err());
    }

    #[test]
    fn pitch_axis_maps_to_axes() {
        let spec = build(GeneratorKind::Line, "count=2, x0=0, y0=0, step=1, axis=2").unwrap();
        let GeneratorSpec::Line(LineSpec { mode: LineMode::Pitch { axis, .. }, .. }) = spec else {
            panic!("expected a pitched line");
        };
        assert_eq!(axis, Axis::Z);
        assert!(build(GeneratorKind::Line, "count=2, x0=0, y0=0, step=1, axis=3").is_err());
    }

    #[test]
    fn counts_must_be_whole() {
        let err = build(GeneratorKind::Circle, "count=2.5, radius=1, cx=0, cy=0").unwrap_err();
        assert!(err.to_string().contains("whole number"));
        assert!(build(GeneratorKind::Circle, "count=-1, radius=1, cx=0, cy=0").is_err());
    }

    #[test]
    fn unknown_field_is_named() {
        let err = build(GeneratorKind::Grid, "rows=2, columns=2, dx=1, dy=1, colour=3").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn granulo_law_and_stop_selection() {
        let uniform = build(GeneratorKind::Granulo, "rmin=0.1, rmax=0.2, seed=7, count=10").unwrap();
        assert!(matches!(uniform,
                         GeneratorSpec::Granulo(GranuloSpec { law: DistributionLaw::Uniform,
                                                              stop: StoppingCriterion::Count(10),
                                                              .. })));

        let lognormal = build(GeneratorKind::Granulo,
                              "rmin=0.1, rmax=0.2, seed=7, volume=1, median=0.15, sigma=0.3, classes=8, dimension=3").unwrap();
        assert!(matches!(lognormal,
                         GeneratorSpec::Granulo(GranuloSpec { law: DistributionLaw::LogNormal { classes: 8, .. },
                                                              dimension: Dimension::Three,
                                                              .. })));

        assert!(build(GeneratorKind::Granulo, "rmin=0.1, rmax=0.2, seed=7").is_err());
        assert!(build(GeneratorKind::Granulo, "rmin=0.1, rmax=0.2, seed=7, count=1, volume=1").is_err());
        assert!(build(GeneratorKind::Granulo, "rmin=0.1, rmax=0.2, seed=7, count=1, median=0.1").is_err());
    }
}
