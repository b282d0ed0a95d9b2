use crate::{
    generator::{
        pattern::replica,
        record::{PlacementRecord, Point},
        spec::GridSpec,
        template::Template,
    },
    util::num::usize_to_f64,
};

/// Places copies on a `rows × columns [× layers]` array.
///
/// Cells are visited column first (x fastest), then row (y), then layer (z),
/// and generation stops after `limit` cells when a limit is set.
///
/// # Example
/// ```
/// use scenegen::generator::{Point, Template, pattern::grid, spec::GridSpec};
///
/// let spec = GridSpec::square(5, 2.0, Point::origin(), 0);
/// let records = grid(&spec, &Template::new(Point::origin(), None));
/// let xy: Vec<(f64, f64)> = records.iter().map(|r| (r.position.x, r.position.y)).collect();
/// assert_eq!(xy, [(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (0.0, 2.0), (2.0, 2.0)]);
/// ```
#[must_use]
pub fn grid(spec: &GridSpec, template: &Template) -> Vec<PlacementRecord> {
    let total = spec.cells().unwrap_or(0);
    let count = spec.limit.map_or(total, |limit| limit.min(total));

    (0..count).map(|cell| {
                  let column = cell % spec.columns;
                  let row = (cell / spec.columns) % spec.rows;
                  let layer = cell / (spec.columns * spec.rows);

                  let z = match spec.dz {
                      Some(dz) => Some(spec.origin.z.unwrap_or(0.0) + usize_to_f64(layer) * dz),
                      None => spec.origin.z,
                  };
                  let position = Point { x: spec.origin.x + usize_to_f64(column) * spec.dx,
                                         y: spec.origin.y + usize_to_f64(row) * spec.dy,
                                         z };
                  replica(position, template, spec.template)
              })
              .collect()
}
