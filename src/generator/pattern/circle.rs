use std::f64::consts::TAU;

use crate::{
    generator::{
        pattern::replica,
        record::{PlacementRecord, Point},
        spec::CircleSpec,
        template::Template,
    },
    util::num::usize_to_f64,
};

/// Places `count` copies on a circle, `2π / count` apart, the first one at
/// `offset` radians.
///
/// A single copy sits at angle `offset`. `z` follows the center.
///
/// # Example
/// ```
/// use scenegen::generator::{
///     Point, Template,
///     pattern::circle,
///     spec::CircleSpec,
/// };
///
/// let spec = CircleSpec { count:    4,
///                         radius:   2.0,
///                         center:   Point::new(1.0, 1.0),
///                         offset:   0.0,
///                         template: 0, };
/// let records = circle(&spec, &Template::new(Point::origin(), Some(0.1)));
/// assert_eq!(records.len(), 4);
/// assert!((records[0].position.x - 3.0).abs() < 1e-12);
/// assert_eq!(records[0].size, Some(0.1));
/// ```
#[must_use]
pub fn circle(spec: &CircleSpec, template: &Template) -> Vec<PlacementRecord> {
    let spacing = TAU / usize_to_f64(spec.count);

    (0..spec.count).map(|i| {
                       let angle = spec.offset + usize_to_f64(i) * spacing;
                       let position = Point { x: spec.center.x + spec.radius * angle.cos(),
                                              y: spec.center.y + spec.radius * angle.sin(),
                                              z: spec.center.z };
                       replica(position, template, spec.template)
                   })
                   .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_copy_sits_at_offset() {
        let spec = CircleSpec { count:    1,
                                radius:   1.0,
                                center:   Point::origin(),
                                offset:   std::f64::consts::FRAC_PI_2,
                                template: 3, };
        let records = circle(&spec, &Template::new(Point::origin(), None));
        assert_eq!(records.len(), 1);
        assert!(records[0].position.x.abs() < 1e-12);
        assert!((records[0].position.y - 1.0).abs() < 1e-12);
        assert_eq!(records[0].template, 3);
    }

    #[test]
    fn center_z_is_carried() {
        let spec = CircleSpec { count:    3,
                                radius:   1.0,
                                center:   Point::new_3d(0.0, 0.0, 5.0),
                                offset:   0.0,
                                template: 0, };
        let records = circle(&spec, &Template::new(Point::origin(), None));
        assert!(records.iter().all(|r| r.position.z == Some(5.0)));
    }
}
