use std::f64::consts::TAU;

use crate::{
    generator::{
        pattern::replica,
        record::{PlacementRecord, Point},
        spec::SpiralSpec,
        template::Template,
    },
    util::num::usize_to_f64,
};

/// Places `count` copies on an outward spiral.
///
/// Copy `i` sits at angle `2π·i / max(1, count / 5)` and distance
/// `radius + i·factor` from the center, so the spiral makes about five turns
/// whatever the count.
#[must_use]
pub fn spiral(spec: &SpiralSpec, template: &Template) -> Vec<PlacementRecord> {
    let per_turn = usize_to_f64((spec.count / 5).max(1));

    (0..spec.count).map(|i| {
                       let i = usize_to_f64(i);
                       let angle = TAU * i / per_turn;
                       let r = spec.radius + i * spec.factor;
                       let position = Point { x: spec.center.x + r * angle.cos(),
                                              y: spec.center.y + r * angle.sin(),
                                              z: spec.center.z };
                       replica(position, template, spec.template)
                   })
                   .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_grows_linearly() {
        let spec = SpiralSpec { count:    10,
                                radius:   1.0,
                                factor:   0.5,
                                center:   Point::new(2.0, -1.0),
                                template: 0, };
        let records = spiral(&spec, &Template::new(Point::origin(), Some(0.2)));
        assert_eq!(records.len(), 10);
        for (i, record) in records.iter().enumerate() {
            let expected = 1.0 + 0.5 * usize_to_f64(i);
            assert!((record.position.distance(&spec.center) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn small_counts_advance_a_full_turn_per_copy() {
        let spec = SpiralSpec { count:    3,
                                radius:   1.0,
                                factor:   1.0,
                                center:   Point::origin(),
                                template: 0, };
        let records = spiral(&spec, &Template::new(Point::origin(), None));
        for record in &records {
            assert!(record.position.y.abs() < 1e-9);
            assert!(record.position.x > 0.0);
        }
    }
}
