use crate::{
    generator::{
        pattern::replica,
        record::{PlacementRecord, Point},
        spec::{Axis, LineMode, LineSpec},
        template::Template,
    },
    util::num::usize_to_f64,
};

/// Places `count` copies along a line.
///
/// In endpoint mode the first and last copies coincide with the endpoints and
/// a single copy sits at the start. In pitch mode copy `i` is `i·step` from the
/// start along the chosen axis; stepping along z makes planar starts spatial.
///
/// # Example
/// ```
/// use scenegen::generator::{
///     Point, Template,
///     pattern::line,
///     spec::{LineMode, LineSpec},
/// };
///
/// let spec = LineSpec { count:    5,
///                       mode:     LineMode::Endpoints { start: Point::new(0.0, 0.0),
///                                                       end:   Point::new(4.0, 2.0), },
///                       template: 0, };
/// let records = line(&spec, &Template::new(Point::origin(), None));
/// assert_eq!(records[4].position, Point::new(4.0, 2.0));
/// assert_eq!(records[2].position, Point::new(2.0, 1.0));
/// ```
#[must_use]
pub fn line(spec: &LineSpec, template: &Template) -> Vec<PlacementRecord> {
    (0..spec.count).map(|i| replica(position(spec, i), template, spec.template))
                   .collect()
}

fn position(spec: &LineSpec, i: usize) -> Point {
    match &spec.mode {
        LineMode::Endpoints { start, end } => {
            if spec.count == 1 || i == 0 {
                return *start;
            }
            if i == spec.count - 1 {
                return *end;
            }
            let t = usize_to_f64(i) / usize_to_f64(spec.count - 1);
            Point { x: lerp(start.x, end.x, t),
                    y: lerp(start.y, end.y, t),
                    z: start.z.zip(end.z).map(|(a, b)| lerp(a, b, t)) }
        },
        LineMode::Pitch { start, step, axis } => {
            let d = usize_to_f64(i) * step;
            match axis {
                Axis::X => Point { x: start.x + d, ..*start },
                Axis::Y => Point { y: start.y + d, ..*start },
                Axis::Z => Point { z: Some(start.z.unwrap_or(0.0) + d),
                                   ..*start },
            }
        },
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template::new(Point::origin(), Some(1.0))
    }

    #[test]
    fn single_copy_sits_at_start() {
        let spec = LineSpec { count:    1,
                              mode:     LineMode::Endpoints { start: Point::new(1.0, 2.0),
                                                              end:   Point::new(9.0, 9.0), },
                              template: 0, };
        let records = line(&spec, &template());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, Point::new(1.0, 2.0));
    }

    #[test]
    fn pitch_along_y_keeps_x() {
        let spec = LineSpec { count:    3,
                              mode:     LineMode::Pitch { start: Point::new(1.0, 0.0),
                                                          step:  0.5,
                                                          axis:  Axis::Y, },
                              template: 0, };
        let ys: Vec<f64> = line(&spec, &template()).iter().map(|r| r.position.y).collect();
        assert_eq!(ys, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn pitch_along_z_lifts_planar_start() {
        let spec = LineSpec { count:    2,
                              mode:     LineMode::Pitch { start: Point::new(0.0, 0.0),
                                                          step:  2.0,
                                                          axis:  Axis::Z, },
                              template: 0, };
        let records = line(&spec, &template());
        assert_eq!(records[1].position, Point::new_3d(0.0, 0.0, 2.0));
    }
}
