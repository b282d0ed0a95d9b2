use std::f64::consts::TAU;

use scenegen::{
    error::GenerateError,
    evaluate_parameter_list,
    generator::{
        Container, GeneratorKind, GeneratorSpec, Packing, PackingPolicy, PlacementRecord, Point,
        Template, generate,
        spec::{
            CircleSpec, Dimension, DistributionLaw, GranuloSpec, GridSpec, LineMode, LineSpec,
            StoppingCriterion,
        },
    },
};

fn templates() -> Vec<Template> {
    vec![Template::new(Point::origin(), Some(0.25)),
         Template::new(Point::new(5.0, 5.0), Some(1.0))]
}

fn from_text(kind: GeneratorKind, text: &str) -> Result<Vec<PlacementRecord>, GenerateError> {
    let params = evaluate_parameter_list(text).unwrap();
    let spec = GeneratorSpec::from_parameters(kind, &params, 0)?;
    generate(spec, &templates())
}

fn granulo(seed: u64, stop: StoppingCriterion) -> GranuloSpec {
    GranuloSpec { min: 0.05,
                  max: 0.15,
                  law: DistributionLaw::Uniform,
                  stop,
                  seed,
                  dimension: Dimension::Two,
                  packing: None,
                  template: 1 }
}

fn sizes(records: &[PlacementRecord]) -> Vec<f64> {
    records.iter().map(|r| r.size.unwrap()).collect()
}

#[test]
fn circle_of_twelve() {
    let spec = GeneratorSpec::Circle(CircleSpec { count:    12,
                                                  radius:   3.0,
                                                  center:   Point::origin(),
                                                  offset:   0.0,
                                                  template: 0, });
    let records = generate(spec, &templates()).unwrap();
    assert_eq!(records.len(), 12);

    for (i, record) in records.iter().enumerate() {
        assert!((record.position.distance(&Point::origin()) - 3.0).abs() < 1e-9);
        assert_eq!(record.size, Some(0.25));
        assert_eq!(record.template, 0);

        let next = &records[(i + 1) % 12];
        let a = record.position.y.atan2(record.position.x);
        let b = next.position.y.atan2(next.position.x);
        let step = (b - a).rem_euclid(TAU);
        assert!((step - TAU / 12.0).abs() < 1e-9, "step {i} is {step}");
    }
}

#[test]
fn zero_count_is_rejected() {
    let err = from_text(GeneratorKind::Circle, "count=0, radius=3, cx=0, cy=0").unwrap_err();
    assert!(matches!(err, GenerateError::InvalidSpec { .. }));

    for (kind, text) in [(GeneratorKind::Spiral, "count=0, radius=1, factor=1, cx=0, cy=0"),
                         (GeneratorKind::Line, "count=0, x0=0, y0=0, step=1"),
                         (GeneratorKind::Grid, "rows=0, columns=3, dx=1, dy=1"),
                         (GeneratorKind::Granulo, "rmin=0.1, rmax=0.2, seed=1, count=0")]
    {
        assert!(from_text(kind, text).is_err(), "{kind}: {text}");
    }
}

#[test]
fn circle_from_parameter_text() {
    let records = from_text(GeneratorKind::Circle,
                            "count=4, radius=2*0.5, cx=1, cy=-1, offset=math.pi/2").unwrap();
    assert_eq!(records.len(), 4);
    assert!((records[0].position.x - 1.0).abs() < 1e-12);
    assert!(records[0].position.y.abs() < 1e-12);
}

#[test]
fn line_endpoints_are_included() {
    let spec = GeneratorSpec::Line(LineSpec { count:    4,
                                              mode:     LineMode::Endpoints { start: Point::new_3d(0.0, 0.0, 0.0),
                                                                              end:   Point::new_3d(3.0, 6.0, -3.0), },
                                              template: 1, });
    let records = generate(spec, &templates()).unwrap();
    assert_eq!(records.first().unwrap().position, Point::new_3d(0.0, 0.0, 0.0));
    assert_eq!(records.last().unwrap().position, Point::new_3d(3.0, 6.0, -3.0));
    assert!(records[1].position.distance(&Point::new_3d(1.0, 2.0, -1.0)) < 1e-12);
    assert!(records.iter().all(|r| r.size == Some(1.0) && r.template == 1));
}

#[test]
fn line_pitch_from_parameter_text() {
    let records = from_text(GeneratorKind::Line, "count=3, x0=1, y0=2, step=0.5, axis=1").unwrap();
    let positions: Vec<Point> = records.iter().map(|r| r.position).collect();
    assert_eq!(positions,
               [Point::new(1.0, 2.0), Point::new(1.0, 2.5), Point::new(1.0, 3.0)]);
}

#[test]
fn grid_fills_row_major_up_to_the_limit() {
    let records = from_text(GeneratorKind::Grid,
                            "rows=2, columns=3, dx=1, dy=2, x0=10, y0=20, limit=4").unwrap();
    let xy: Vec<(f64, f64)> = records.iter().map(|r| (r.position.x, r.position.y)).collect();
    assert_eq!(xy, [(10.0, 20.0), (11.0, 20.0), (12.0, 20.0), (10.0, 22.0)]);

    assert!(from_text(GeneratorKind::Grid, "rows=2, columns=3, dx=1, dy=2, limit=7").is_err());
}

#[test]
fn square_grid_matches_the_loop_dialog_layout() {
    let spec = GeneratorSpec::Grid(GridSpec::square(7, 0.5, Point::new(1.0, 1.0), 0));
    let records = generate(spec, &templates()).unwrap();
    assert_eq!(records.len(), 7);
    assert_eq!(records[3].position, Point::new(1.0, 1.5));
    assert_eq!(records[6].position, Point::new(1.0, 2.0));
}

#[test]
fn spiral_has_count_records() {
    let records = from_text(GeneratorKind::Spiral, "count=20, radius=1, factor=0.1, cx=0, cy=0").unwrap();
    assert_eq!(records.len(), 20);
    let last = records.last().unwrap().position.distance(&Point::origin());
    assert!((last - 2.9).abs() < 1e-9);
}

#[test]
fn granulo_same_seed_same_sequence() {
    let a = generate(GeneratorSpec::Granulo(granulo(42, StoppingCriterion::Count(200))), &templates()).unwrap();
    let b = generate(GeneratorSpec::Granulo(granulo(42, StoppingCriterion::Count(200))), &templates()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn granulo_different_seeds_same_length() {
    let a = generate(GeneratorSpec::Granulo(granulo(1, StoppingCriterion::Count(100))), &templates()).unwrap();
    let b = generate(GeneratorSpec::Granulo(granulo(2, StoppingCriterion::Count(100))), &templates()).unwrap();
    assert_eq!(a.len(), 100);
    assert_eq!(b.len(), 100);
    assert_ne!(sizes(&a), sizes(&b));
}

#[test]
fn granulo_sizes_stay_in_bounds() {
    for seed in 0..10 {
        let records = generate(GeneratorSpec::Granulo(granulo(seed, StoppingCriterion::Count(300))),
                               &templates()).unwrap();
        assert!(sizes(&records).iter().all(|r| (0.05..=0.15).contains(r)));
    }
}

#[test]
fn granulo_without_packing_sits_on_the_template() {
    let records = generate(GeneratorSpec::Granulo(granulo(3, StoppingCriterion::TotalVolume(0.5))),
                           &templates()).unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.position == Point::new(5.0, 5.0) && r.template == 1));
}

#[test]
fn granulo_packed_in_a_box_does_not_overlap() {
    let mut spec = granulo(8, StoppingCriterion::Count(60));
    spec.packing = Some(Packing::new(Container::Box2D { lx: 3.0, ly: 3.0 },
                                     PackingPolicy { max_attempts: 5_000,
                                                     gap:          0.005, }));
    let records = generate(GeneratorSpec::Granulo(spec.clone()), &templates()).unwrap();
    assert_eq!(records.len(), 60);

    for (i, a) in records.iter().enumerate() {
        let ra = a.size.unwrap();
        assert!(a.position.x >= ra && a.position.x <= 3.0 - ra);
        assert!(a.position.y >= ra && a.position.y <= 3.0 - ra);
        for b in &records[..i] {
            assert!(a.position.distance(&b.position) >= ra + b.size.unwrap() + 0.005);
        }
    }

    let again = generate(GeneratorSpec::Granulo(spec), &templates()).unwrap();
    assert_eq!(records, again);
}

#[test]
fn packing_exhaustion_aborts_the_whole_call() {
    let mut spec = granulo(4, StoppingCriterion::Count(500));
    spec.packing = Some(Packing::new(Container::Disk2D { r: 1.0 },
                                     PackingPolicy { max_attempts: 200,
                                                     gap:          0.0, }));
    let err = generate(GeneratorSpec::Granulo(spec), &templates()).unwrap_err();
    assert!(matches!(err, GenerateError::PackingExhausted { attempts: 200, .. }));
}

#[test]
fn packing_needs_planar_particles() {
    let mut spec = granulo(4, StoppingCriterion::Count(5));
    spec.dimension = Dimension::Three;
    spec.packing = Some(Packing::new(Container::Disk2D { r: 5.0 }, PackingPolicy::default()));
    assert!(generate(GeneratorSpec::Granulo(spec), &templates()).is_err());
}

#[test]
fn specs_serialize_with_a_kind_tag() {
    let spec = GeneratorSpec::Circle(CircleSpec { count:    3,
                                                  radius:   1.0,
                                                  center:   Point::new(0.0, 1.0),
                                                  offset:   0.0,
                                                  template: 0, });
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["kind"], "circle");
    assert_eq!(json["center"]["y"], 1.0);

    let back: GeneratorSpec = serde_json::from_value(json).unwrap();
    assert_eq!(back, spec);
}
