use std::f64::consts::{PI, TAU};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::GenerateError,
    generator::{
        GenerateResult,
        fields::FieldReader,
        record::Point,
        spec::{ensure, finite, non_negative},
    },
    interpreter::evaluator::Parameters,
};

/// Planar region that particles are deposited into.
///
/// `Box2D` spans `[0, lx] × [0, ly]`. The round containers are centered at the
/// origin: `Disk2D` is a full disc, `Drum2D` the lower half (`y <= 0`) of a
/// disc, `Couette2D` the annulus between two radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Container {
    Box2D { lx: f64, ly: f64 },
    Disk2D { r: f64 },
    Drum2D { r: f64 },
    Couette2D { rint: f64, rext: f64 },
}

impl Container {
    /// Builds a container from its name (`box`, `disk`, `drum`, `couette`)
    /// and an evaluated parameter list (`lx, ly`, `r`, `r`, `rint, rext`).
    ///
    /// # Errors
    /// [`GenerateError::InvalidSpec`] for an unknown name, a missing or
    /// unknown field, or invalid dimensions.
    ///
    /// # Example
    /// ```
    /// use scenegen::{evaluate_parameter_list, generator::Container};
    ///
    /// let params = evaluate_parameter_list("lx=2, ly=1").unwrap();
    /// let container = Container::from_parameters("box", &params).unwrap();
    /// assert_eq!(container, Container::Box2D { lx: 2.0, ly: 1.0 });
    /// ```
    pub fn from_parameters(name: &str, params: &Parameters) -> GenerateResult<Self> {
        let container = match name.to_ascii_lowercase().as_str() {
            "box" | "box2d" => {
                let mut fields = FieldReader::new(params, "box container");
                let container = Self::Box2D { lx: fields.required("lx")?,
                                              ly: fields.required("ly")? };
                fields.finish()?;
                container
            },
            "disk" | "disk2d" => {
                let mut fields = FieldReader::new(params, "disk container");
                let container = Self::Disk2D { r: fields.required("r")? };
                fields.finish()?;
                container
            },
            "drum" | "drum2d" => {
                let mut fields = FieldReader::new(params, "drum container");
                let container = Self::Drum2D { r: fields.required("r")? };
                fields.finish()?;
                container
            },
            "couette" | "couette2d" => {
                let mut fields = FieldReader::new(params, "couette container");
                let container = Self::Couette2D { rint: fields.required("rint")?,
                                                  rext: fields.required("rext")? };
                fields.finish()?;
                container
            },
            _ => return Err(GenerateError::invalid(format!("unknown container '{name}'"))),
        };

        container.validate()?;
        Ok(container)
    }

    /// Checks that the container has a non-empty interior.
    pub fn validate(&self) -> GenerateResult<()> {
        match *self {
            Self::Box2D { lx, ly } => {
                finite("lx", lx)?;
                finite("ly", ly)?;
                ensure(lx > 0.0 && ly > 0.0, "box sides must be > 0")
            },
            Self::Disk2D { r } | Self::Drum2D { r } => {
                finite("r", r)?;
                ensure(r > 0.0, "container radius must be > 0")
            },
            Self::Couette2D { rint, rext } => {
                non_negative("rint", rint)?;
                finite("rext", rext)?;
                ensure(rint < rext, "rint must be < rext")
            },
        }
    }

    /// Returns `true` if a particle of radius `r` fits somewhere inside.
    ///
    /// The bounds are the ones [`candidate`](Self::candidate) samples
    /// between, computed the same way, so a particle that fits always has a
    /// non-empty sampling range.
    #[must_use]
    pub fn fits(&self, r: f64) -> bool {
        match *self {
            Self::Box2D { lx, ly } => r <= lx - r && r <= ly - r,
            Self::Disk2D { r: outer } => r <= outer,
            Self::Drum2D { r: outer } => r <= outer - r,
            Self::Couette2D { rint, rext } => rint + r <= rext - r,
        }
    }

    /// Draws a candidate center for a particle of radius `r`.
    ///
    /// Candidates are uniform over the region where the particle lies fully
    /// inside. Returns `None` when the draw falls outside that region, which
    /// counts as a failed attempt.
    fn candidate<R: Rng>(&self, r: f64, rng: &mut R) -> Option<Point> {
        match *self {
            Self::Box2D { lx, ly } => {
                Some(Point::new(rng.random_range(r..=lx - r), rng.random_range(r..=ly - r)))
            },
            Self::Disk2D { r: outer } => {
                let rho = (outer - r) * rng.random::<f64>().sqrt();
                let theta = rng.random_range(0.0..TAU);
                Some(Point::new(rho * theta.cos(), rho * theta.sin()))
            },
            Self::Drum2D { r: outer } => {
                let rho = (outer - r) * rng.random::<f64>().sqrt();
                let theta = rng.random_range(PI..TAU);
                let y = rho * theta.sin();
                (y <= -r).then(|| Point::new(rho * theta.cos(), y))
            },
            Self::Couette2D { rint, rext } => {
                let (a, b) = (rint + r, rext - r);
                let rho = rng.random_range(a * a..=b * b).sqrt();
                let theta = rng.random_range(0.0..TAU);
                Some(Point::new(rho * theta.cos(), rho * theta.sin()))
            },
        }
    }
}

/// Overlap rejection settings for the packing post-pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackingPolicy {
    /// Candidate positions tried per particle before giving up.
    pub max_attempts: usize,
    /// Minimum clearance between two particle surfaces.
    pub gap:          f64,
}

impl Default for PackingPolicy {
    fn default() -> Self {
        Self { max_attempts: 10_000,
               gap:          0.0, }
    }
}

impl PackingPolicy {
    pub fn validate(&self) -> GenerateResult<()> {
        ensure(self.max_attempts > 0, "max_attempts must be > 0")?;
        non_negative("gap", self.gap)
    }
}

/// Where and how a granulometric population is deposited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Packing {
    pub container: Container,
    #[serde(default)]
    pub policy:    PackingPolicy,
}

impl Packing {
    #[must_use]
    pub const fn new(container: Container, policy: PackingPolicy) -> Self {
        Self { container, policy }
    }

    pub fn validate(&self) -> GenerateResult<()> {
        self.container.validate()?;
        self.policy.validate()
    }
}

/// Deposits particles of the given radii, in order, by random sequential
/// addition.
///
/// Each particle gets up to `max_attempts` uniform candidate positions; a
/// candidate is rejected when `distance < r_i + r_j + gap` for any particle
/// already placed. Placed particles never move.
///
/// # Errors
/// - [`GenerateError::InvalidSpec`] if a particle is larger than the
///   container.
/// - [`GenerateError::PackingExhausted`] if a particle cannot be placed within
///   the attempt budget. No partial result is returned.
pub fn pack<R: Rng>(sizes: &[f64], packing: &Packing, rng: &mut R) -> GenerateResult<Vec<Point>> {
    packing.validate()?;
    let Packing { container, policy } = packing;

    let mut placed: Vec<(Point, f64)> = Vec::with_capacity(sizes.len());
    for (index, &r) in sizes.iter().enumerate() {
        if !container.fits(r) {
            return Err(GenerateError::invalid(format!("particle {index} of size {r} does not fit \
                                                       in the container")));
        }

        let mut position = None;
        for attempt in 1..=policy.max_attempts {
            let Some(candidate) = container.candidate(r, rng) else {
                continue;
            };
            if overlaps_existing(&placed, &candidate, r, policy.gap) {
                tracing::trace!(index, attempt, "packing candidate rejected");
                continue;
            }
            position = Some(candidate);
            break;
        }

        let Some(position) = position else {
            tracing::warn!(index,
                           size = r,
                           attempts = policy.max_attempts,
                           placed = placed.len(),
                           "packing exhausted");
            return Err(GenerateError::PackingExhausted { index,
                                                         size: r,
                                                         attempts: policy.max_attempts });
        };
        placed.push((position, r));
    }

    Ok(placed.into_iter().map(|(position, _)| position).collect())
}

fn overlaps_existing(placed: &[(Point, f64)], candidate: &Point, r: f64, gap: f64) -> bool {
    placed.iter()
          .any(|(other, other_r)| other.distance(candidate) < other_r + r + gap)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn inside(container: &Container, p: &Point, r: f64) -> bool {
        let eps = 1e-12;
        let rho = p.x.hypot(p.y);
        match *container {
            Container::Box2D { lx, ly } => {
                p.x >= r - eps && p.x <= lx - r + eps && p.y >= r - eps && p.y <= ly - r + eps
            },
            Container::Disk2D { r: outer } => rho + r <= outer + eps,
            Container::Drum2D { r: outer } => rho + r <= outer + eps && p.y <= -r + eps,
            Container::Couette2D { rint, rext } => rho - r >= rint - eps && rho + r <= rext + eps,
        }
    }

    #[test]
    fn every_container_keeps_particles_inside_and_apart() {
        let containers = [Container::Box2D { lx: 4.0, ly: 3.0 },
                          Container::Disk2D { r: 3.0 },
                          Container::Drum2D { r: 4.0 },
                          Container::Couette2D { rint: 1.0, rext: 3.0 }];
        let sizes = [0.2, 0.15, 0.3, 0.1, 0.25, 0.2, 0.1, 0.15];

        for container in containers {
            let packing = Packing::new(container, PackingPolicy { max_attempts: 10_000,
                                                                  gap:          0.01, });
            let positions = pack(&sizes, &packing, &mut StdRng::seed_from_u64(11)).unwrap();
            assert_eq!(positions.len(), sizes.len());

            for (i, p) in positions.iter().enumerate() {
                assert!(inside(&container, p, sizes[i]), "{container:?} particle {i} at {p:?}");
                for j in 0..i {
                    assert!(p.distance(&positions[j]) >= sizes[i] + sizes[j] + 0.01);
                }
            }
        }
    }

    #[test]
    fn oversized_particle_is_invalid() {
        let packing = Packing::new(Container::Disk2D { r: 1.0 }, PackingPolicy::default());
        let err = pack(&[0.5, 2.0], &packing, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidSpec { .. }));
    }

    #[test]
    fn rounding_at_the_annulus_width_is_not_a_panic() {
        // 0.1 + 0.3 rounds above 0.7 - 0.3.
        let packing = Packing::new(Container::Couette2D { rint: 0.1, rext: 0.7 },
                                   PackingPolicy::default());
        let err = pack(&[0.3], &packing, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidSpec { .. }));

        let packing = Packing::new(Container::Box2D { lx: 0.7 - 0.1, ly: 1.0 },
                                   PackingPolicy::default());
        if let Ok(positions) = pack(&[0.3], &packing, &mut StdRng::seed_from_u64(1)) {
            assert!(inside(&packing.container, &positions[0], 0.3));
        }
    }

    #[test]
    fn particle_exactly_filling_the_container() {
        let policy = PackingPolicy { max_attempts: 100,
                                     gap:          0.0, };
        let mut rng = StdRng::seed_from_u64(2);

        let boxed = Packing::new(Container::Box2D { lx: 1.0, ly: 1.0 }, policy);
        assert_eq!(pack(&[0.5], &boxed, &mut rng).unwrap(), [Point::new(0.5, 0.5)]);

        let disk = Packing::new(Container::Disk2D { r: 1.0 }, policy);
        let positions = pack(&[1.0], &disk, &mut rng).unwrap();
        assert!(positions[0].distance(&Point::origin()) < 1e-12);

        let couette = Packing::new(Container::Couette2D { rint: 1.0, rext: 2.0 }, policy);
        let positions = pack(&[0.5], &couette, &mut rng).unwrap();
        assert!((positions[0].distance(&Point::origin()) - 1.5).abs() < 1e-12);

        // The only admissible center of a half-disc is a single point.
        let drum = Packing::new(Container::Drum2D { r: 1.0 }, policy);
        assert!(matches!(pack(&[0.5], &drum, &mut rng),
                         Err(GenerateError::PackingExhausted { attempts: 100, .. })));

        for container in [boxed.container, disk.container, couette.container, drum.container] {
            let packing = Packing::new(container, policy);
            assert!(matches!(pack(&[1.01], &packing, &mut rng),
                             Err(GenerateError::InvalidSpec { .. })),
                    "{container:?}");
        }
    }

    #[test]
    fn exhaustion_reports_the_particle() {
        // Two discs of radius 1 cannot share a 2.5 × 2.5 box.
        let packing = Packing::new(Container::Box2D { lx: 2.5, ly: 2.5 },
                                   PackingPolicy { max_attempts: 50,
                                                   gap:          0.0, });
        let err = pack(&[1.0, 1.0], &packing, &mut StdRng::seed_from_u64(5)).unwrap_err();
        assert_eq!(err,
                   GenerateError::PackingExhausted { index:    1,
                                                     size:     1.0,
                                                     attempts: 50, });
    }

    #[test]
    fn container_names_and_fields() {
        let params = crate::evaluate_parameter_list("rint=1, rext=2").unwrap();
        assert_eq!(Container::from_parameters("Couette2D", &params).unwrap(),
                   Container::Couette2D { rint: 1.0, rext: 2.0 });
        assert!(Container::from_parameters("disk", &params).is_err());
        assert!(Container::from_parameters("hexagon", &params).is_err());

        let inverted = crate::evaluate_parameter_list("rint=2, rext=1").unwrap();
        assert!(Container::from_parameters("couette", &inverted).is_err());
    }
}
