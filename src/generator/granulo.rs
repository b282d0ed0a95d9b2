use std::f64::consts::PI;

use rand::Rng;

use crate::{
    error::GenerateError,
    generator::{
        GenerateResult, MAX_GENERATED_RECORDS,
        spec::{DistributionLaw, GranuloSpec, StoppingCriterion, validate_granulo},
    },
    util::num::usize_to_f64,
};

/// Draws the size sequence of a granulometric population.
///
/// The random source is an explicit argument: the same spec and the same
/// seeded source always give the same sequence. Every size lies in
/// `[spec.min, spec.max]`.
///
/// With [`StoppingCriterion::Count`] exactly that many sizes are drawn. With
/// [`StoppingCriterion::TotalVolume`] sizes are drawn until the running sum of
/// their area (2D) or volume (3D) first reaches the target; the size that
/// crosses the target is kept.
///
/// # Errors
/// [`GenerateError::InvalidSpec`] if the spec is invalid, if the log-normal
/// weights vanish on `[min, max]`, or if a volume target could need more
/// than [`MAX_GENERATED_RECORDS`] sizes.
///
/// # Example
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use scenegen::generator::{
///     granulo::sample_sizes,
///     spec::{Dimension, DistributionLaw, GranuloSpec, StoppingCriterion},
/// };
///
/// let spec = GranuloSpec { min:       0.1,
///                          max:       0.2,
///                          law:       DistributionLaw::Uniform,
///                          stop:      StoppingCriterion::Count(50),
///                          seed:      7,
///                          dimension: Dimension::Two,
///                          packing:   None,
///                          template:  0, };
///
/// let a = sample_sizes(&spec, &mut StdRng::seed_from_u64(7)).unwrap();
/// let b = sample_sizes(&spec, &mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(a, b);
/// assert!(a.iter().all(|r| (0.1..=0.2).contains(r)));
/// ```
pub fn sample_sizes<R: Rng>(spec: &GranuloSpec, rng: &mut R) -> GenerateResult<Vec<f64>> {
    validate_granulo(spec)?;
    let law = SizeLaw::new(spec)?;

    let sizes = match spec.stop {
        StoppingCriterion::Count(n) => (0..n).map(|_| law.draw(rng)).collect(),
        StoppingCriterion::TotalVolume(target) => {
            let smallest = spec.dimension.measure(spec.min);
            if target / smallest > usize_to_f64(MAX_GENERATED_RECORDS) {
                return Err(GenerateError::invalid(format!("volume {target} may need more than \
                                                           {MAX_GENERATED_RECORDS} particles of size {}",
                                                          spec.min)));
            }

            let mut sizes = Vec::new();
            let mut total = 0.0;
            while total < target {
                let r = law.draw(rng);
                total += spec.dimension.measure(r);
                sizes.push(r);
            }
            sizes
        },
    };

    tracing::debug!(sizes = sizes.len(), seed = spec.seed, "sampled granulometry");
    Ok(sizes)
}

/// A distribution ready to draw from.
enum SizeLaw {
    Uniform { min: f64, max: f64 },
    Classes { sizes: Vec<f64>, cumulative: Vec<f64> },
}

impl SizeLaw {
    fn new(spec: &GranuloSpec) -> GenerateResult<Self> {
        match spec.law {
            DistributionLaw::Uniform => Ok(Self::Uniform { min: spec.min,
                                                           max: spec.max }),
            DistributionLaw::LogNormal { median,
                                         sigma,
                                         classes, } => {
                log_normal_classes(spec.min, spec.max, median, sigma, classes)
            },
        }
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Uniform { min, max } => rng.random_range(*min..=*max),
            Self::Classes { sizes, cumulative } => {
                let total = cumulative.last().copied().unwrap_or(0.0);
                let u = rng.random_range(0.0..total);
                let class = cumulative.partition_point(|&c| c <= u).min(sizes.len() - 1);
                sizes[class]
            },
        }
    }
}

/// Splits `[min, max]` into `classes` geometric classes and weighs each by the
/// log-normal density at its geometric center times its width.
fn log_normal_classes(min: f64,
                      max: f64,
                      median: f64,
                      sigma: f64,
                      classes: usize)
                      -> GenerateResult<SizeLaw> {
    let n = usize_to_f64(classes);
    let ratio = (max / min).powf(1.0 / n);
    let mu = median.ln();

    let mut sizes = Vec::with_capacity(classes);
    let mut cumulative = Vec::with_capacity(classes);
    let mut total = 0.0;

    for k in 0..classes {
        let lower = min * ratio.powf(usize_to_f64(k));
        let upper = if k + 1 == classes { max } else { lower * ratio };
        let center = (lower * upper).sqrt();

        let z = (center.ln() - mu) / sigma;
        let density = (-0.5 * z * z).exp() / (center * sigma * (2.0 * PI).sqrt());

        total += density * (upper - lower);
        sizes.push(center);
        cumulative.push(total);
    }

    if !(total.is_finite() && total > 0.0) {
        return Err(GenerateError::invalid(format!("log-normal law (median {median}, sigma {sigma}) \
                                                   has no weight on [{min}, {max}]")));
    }

    Ok(SizeLaw::Classes { sizes, cumulative })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::generator::spec::Dimension;

    fn spec(law: DistributionLaw, stop: StoppingCriterion) -> GranuloSpec {
        GranuloSpec { min: 0.1,
                      max: 0.4,
                      law,
                      stop,
                      seed: 42,
                      dimension: Dimension::Two,
                      packing: None,
                      template: 0 }
    }

    fn log_normal() -> DistributionLaw {
        DistributionLaw::LogNormal { median:  0.2,
                                     sigma:   0.25,
                                     classes: 10, }
    }

    #[test]
    fn volume_stop_reaches_the_target_with_the_last_draw() {
        let spec = spec(DistributionLaw::Uniform, StoppingCriterion::TotalVolume(2.0));
        let sizes = sample_sizes(&spec, &mut StdRng::seed_from_u64(1)).unwrap();

        let running = |sizes: &[f64]| sizes.iter().fold(0.0, |acc, &r| acc + Dimension::Two.measure(r));
        let total = running(&sizes);
        let before_last = running(&sizes[..sizes.len() - 1]);
        assert!(total >= 2.0);
        assert!(before_last < 2.0);
    }

    #[test]
    fn log_normal_sizes_are_class_centers_in_bounds() {
        let spec = spec(log_normal(), StoppingCriterion::Count(500));
        let sizes = sample_sizes(&spec, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(sizes.iter().all(|r| (0.1..=0.4).contains(r)));

        let mut distinct = sizes.clone();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        assert!(distinct.len() <= 10);
    }

    #[test]
    fn log_normal_concentrates_near_the_median() {
        let spec = spec(log_normal(), StoppingCriterion::Count(2000));
        let sizes = sample_sizes(&spec, &mut StdRng::seed_from_u64(9)).unwrap();
        let near = sizes.iter().filter(|&&r| (0.13..=0.3).contains(&r)).count();
        assert!(near > sizes.len() / 2);
    }

    #[test]
    fn vanishing_weights_are_rejected() {
        let law = DistributionLaw::LogNormal { median:  1e6,
                                               sigma:   0.01,
                                               classes: 4, };
        let spec = spec(law, StoppingCriterion::Count(3));
        assert!(sample_sizes(&spec, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn unbounded_volume_target_is_rejected() {
        let spec = spec(DistributionLaw::Uniform, StoppingCriterion::TotalVolume(1e9));
        assert!(sample_sizes(&spec, &mut StdRng::seed_from_u64(0)).is_err());
    }
}
