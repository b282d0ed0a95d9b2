use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::GenerateError,
    generator::{
        GenerateResult, MAX_GENERATED_RECORDS,
        granulo::sample_sizes,
        packing::pack,
        pattern,
        record::PlacementRecord,
        spec::{GeneratorSpec, GranuloSpec},
        template::{Template, TemplateResolver},
    },
};

/// Produces the placement records of `spec`.
///
/// The spec is validated, its template resolved, and the request checked
/// against [`MAX_GENERATED_RECORDS`] before anything is generated. Generation
/// is all or nothing: on error no record is returned.
///
/// Granulometric specs seed a fresh [`StdRng`] from `spec.seed` inside the
/// call, so the same spec always yields the same records and concurrent calls
/// never share a random source.
///
/// # Errors
/// - [`GenerateError::InvalidSpec`] for a precondition violation, an
///   unresolved template or an oversized request.
/// - [`GenerateError::PackingExhausted`] if the packing post-pass fails.
///
/// # Example
/// ```
/// use scenegen::generator::{GeneratorSpec, Point, Template, generate, spec::CircleSpec};
///
/// let templates = vec![Template::new(Point::origin(), Some(0.5))];
/// let spec = GeneratorSpec::Circle(CircleSpec { count:    12,
///                                               radius:   3.0,
///                                               center:   Point::origin(),
///                                               offset:   0.0,
///                                               template: 0, });
/// let records = generate(spec, &templates).unwrap();
/// assert_eq!(records.len(), 12);
/// assert!(records.iter().all(|r| (r.position.distance(&Point::origin()) - 3.0).abs() < 1e-9));
/// ```
pub fn generate<T: TemplateResolver + ?Sized>(spec: GeneratorSpec,
                                              templates: &T)
                                              -> GenerateResult<Vec<PlacementRecord>> {
    spec.validate()?;

    let index = spec.template();
    let template = templates.resolve(index)
                            .ok_or_else(|| GenerateError::invalid(format!("template {index} does not exist")))?;

    if let Some(planned) = spec.planned_records()
       && planned > MAX_GENERATED_RECORDS
    {
        return Err(GenerateError::invalid(format!("{planned} records requested, at most \
                                                   {MAX_GENERATED_RECORDS} allowed")));
    }

    let kind = spec.kind();
    let records = match &spec {
        GeneratorSpec::Circle(circle) => pattern::circle(circle, &template),
        GeneratorSpec::Spiral(spiral) => pattern::spiral(spiral, &template),
        GeneratorSpec::Line(line) => pattern::line(line, &template),
        GeneratorSpec::Grid(grid) => pattern::grid(grid, &template),
        GeneratorSpec::Granulo(granulo) => granulometry(granulo, &template)?,
    };

    tracing::debug!(%kind, template = index, records = records.len(), "generated placements");
    Ok(records)
}

/// Samples sizes, then deposits them if the spec asks for packing.
///
/// Without packing every record sits at the template center.
fn granulometry(spec: &GranuloSpec, template: &Template) -> GenerateResult<Vec<PlacementRecord>> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let sizes = sample_sizes(spec, &mut rng)?;

    let positions = match &spec.packing {
        Some(packing) => pack(&sizes, packing, &mut rng)?,
        None => vec![template.center; sizes.len()],
    };

    Ok(positions.into_iter()
                .zip(sizes)
                .map(|(position, size)| PlacementRecord { position,
                                                          size: Some(size),
                                                          template: spec.template })
                .collect())
}
