use serde::{Deserialize, Serialize};

use crate::generator::record::Point;

/// Geometry of an existing object that generators replicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Center of the template object.
    pub center: Point,
    /// Radius of the template object, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Template {
    /// A template at `center` with the given radius.
    #[must_use]
    pub const fn new(center: Point, radius: Option<f64>) -> Self {
        Self { center, radius }
    }
}

/// Read-only lookup from template index to template geometry.
///
/// Supplied by the caller; generators never mutate it.
///
/// # Example
/// ```
/// use scenegen::generator::{Point, Template, TemplateResolver};
///
/// let templates = vec![Template::new(Point::origin(), Some(0.5))];
/// assert_eq!(templates.resolve(0).and_then(|t| t.radius), Some(0.5));
/// assert!(templates.resolve(1).is_none());
/// ```
pub trait TemplateResolver {
    /// Geometry of template `index`, or `None` if there is no such template.
    fn resolve(&self, index: usize) -> Option<Template>;
}

impl TemplateResolver for [Template] {
    fn resolve(&self, index: usize) -> Option<Template> {
        self.get(index).copied()
    }
}

impl TemplateResolver for Vec<Template> {
    fn resolve(&self, index: usize) -> Option<Template> {
        self.as_slice().resolve(index)
    }
}

impl<T: TemplateResolver + ?Sized> TemplateResolver for &T {
    fn resolve(&self, index: usize) -> Option<Template> {
        (**self).resolve(index)
    }
}
