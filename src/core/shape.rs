// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

use rand::RngCore;

/// Geometric primitive the BVH and the scene aggregate over.
pub trait Shape: Send + Sync {
    fn bounding_box(&self) -> AABB;

    fn surface_area(&self) -> Float;

    /// Nearest hit inside the ray segment, if any.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>>;

    /// Uniformly distributed point on the surface with its area density.
    fn sample(&self, rng: &mut dyn RngCore) -> SurfaceSampleRecord<'_>;

    fn material(&self) -> &dyn BSDF;

    fn is_emissive(&self) -> bool {
        self.material().has_emission()
    }

    /// Solid-angle density of sampling this shape as a light from
    /// `reference`, for shapes with a closed form. `None` falls back to the
    /// area-measure conversion.
    fn solid_angle_pdf(&self, _reference: &Vector3f) -> Option<Float> {
        None
    }
}
