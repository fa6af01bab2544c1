// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::shape::Shape;
use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::math::aabb::AABB;
use crate::math::constants:: { EPSILON, Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::warp::square_to_triangle;

use rand::{Rng, RngCore};
use std::sync::Arc;

/// Single-sided triangle. Rays arriving from behind the winding normal pass
/// through.
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f,
    e1: Vector3f,
    e2: Vector3f,
    normal: Vector3f,
    area: Float,
    material: Arc<dyn BSDF>,
}

impl Shape for Triangle {
    fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.p0, self.p1);
        bound.expand_by_point(&self.p2);

        bound
    }

    fn surface_area(&self) -> Float {
        self.area
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        let dir = ray.dir();
        if dir.dot(&self.normal) > 0.0 {
            return None;
        }

        let pvec = dir.cross(&self.e2);
        let det = self.e1.dot(&pvec);
        if det.abs() < EPSILON * EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin() - self.p0;
        let u = tvec.dot(&pvec) * inv_det;
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let qvec = tvec.cross(&self.e1);
        let v = dir.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = self.e2.dot(&qvec) * inv_det;
        if t < 0.0 || !ray.test_segment(t) {
            return None;
        }

        let p = self.p0 * (1.0 - u - v) + self.p1 * u + self.p2 * v;
        Some(SurfaceIntersection::new(p, self.normal, t, self.material.as_ref(), self))
    }

    fn sample(&self, rng: &mut dyn RngCore) -> SurfaceSampleRecord<'_> {
        let u = Vector2f::new(rng.gen::<Float>(), rng.gen::<Float>());
        let bary = square_to_triangle(&u);
        let p = self.p0 * bary.x + self.p1 * bary.y + self.p2 * bary.z;
        let intersection = SurfaceIntersection::new(p, self.normal, 0.0, self.material.as_ref(), self);

        SurfaceSampleRecord::new(intersection, 1.0 / self.area)
    }

    fn material(&self) -> &dyn BSDF {
        self.material.as_ref()
    }
}

impl Triangle {
    pub fn new(p0: Vector3f, p1: Vector3f, p2: Vector3f, material: Arc<dyn BSDF>) -> Self {
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let cross = e1.cross(&e2);
        let area = 0.5 * cross.norm();
        let normal = if area > 0.0 { cross.normalize() } else { Vector3f::zeros() };
        Triangle { p0, p1, p2, e1, e2, normal, area, material }
    }

}
