// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, PI, Vector2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_sphere;

use rand::{Rng, RngCore};
use std::sync::Arc;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
    radius2: Float,
    area: Float,
    material: Arc<dyn BSDF>,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float, material: Arc<dyn BSDF>) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            area: 4.0 * PI * radius * radius,
            material,
        }
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn surface_area(&self) -> Float {
        self.area
    }

    /// Rays starting inside the sphere report no hit.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        let l = ray.origin() - self.center;
        let c = l.dot(&l) - self.radius2;
        if c < 0.0 {
            return None;
        }

        let d = ray.dir();
        let b = d.dot(&l);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t0 = -b - root;
        let t1 = -b + root;
        let t = if ray.test_segment(t0) {
            t0
        } else if ray.test_segment(t1) {
            t1
        } else {
            return None;
        };

        let p = ray.at(t);
        let normal = (p - self.center).normalize();
        Some(SurfaceIntersection::new(p, normal, t, self.material.as_ref(), self))
    }

    fn sample(&self, rng: &mut dyn RngCore) -> SurfaceSampleRecord<'_> {
        let u = Vector2f::new(rng.gen::<Float>(), rng.gen::<Float>());
        let normal = sample_uniform_sphere(&u);
        let p = self.center + self.radius * normal;
        let intersection = SurfaceIntersection::new(p, normal, 0.0, self.material.as_ref(), self);

        SurfaceSampleRecord::new(intersection, 1.0 / self.area)
    }

    fn material(&self) -> &dyn BSDF {
        self.material.as_ref()
    }

    /// Inverse of the solid angle the sphere subtends from `reference`,
    /// or of the full sphere of directions from inside.
    fn solid_angle_pdf(&self, reference: &Vector3f) -> Option<Float> {
        let w = self.center - reference;
        let dc2 = w.dot(&w);
        let solid_angle = if dc2 > self.radius2 {
            let sin_theta_max2 = (self.radius2 / dc2).min(1.0).max(0.0);
            let cos_theta_max = (1.0 - sin_theta_max2).sqrt();
            2.0 * PI * (1.0 - cos_theta_max)
        } else {
            4.0 * PI
        };

        if solid_angle > 0.0 {
            Some(1.0 / solid_angle)
        } else {
            None
        }
    }
}
