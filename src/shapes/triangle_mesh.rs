// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::core::bsdf::BSDF;
use crate::core::bvh::BVH;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

use rand::RngCore;
use std::path::Path;
use std::sync::Arc;

/// Triangle soup sharing one material, accelerated by its own BVH.
///
/// Hits and samples report the individual triangle as their shape.
pub struct TriangleMesh {
    triangles: Vec<Arc<Triangle>>,
    bvh: BVH<Triangle>,
    area: Float,
    material: Arc<dyn BSDF>,
}

impl TriangleMesh {
    pub fn new(corners: Vec<[Vector3f; 3]>, material: Arc<dyn BSDF>) -> Self {
        assert!(!corners.is_empty(), "a triangle mesh needs at least one triangle");
        let triangles: Vec<Arc<Triangle>> = corners
            .into_iter()
            .map(|[p0, p1, p2]| Arc::new(Triangle::new(p0, p1, p2, material.clone())))
            .collect();
        let area = triangles.iter().map(|tri| tri.surface_area()).sum();
        let bvh = BVH::new(triangles.clone());

        Self { triangles, bvh, area, material }
    }

    pub fn from_obj<P: AsRef<Path>>(path: P, material: Arc<dyn BSDF>) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::load_obj_from_file(path)?;
        let corners = obj_utils::triangles_from_obj_set(&obj_set)?;
        Ok(Self::new(corners, material))
    }

    /// Planar quad spanned by `origin`, `origin + u` and `origin + v`,
    /// facing `u x v`.
    pub fn quad(origin: Vector3f, u: Vector3f, v: Vector3f, material: Arc<dyn BSDF>) -> Self {
        let corners = vec![
            [origin, origin + u, origin + u + v],
            [origin, origin + u + v, origin + v],
        ];
        Self::new(corners, material)
    }
}

impl Shape for TriangleMesh {
    fn bounding_box(&self) -> AABB {
        self.bvh.world_bound()
    }

    fn surface_area(&self) -> Float {
        self.area
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        self.bvh.ray_intersection(ray)
    }

    fn sample(&self, rng: &mut dyn RngCore) -> SurfaceSampleRecord<'_> {
        match self.bvh.sample(rng) {
            Some(record) => record,
            // Zero total area: every triangle is degenerate.
            None => self.triangles[0].sample(rng),
        }
    }

    fn material(&self) -> &dyn BSDF {
        self.material.as_ref()
    }
}
