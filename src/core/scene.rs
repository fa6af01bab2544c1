// Copyright @yucwang 2026

use crate::core::bvh::BVH;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

use rand::{Rng, RngCore};
use std::sync::Arc;

/// Aggregate of every primitive in a render.
///
/// Primitives are added during setup, then `build_bvh` freezes them into the
/// acceleration structure. Emissive primitives are tracked separately along
/// with their total area so lights can be drawn proportionally to area.
pub struct Scene {
    objects: Vec<Arc<dyn Shape>>,
    emitters: Vec<usize>,
    emitted_area: Float,
    bvh: Option<BVH>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            emitters: Vec::new(),
            emitted_area: 0.0,
            bvh: None,
        }
    }

    pub fn add(&mut self, shape: Arc<dyn Shape>) {
        if shape.is_emissive() {
            self.emitters.push(self.objects.len());
            self.emitted_area += shape.surface_area();
        }
        self.objects.push(shape);
        if self.bvh.take().is_some() {
            log::warn!("Primitive added after BVH construction; the BVH must be rebuilt.");
        }
    }

    pub fn emitters(&self) -> impl Iterator<Item = &Arc<dyn Shape>> + '_ {
        self.emitters.iter().map(move |idx| &self.objects[*idx])
    }

    pub fn emitted_area(&self) -> Float {
        self.emitted_area
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn is_built(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn build_bvh(&mut self) {
        let bvh = BVH::new(self.objects.clone());
        log::info!(
            "Scene ready: {} primitives, {} emitters, emissive area {:.3}.",
            self.objects.len(),
            self.emitters.len(),
            self.emitted_area
        );
        self.bvh = Some(bvh);
    }

    pub fn world_bound(&self) -> AABB {
        self.bvh.as_ref().map_or(AABB::default(), |bvh| bvh.world_bound())
    }

    /// Nearest hit. A scene whose BVH was never built behaves as empty.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        self.bvh.as_ref()?.ray_intersection(ray)
    }

    /// Draws a point on the emissive surfaces, choosing an emitter in
    /// proportion to its area. The pdf is an area density over the union of
    /// all emitters.
    pub fn sample_light(&self, rng: &mut dyn RngCore) -> Option<SurfaceSampleRecord<'_>> {
        if self.emitters.is_empty() || self.emitted_area <= 0.0 {
            return None;
        }

        let p = rng.gen::<Float>() * self.emitted_area;
        let mut area_sum = 0.0;
        let mut chosen = self.emitters[self.emitters.len() - 1];
        for idx in &self.emitters {
            area_sum += self.objects[*idx].surface_area();
            if area_sum >= p {
                chosen = *idx;
                break;
            }
        }

        let shape = &self.objects[chosen];
        let mut record = shape.sample(rng);
        record.set_pdf(record.pdf() * shape.surface_area() / self.emitted_area);
        Some(record)
    }

    /// Solid-angle density with which light sampling from `reference` would
    /// have produced the emitter point `hit`, including the chance of
    /// picking that emitter.
    pub fn light_pdf(&self, reference: &Vector3f, hit: &SurfaceIntersection<'_>) -> Float {
        if self.emitted_area <= 0.0 {
            return 0.0;
        }
        let shape = hit.shape();
        if let Some(pdf) = shape.solid_angle_pdf(reference) {
            return pdf * shape.surface_area() / self.emitted_area;
        }

        let to_light = hit.p() - reference;
        let dist2 = to_light.norm_squared();
        if dist2 <= 0.0 {
            return 0.0;
        }
        let cos_light = hit.normal().dot(&(-to_light / dist2.sqrt())).abs();
        if cos_light <= 0.0 {
            return 0.0;
        }

        dist2 / (cos_light * self.emitted_area)
    }
}
