// Copyright @yucwang 2026

use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

enum BVHNode<S: ?Sized> {
    Leaf {
        bounds: AABB,
        area: Float,
        shape: Arc<S>,
    },
    Interior {
        bounds: AABB,
        area: Float,
        left: Box<BVHNode<S>>,
        right: Box<BVHNode<S>>,
    },
}

impl<S: Shape + ?Sized> BVHNode<S> {
    fn bounds(&self) -> &AABB {
        match self {
            BVHNode::Leaf { bounds, .. } | BVHNode::Interior { bounds, .. } => bounds,
        }
    }

    fn area(&self) -> Float {
        match self {
            BVHNode::Leaf { area, .. } | BVHNode::Interior { area, .. } => *area,
        }
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        if !self.bounds().ray_intersect(ray) {
            return None;
        }

        match self {
            BVHNode::Leaf { shape, .. } => shape.ray_intersection(ray),
            BVHNode::Interior { left, right, .. } => {
                let hit_left = left.ray_intersection(ray);
                let hit_right = right.ray_intersection(ray);
                match (hit_left, hit_right) {
                    (Some(l), Some(r)) => {
                        if r.t() < l.t() {
                            Some(r)
                        } else {
                            Some(l)
                        }
                    }
                    (Some(l), None) => Some(l),
                    (None, r) => r,
                }
            }
        }
    }
}

struct BuildPrimitive<S: ?Sized> {
    shape: Arc<S>,
    bounds: AABB,
    centroid: Vector3f,
    area: Float,
}

/// Bounding-volume hierarchy over shared primitives.
///
/// Children are split at the median centroid along the longest axis of the
/// centroid bounds. Every node caches the total surface area beneath it so
/// the tree doubles as an area-weighted sampler.
pub struct BVH<S: Shape + ?Sized = dyn Shape> {
    root: Option<Box<BVHNode<S>>>,
    primitive_count: usize,
}

impl<S: Shape + ?Sized> BVH<S> {
    pub fn new(shapes: Vec<Arc<S>>) -> Self {
        let start = Instant::now();
        let primitive_count = shapes.len();
        let prims: Vec<BuildPrimitive<S>> = shapes
            .into_iter()
            .map(|shape| {
                let bounds = shape.bounding_box();
                let area = shape.surface_area();
                BuildPrimitive { shape, bounds, centroid: bounds.centroid(), area }
            })
            .collect();

        let root = if prims.is_empty() {
            None
        } else {
            Some(Self::build(prims))
        };

        log::info!(
            "BVH built over {} primitives in {:.3} ms.",
            primitive_count,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Self { root, primitive_count }
    }

    fn build(mut prims: Vec<BuildPrimitive<S>>) -> Box<BVHNode<S>> {
        let count = prims.len();
        assert!(count > 0, "BVH node built over no primitives");

        if count == 1 {
            let prim = prims.remove(0);
            return Box::new(BVHNode::Leaf {
                bounds: prim.bounds,
                area: prim.area,
                shape: prim.shape,
            });
        }

        if count > 2 {
            let mut centroid_bounds = AABB::default();
            for prim in &prims {
                centroid_bounds.expand_by_point(&prim.centroid);
            }
            let axis = centroid_bounds.max_extent();
            prims.sort_by(|a, b| {
                a.centroid[axis]
                    .partial_cmp(&b.centroid[axis])
                    .unwrap_or(Ordering::Equal)
            });
        }

        let right_prims = prims.split_off(count / 2);
        assert_eq!(prims.len() + right_prims.len(), count, "BVH split lost primitives");

        let left = Self::build(prims);
        let right = Self::build(right_prims);
        Box::new(BVHNode::Interior {
            bounds: AABB::union(left.bounds(), right.bounds()),
            area: left.area() + right.area(),
            left,
            right,
        })
    }

    pub fn len(&self) -> usize {
        self.primitive_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn world_bound(&self) -> AABB {
        self.root.as_ref().map_or(AABB::default(), |root| *root.bounds())
    }

    pub fn total_area(&self) -> Float {
        self.root.as_ref().map_or(0.0, |root| root.area())
    }

    /// Nearest hit over all primitives. An empty tree never hits.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        self.root.as_ref()?.ray_intersection(ray)
    }

    /// Draws a point over the union of all primitive surfaces, choosing each
    /// primitive with probability proportional to its area. The returned
    /// pdf is an area density over the whole aggregate.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Option<SurfaceSampleRecord<'_>> {
        let root = self.root.as_ref()?;
        let total_area = root.area();
        if total_area <= 0.0 {
            return None;
        }

        let mut p = rng.gen::<Float>() * total_area;
        let mut node: &BVHNode<S> = root;
        let mut record = loop {
            match node {
                BVHNode::Leaf { shape, area, .. } => {
                    let mut record = shape.sample(rng);
                    record.set_pdf(record.pdf() * *area);
                    break record;
                }
                BVHNode::Interior { left, right, .. } => {
                    if p < left.area() {
                        node = &**left;
                    } else {
                        p -= left.area();
                        node = &**right;
                    }
                }
            }
        };
        record.set_pdf(record.pdf() / total_area);
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{BVHNode, BVH};
    use crate::core::bsdf::BSDF;
    use crate::core::shape::Shape;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::math::constants::{Float, Vector3f};
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::shapes::sphere::Sphere;
    use crate::shapes::triangle::Triangle;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn grey() -> Arc<dyn BSDF> {
        Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.5, 0.5, 0.5)))
    }

    fn sphere(x: Float, y: Float, z: Float, r: Float) -> Arc<dyn Shape> {
        Arc::new(Sphere::new(Vector3f::new(x, y, z), r, grey()))
    }

    fn build_triangles() -> Vec<Arc<Triangle>> {
        let mut tris = Vec::new();
        for i in 0..8 {
            let x = i as Float * 2.0;
            let p0 = Vector3f::new(x, 0.0, 0.0);
            let p1 = Vector3f::new(x + 0.5, 0.0, 0.0);
            let p2 = Vector3f::new(x, 0.5, 0.0);
            tris.push(Arc::new(Triangle::new(p0, p1, p2, grey())));
        }
        tris
    }

    fn leaf_count<S: Shape + ?Sized>(node: &BVHNode<S>) -> usize {
        match node {
            BVHNode::Leaf { .. } => 1,
            BVHNode::Interior { left, right, .. } => leaf_count(left) + leaf_count(right),
        }
    }

    #[test]
    fn test_empty_bvh_misses() {
        let bvh: BVH = BVH::new(Vec::new());
        assert!(bvh.is_empty());
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(bvh.ray_intersection(&ray).is_none());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(bvh.sample(&mut rng).is_none());
    }

    #[test]
    fn test_single_primitive_is_leaf() {
        let s = sphere(0.0, 0.0, 5.0, 1.0);
        let bounds = s.bounding_box();
        let area = s.surface_area();
        let bvh = BVH::new(vec![s]);
        match bvh.root.as_deref() {
            Some(BVHNode::Leaf { bounds: b, area: a, .. }) => {
                assert_eq!(*b, bounds);
                assert_eq!(*a, area);
            }
            _ => panic!("single primitive must build a leaf"),
        }
    }

    #[test]
    fn test_two_primitives_keep_input_order() {
        // Reverse centroid order: a sorted split would swap them.
        let a = sphere(10.0, 0.0, 0.0, 1.0);
        let b = sphere(0.0, 0.0, 0.0, 2.0);
        let bvh = BVH::new(vec![a.clone(), b.clone()]);
        match bvh.root.as_deref() {
            Some(BVHNode::Interior { left, right, area, .. }) => {
                match (left.as_ref(), right.as_ref()) {
                    (BVHNode::Leaf { shape: l, .. }, BVHNode::Leaf { shape: r, .. }) => {
                        assert_eq!(Arc::as_ptr(l) as *const u8, Arc::as_ptr(&a) as *const u8);
                        assert_eq!(Arc::as_ptr(r) as *const u8, Arc::as_ptr(&b) as *const u8);
                    }
                    _ => panic!("pair must hold two leaves"),
                }
                assert!((area - (a.surface_area() + b.surface_area())).abs() < 1e-3);
            }
            _ => panic!("two primitives must build an interior node"),
        }
    }

    #[test]
    fn test_equal_distance_hits_resolve_to_left_child() {
        let coincident = |emission: Float| -> Arc<Triangle> {
            let material: Arc<dyn BSDF> = Arc::new(LambertianDiffuseBSDF::emissive(
                RGBSpectrum::new(0.5, 0.5, 0.5),
                RGBSpectrum::new(emission, emission, emission)));
            Arc::new(Triangle::new(Vector3f::new(0.0, 0.0, 0.0),
                                   Vector3f::new(1.0, 0.0, 0.0),
                                   Vector3f::new(0.0, 1.0, 0.0),
                                   material))
        };
        let ray = Ray3f::new(Vector3f::new(0.2, 0.2, 5.0), Vector3f::new(0.0, 0.0, -1.0), None, None);

        let pair = BVH::new(vec![coincident(1.0), coincident(2.0)]);
        let hit = pair.ray_intersection(&ray).expect("hit");
        assert_eq!(hit.le(), RGBSpectrum::new(1.0, 1.0, 1.0));

        let swapped = BVH::new(vec![coincident(2.0), coincident(1.0)]);
        let hit = swapped.ray_intersection(&ray).expect("hit");
        assert_eq!(hit.le(), RGBSpectrum::new(2.0, 2.0, 2.0));

        // Equal centroids keep their order through the median split.
        let four = BVH::new((1..=4).map(|e| coincident(e as Float)).collect());
        let hit = four.ray_intersection(&ray).expect("hit");
        assert_eq!(hit.le(), RGBSpectrum::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_median_split_cached_areas() {
        let shapes: Vec<Arc<dyn Shape>> = (0..7)
            .map(|i| sphere(i as Float * 3.0, 0.0, 0.0, 0.5 + 0.1 * i as Float))
            .collect();
        let expected_area: Float = shapes.iter().map(|s| s.surface_area()).sum();
        let bvh = BVH::new(shapes);
        assert_eq!(bvh.len(), 7);
        assert!((bvh.total_area() - expected_area).abs() < 1e-2);
        let root = bvh.root.as_deref().expect("root");
        assert_eq!(leaf_count(root), 7);
        match root {
            BVHNode::Interior { left, right, .. } => {
                assert_eq!(leaf_count(left), 3);
                assert_eq!(leaf_count(right), 4);
                assert!(left.bounds().p_max.x < right.bounds().p_min.x);
            }
            _ => panic!("expected an interior root"),
        }
    }

    #[test]
    fn test_bvh_vs_naive_triangles() {
        let triangles = build_triangles();
        let bvh = BVH::new(triangles.clone());

        for i in 0..triangles.len() {
            let origin = Vector3f::new(i as Float * 2.0 + 0.1, 0.1, 1.0);
            let ray = Ray3f::new(origin, Vector3f::new(0.0, 0.0, -1.0), None, None);

            let bvh_t = bvh.ray_intersection(&ray).map(|h| h.t());
            let naive_t = triangles
                .iter()
                .filter_map(|tri| tri.ray_intersection(&ray).map(|h| h.t()))
                .fold(None, |acc: Option<Float>, t| Some(acc.map_or(t, |cur| cur.min(t))));

            let bvh_t = bvh_t.expect("BVH miss");
            let naive_t = naive_t.expect("Naive miss");
            assert!((bvh_t - naive_t).abs() < 1e-5);
        }

        let miss_ray = Ray3f::new(Vector3f::new(100.0, 100.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(bvh.ray_intersection(&miss_ray).is_none());
    }

    #[test]
    fn test_sampling_frequency_follows_area() {
        let radii = [1.0, 2.0, 3.0];
        let centers = [-20.0, 0.0, 20.0];
        let shapes: Vec<Arc<dyn Shape>> = radii
            .iter()
            .zip(centers.iter())
            .map(|(r, c)| sphere(*c, 0.0, 0.0, *r))
            .collect();
        let bvh = BVH::new(shapes);
        let total: Float = radii.iter().map(|r| r * r).sum();

        let mut rng = StdRng::seed_from_u64(7);
        let n = 60000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            let record = bvh.sample(&mut rng).expect("sample");
            let x = record.intersection().p().x;
            let idx = if x < -10.0 { 0 } else if x < 10.0 { 1 } else { 2 };
            counts[idx] += 1;

            // Uniform over the aggregate area.
            let expected_pdf = 1.0 / bvh.total_area();
            assert!((record.pdf() - expected_pdf).abs() / expected_pdf < 1e-3);
        }

        for i in 0..3 {
            let freq = counts[i] as Float / n as Float;
            let expected = radii[i] * radii[i] / total;
            assert!((freq - expected).abs() < 0.01, "leaf {} freq {} vs {}", i, freq, expected);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_nearest_hit_matches_brute_force(
            spheres in prop::collection::vec(
                (-20.0f32..20.0, -20.0f32..20.0, -20.0f32..20.0, 0.2f32..3.0), 1..24),
            dir in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
        ) {
            prop_assume!(Vector3f::new(dir.0, dir.1, dir.2).norm() > 0.1);
            let shapes: Vec<Arc<dyn Shape>> = spheres
                .iter()
                .map(|(x, y, z, r)| sphere(*x, *y, *z, *r))
                .collect();
            let origin = Vector3f::new(0.0, 0.0, -40.0);
            let ray = Ray3f::new(origin, Vector3f::new(dir.0, dir.1, dir.2), None, None);

            let brute = shapes
                .iter()
                .filter_map(|s| s.ray_intersection(&ray).map(|h| h.t()))
                .fold(None, |acc: Option<Float>, t| Some(acc.map_or(t, |cur| cur.min(t))));
            let bvh = BVH::new(shapes.clone());
            let hit = bvh.ray_intersection(&ray).map(|h| h.t());

            match (brute, hit) {
                (None, None) => {}
                (Some(a), Some(b)) => prop_assert!((a - b).abs() < 1e-3),
                other => prop_assert!(false, "mismatch {:?}", other),
            }
        }
    }
}
