// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, FLOAT_INF };
use super::ray::{ Ray3f };

/// Axis-aligned bounding box. The default box is empty: its corners are
/// inverted infinities, so a union with any point or box yields exactly
/// that point or box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector3f::new(FLOAT_INF, FLOAT_INF, FLOAT_INF),
               p_max: Vector3f::new(-FLOAT_INF, -FLOAT_INF, -FLOAT_INF) }
    }
}

impl AABB {
    pub fn new(p0: Vector3f, p1: Vector3f) -> Self {
        Self { p_min: p0.inf(&p1), p_max: p0.sup(&p1) }
    }

    pub fn from_point(p: Vector3f) -> Self {
        Self { p_min: p, p_max: p }
    }

    pub fn union(a: &AABB, b: &AABB) -> AABB {
        Self { p_min: a.p_min.inf(&b.p_min), p_max: a.p_max.sup(&b.p_max) }
    }

    pub fn union_point(a: &AABB, p: &Vector3f) -> AABB {
        Self { p_min: a.p_min.inf(p), p_max: a.p_max.sup(p) }
    }

    /// Overlap of two boxes. Disjoint inputs give an empty box.
    pub fn intersect(a: &AABB, b: &AABB) -> AABB {
        Self { p_min: a.p_min.sup(&b.p_min), p_max: a.p_max.inf(&b.p_max) }
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        *self = AABB::union_point(self, p);
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        *self = AABB::union(self, other);
    }

    pub fn centroid(&self) -> Vector3f {
        0.5 * self.p_min + 0.5 * self.p_max
    }

    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    pub fn surface_area(&self) -> Float {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    pub fn volume(&self) -> Float {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.diagonal();
        d.x * d.y * d.z
    }

    /// Axis with the largest extent. Ties go to x, then y.
    pub fn max_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// Position of `p` relative to the corners: 0 at `p_min`, 1 at `p_max`.
    pub fn offset(&self, p: &Vector3f) -> Vector3f {
        let mut o = p - self.p_min;
        for idx in 0..3 {
            if self.p_max[idx] > self.p_min[idx] {
                o[idx] /= self.p_max[idx] - self.p_min[idx];
            }
        }
        o
    }

    pub fn contains_point(&self, p: &Vector3f) -> bool {
        (0..3).all(|idx| p[idx] >= self.p_min[idx] && p[idx] <= self.p_max[idx])
    }

    pub fn contains(&self, other: &AABB) -> bool {
        other.is_empty()
            || (self.contains_point(&other.p_min) && self.contains_point(&other.p_max))
    }

    pub fn overlaps(&self, other: &AABB) -> bool {
        !AABB::intersect(self, other).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|idx| self.p_min[idx] > self.p_max[idx])
    }

    /// Slab test against the ray's `[min_t, max_t]` segment.
    ///
    /// Axes where the ray is parallel to the slab (infinite inverse
    /// direction) are decided by whether the origin lies inside that slab,
    /// which keeps `0 * inf` out of the interval arithmetic.
    pub fn ray_intersect(&self, ray: &Ray3f) -> bool {
        self.ray_intersect_range(ray).is_some()
    }

    /// Entry and exit distances of the ray through the box, clipped to the
    /// ray segment.
    pub fn ray_intersect_range(&self, ray: &Ray3f) -> Option<(Float, Float)> {
        if self.is_empty() {
            return None;
        }

        let o = ray.origin();
        let inv = ray.inv_dir();
        let mut t_min = ray.min_t;
        let mut t_max = ray.max_t;

        for idx in 0..3 {
            if inv[idx].is_infinite() {
                if o[idx] < self.p_min[idx] || o[idx] > self.p_max[idx] {
                    return None;
                }
                continue;
            }

            let mut t0 = (self.p_min[idx] - o[idx]) * inv[idx];
            let mut t1 = (self.p_max[idx] - o[idx]) * inv[idx];
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }

        Some((t_min, t_max))
    }
}

/* Test for AABB */
#[cfg(test)]
mod tests {
    use super::AABB;
    use super::Ray3f;
    use super::Vector3f;
    use proptest::prelude::*;
    use test_case::test_case;

    fn unit_box() -> AABB {
        AABB::new(Vector3f::new(-1.0, -1.0, -1.0), Vector3f::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_geometry() {
        let min = Vector3f::new(1.0, 7.0, 3.0);
        let max = Vector3f::new(4.0, 4.0, 4.0);
        let mut bbox: AABB = AABB::new(min, max);
        assert_eq!(bbox.p_min, Vector3f::new(1.0, 4.0, 3.0));
        assert_eq!(bbox.p_max, Vector3f::new(4.0, 7.0, 4.0));

        assert_eq!(bbox.centroid(), Vector3f::new(2.5, 5.5, 3.5));
        assert!((bbox.surface_area() - 30.0).abs() < 1e-5);
        assert!((bbox.volume() - 9.0).abs() < 1e-5);

        bbox.expand_by_point(&Vector3f::new(-1.0, 5.0, 6.0));
        assert_eq!(bbox.p_min.x, -1.0);
        assert_eq!(bbox.p_max.z, 6.0);
        assert_eq!(bbox.max_extent(), 0);

        let mut bbox1 = AABB::default();
        assert!(bbox1.is_empty());
        assert_eq!(bbox1.surface_area(), 0.0);
        bbox1.expand_by_aabb(&bbox);
        assert_eq!(bbox1, bbox);
    }

    #[test]
    fn test_empty_box_is_union_identity() {
        let p = Vector3f::new(3.0, -2.0, 0.5);
        let b = AABB::union_point(&AABB::default(), &p);
        assert_eq!(b.p_min, p);
        assert_eq!(b.p_max, p);
        assert_eq!(AABB::union(&AABB::default(), &unit_box()), unit_box());
    }

    #[test_case(Vector3f::new(1.0, 1.0, 1.0), 0 ; "cube ties go to x")]
    #[test_case(Vector3f::new(1.0, 2.0, 2.0), 1 ; "y wins tie with z")]
    #[test_case(Vector3f::new(1.0, 1.0, 3.0), 2 ; "z strictly largest")]
    #[test_case(Vector3f::new(2.0, 2.0, 1.0), 0 ; "x wins tie with y")]
    fn test_max_extent_ties(diag: Vector3f, axis: usize) {
        let b = AABB::new(Vector3f::zeros(), diag);
        assert_eq!(b.max_extent(), axis);
    }

    #[test]
    fn test_intersect_and_overlap() {
        let a = AABB::new(Vector3f::zeros(), Vector3f::new(2.0, 2.0, 2.0));
        let b = AABB::new(Vector3f::new(1.0, 1.0, 1.0), Vector3f::new(3.0, 3.0, 3.0));
        let c = AABB::new(Vector3f::new(5.0, 5.0, 5.0), Vector3f::new(6.0, 6.0, 6.0));

        let ab = AABB::intersect(&a, &b);
        assert_eq!(ab.p_min, Vector3f::new(1.0, 1.0, 1.0));
        assert_eq!(ab.p_max, Vector3f::new(2.0, 2.0, 2.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(AABB::intersect(&a, &c).is_empty());
        assert!(a.contains(&ab));
        assert!(!a.contains(&b));
        assert_eq!(a.offset(&Vector3f::new(1.0, 0.5, 2.0)), Vector3f::new(0.5, 0.25, 1.0));
    }

    #[test_case(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(1.0, 1.0, 1.0), true ; "origin inside")]
    #[test_case(Vector3f::new(-5.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), true ; "box ahead")]
    #[test_case(Vector3f::new(5.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), false ; "box behind")]
    #[test_case(Vector3f::new(-5.0, 2.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), false ; "parallel outside slab")]
    #[test_case(Vector3f::new(-5.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), true ; "parallel on slab boundary")]
    #[test_case(Vector3f::new(-1.1, 0.0, 0.0), Vector3f::new(-0.1, 10.0, 10.0), false ; "oblique miss")]
    fn test_aabb_ray_intersect(o: Vector3f, d: Vector3f, expected: bool) {
        let ray = Ray3f::new(o, d, None, None);
        assert_eq!(unit_box().ray_intersect(&ray), expected);
    }

    #[test]
    fn test_aabb_ray_segment_clipping() {
        let bbox = unit_box();
        let o = Vector3f::new(-5.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 0.0);
        assert!(!bbox.ray_intersect(&Ray3f::new(o, d, Some(0.0), Some(3.0))));
        let (t0, t1) = bbox.ray_intersect_range(&Ray3f::new(o, d, None, None))
            .expect("ray should cross the box");
        assert!((t0 - 4.0).abs() < 1e-5);
        assert!((t1 - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_box_never_hit() {
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(!AABB::default().ray_intersect(&ray));
    }

    fn arb_box() -> impl Strategy<Value = AABB> {
        let coord = -100.0f32..100.0f32;
        (coord.clone(), coord.clone(), coord.clone(), coord.clone(), coord.clone(), coord)
            .prop_map(|(a, b, c, d, e, f)| AABB::new(Vector3f::new(a, b, c), Vector3f::new(d, e, f)))
    }

    proptest! {
        #[test]
        fn prop_union_is_smallest_enclosing_box(a in arb_box(), b in arb_box()) {
            let u = AABB::union(&a, &b);
            prop_assert!(u.contains(&a));
            prop_assert!(u.contains(&b));
            for idx in 0..3 {
                prop_assert!(u.p_min[idx] == a.p_min[idx] || u.p_min[idx] == b.p_min[idx]);
                prop_assert!(u.p_max[idx] == a.p_max[idx] || u.p_max[idx] == b.p_max[idx]);
            }
        }

        #[test]
        fn prop_union_commutative_and_idempotent(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(AABB::union(&a, &b), AABB::union(&b, &a));
            prop_assert_eq!(AABB::union(&a, &a), a);
        }
    }
}
