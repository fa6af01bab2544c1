// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, FLOAT_MAX};

#[derive(Debug, Clone, Copy)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    inv_dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    /// Builds a ray with a normalized direction. The componentwise inverse
    /// direction is cached for slab tests; a zero component maps to an
    /// infinite inverse.
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        let dir = d.normalize();
        let inv_dir = Vector3f::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);
        Self { origin: o, dir, inv_dir,
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX) }
    }

    /// Spawns a ray whose origin is nudged along the direction, used for
    /// secondary rays leaving a surface.
    pub fn spawn(p: Vector3f, d: Vector3f, offset: Float) -> Self {
        let dir = d.normalize();
        Self::new(p + dir * offset, dir, None, None)
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn inv_dir(&self) -> Vector3f {
        self.inv_dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */
