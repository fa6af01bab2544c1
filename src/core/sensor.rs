// Copyright @yucwang 2026

use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

pub trait Sensor: Sync {
    /// Primary ray through normalized film position `u`, with `(0, 0)` the
    /// top-left corner and `(1, 1)` the bottom-right one.
    fn sample_ray(&self, u: &Vector2f) -> Ray3f;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
