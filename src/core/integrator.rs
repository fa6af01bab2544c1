// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use rand::RngCore;

/// Per-sample radiance estimator shared read-only by all render workers.
pub trait Integrator: Sync {
    fn radiance(&self, scene: &Scene, ray: &Ray3f, rng: &mut dyn RngCore) -> RGBSpectrum;

    fn describe(&self) -> String {
        String::from("Integrator")
    }
}
