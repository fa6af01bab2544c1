// Copyright @yucwang 2023

use crate::math::constants::{ EPSILON, Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

use rand::RngCore;

// Values returned by BSDF evaluation. All directions point away from
// the surface.
pub type BSDFValue = RGBSpectrum;

pub trait BSDF: Send + Sync {
    /// Importance-samples an incident direction for outgoing `wo` at a
    /// surface with normal `n`.
    fn sample(&self, wo: &Vector3f, n: &Vector3f, rng: &mut dyn RngCore) -> Vector3f;

    /// Solid-angle density of `sample` producing `wi`.
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float;

    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> BSDFValue;

    fn emission(&self) -> RGBSpectrum;

    fn has_emission(&self) -> bool {
        self.emission().norm() > EPSILON
    }
}
