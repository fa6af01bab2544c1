// Copyright @yucwang 2023

use crate::core::bsdf::{BSDFValue, BSDF};
use crate::math::constants::{ Float, INV_PI, Vector2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_cosine_hemisphere, sample_cosine_hemisphere_pdf };

use rand::{Rng, RngCore};

pub struct LambertianDiffuseBSDF {
    color: RGBSpectrum,
    emission: RGBSpectrum,
}

impl BSDF for LambertianDiffuseBSDF {
    fn sample(&self, _wo: &Vector3f, n: &Vector3f, rng: &mut dyn RngCore) -> Vector3f {
        let u = Vector2f::new(rng.gen::<Float>(), rng.gen::<Float>());
        Frame::from_normal(n).from_local(&sample_cosine_hemisphere(&u))
    }

    fn pdf(&self, _wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        sample_cosine_hemisphere_pdf(n.dot(wi))
    }

    fn eval(&self, _wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> BSDFValue {
        if n.dot(wi) > 0.0 {
            self.color * INV_PI
        } else {
            BSDFValue::zeros()
        }
    }

    fn emission(&self) -> RGBSpectrum {
        self.emission
    }
}

impl LambertianDiffuseBSDF {
    pub fn new(rgb: RGBSpectrum) -> Self {
        Self {
            color: rgb,
            emission: RGBSpectrum::zeros(),
        }
    }

    pub fn emissive(rgb: RGBSpectrum, emission: RGBSpectrum) -> Self {
        Self {
            color: rgb,
            emission,
        }
    }
}
