// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFValue, BSDF};
use crate::math::constants::{ Float, PI, Vector3f };
use crate::math::frame::{ reflect, Frame };
use crate::math::spectrum::RGBSpectrum;

use rand::{Rng, RngCore};

/// Normalized Blinn-Phong lobe around the half vector.
///
/// Half vectors are drawn with density `(n + 1) / (2 pi) * cos^n` around the
/// normal and mirrored into an incident direction.
pub struct GlossyBSDF {
    color: RGBSpectrum,
    exponent: Float,
    emission: RGBSpectrum,
}

impl GlossyBSDF {
    pub fn new(rgb: RGBSpectrum, exponent: Float) -> Self {
        Self { color: rgb, exponent, emission: RGBSpectrum::zeros() }
    }

    pub fn emissive(rgb: RGBSpectrum, exponent: Float, emission: RGBSpectrum) -> Self {
        Self { color: rgb, exponent, emission }
    }

    fn half_vector(wo: &Vector3f, wi: &Vector3f) -> Option<Vector3f> {
        let h = wo + wi;
        if h.norm_squared() <= 0.0 {
            None
        } else {
            Some(h.normalize())
        }
    }
}

impl BSDF for GlossyBSDF {
    fn sample(&self, wo: &Vector3f, n: &Vector3f, rng: &mut dyn RngCore) -> Vector3f {
        let u1 = rng.gen::<Float>();
        let u2 = rng.gen::<Float>();
        let cos_theta = u1.powf(1.0 / (self.exponent + 1.0));
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = 2.0 * PI * u2;
        let h_local = Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        let h = Frame::from_normal(n).from_local(&h_local);

        reflect(wo, &h)
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        if n.dot(wi) <= 0.0 {
            return 0.0;
        }
        let h = match Self::half_vector(wo, wi) {
            Some(h) => h,
            None => return 0.0,
        };
        let cos_h = n.dot(&h).max(0.0);
        let wo_dot_h = wo.dot(&h);
        if wo_dot_h <= 0.0 {
            return 0.0;
        }

        cos_h.powf(self.exponent) * (self.exponent + 1.0) / (2.0 * PI) / (4.0 * wo_dot_h)
    }

    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> BSDFValue {
        if n.dot(wi) <= 0.0 || n.dot(wo) <= 0.0 {
            return BSDFValue::zeros();
        }
        let h = match Self::half_vector(wo, wi) {
            Some(h) => h,
            None => return BSDFValue::zeros(),
        };
        let cos_h = n.dot(&h).max(0.0);

        self.color * ((self.exponent + 2.0) / (8.0 * PI) * cos_h.powf(self.exponent))
    }

    fn emission(&self) -> RGBSpectrum {
        self.emission
    }
}
