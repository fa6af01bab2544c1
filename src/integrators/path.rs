// Copyright @yucwang 2026

use super::mis::mis_weight;

use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::scene::Scene;
use crate::math::constants::{ Float, PDF_EPSILON, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Which estimator shades non-emissive hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// BSDF importance sampling only.
    Bsdf,
    /// Next-event estimation with BSDF-sampled indirect bounces.
    Light,
    /// Both estimators, each weighted against the other, summed.
    Mis,
}

impl FromStr for SamplingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bsdf" | "brdf" => Ok(SamplingMode::Bsdf),
            "light" => Ok(SamplingMode::Light),
            "mis" => Ok(SamplingMode::Mis),
            other => Err(format!("unknown sampling mode `{}` (expected bsdf, light or mis)", other)),
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingMode::Bsdf => "bsdf",
            SamplingMode::Light => "light",
            SamplingMode::Mis => "mis",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorSettings {
    pub mode: SamplingMode,
    /// Paths deeper than this return the background colour.
    pub max_depth: u32,
    /// Russian roulette continuation probability.
    pub survival_probability: Float,
    pub background: RGBSpectrum,
    /// Distance secondary rays are pushed along their direction.
    pub ray_offset: Float,
    /// Relative distance under which a shadow-ray hit counts as the light
    /// sample itself.
    pub occlusion_tolerance: Float,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            mode: SamplingMode::Light,
            max_depth: 105,
            survival_probability: 0.8,
            background: RGBSpectrum::new(0.01, 0.01, 0.01),
            ray_offset: 0.01,
            occlusion_tolerance: 1e-3,
        }
    }
}

pub struct PathIntegrator {
    settings: IntegratorSettings,
}

impl PathIntegrator {
    pub fn new(settings: IntegratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IntegratorSettings {
        &self.settings
    }

    /// Swaps in new settings. Returns whether anything changed.
    pub fn update_settings(&mut self, settings: IntegratorSettings) -> bool {
        if self.settings == settings {
            return false;
        }
        log::info!("Integrator settings updated: mode {}, max depth {}, survival {}.",
                   settings.mode, settings.max_depth, settings.survival_probability);
        self.settings = settings;
        true
    }

    /// Radiance arriving along `ray`.
    pub fn cast_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut dyn RngCore) -> RGBSpectrum {
        let hit = match scene.ray_intersection(ray) {
            Some(hit) => hit,
            None => return self.settings.background,
        };

        if hit.is_emissive() {
            return hit.le();
        }

        match self.settings.mode {
            SamplingMode::Bsdf => self.shade_bsdf(scene, ray, &hit, 0, false, rng),
            SamplingMode::Light => self.shade_light(scene, ray, &hit, 0, false, rng),
            SamplingMode::Mis => {
                self.shade_bsdf(scene, ray, &hit, 0, true, rng)
                    + self.shade_light(scene, ray, &hit, 0, true, rng)
            }
        }
    }

    /// Normal flipped onto the side `wo` leaves from.
    fn facing_normal(hit: &SurfaceIntersection<'_>, wo: &Vector3f) -> Vector3f {
        let n = hit.normal();
        if n.dot(wo) < 0.0 {
            -n
        } else {
            n
        }
    }

    /// Estimates outgoing radiance at `hit` by following BSDF-sampled
    /// directions until they reach an emitter.
    pub fn shade_bsdf(&self,
                      scene: &Scene,
                      ray: &Ray3f,
                      hit: &SurfaceIntersection<'_>,
                      depth: u32,
                      use_mis: bool,
                      rng: &mut dyn RngCore) -> RGBSpectrum {
        let settings = &self.settings;
        if depth > settings.max_depth {
            return settings.background;
        }
        if rng.gen::<Float>() >= settings.survival_probability {
            return RGBSpectrum::zeros();
        }

        let wo = -ray.dir();
        let n = Self::facing_normal(hit, &wo);
        let p = hit.p();
        let material = hit.material();

        let wi = material.sample(&wo, &n, rng);
        let pdf = material.pdf(&wo, &wi, &n);
        let cos_theta = wi.dot(&n);
        if pdf < PDF_EPSILON || cos_theta < 0.0 {
            return RGBSpectrum::zeros();
        }

        let next_ray = Ray3f::spawn(p, wi, settings.ray_offset);
        let next_hit = match scene.ray_intersection(&next_ray) {
            Some(next_hit) => next_hit,
            None => return RGBSpectrum::zeros(),
        };

        let (li, weight) = if next_hit.is_emissive() {
            let weight = if use_mis {
                mis_weight(pdf, scene.light_pdf(&p, &next_hit))
            } else {
                1.0
            };
            (next_hit.le(), weight)
        } else {
            (self.shade_bsdf(scene, &next_ray, &next_hit, depth + 1, use_mis, rng), 1.0)
        };

        let f = material.eval(&wo, &wi, &n);
        li.component_mul(&f) * (cos_theta * weight / (settings.survival_probability * pdf))
    }

    /// Estimates outgoing radiance at `hit` with one explicit light sample
    /// per vertex plus a BSDF-sampled indirect bounce that ignores emitters.
    pub fn shade_light(&self,
                       scene: &Scene,
                       ray: &Ray3f,
                       hit: &SurfaceIntersection<'_>,
                       depth: u32,
                       use_mis: bool,
                       rng: &mut dyn RngCore) -> RGBSpectrum {
        let settings = &self.settings;
        if depth > settings.max_depth {
            return settings.background;
        }

        let wo = -ray.dir();
        let n = Self::facing_normal(hit, &wo);
        let p = hit.p();
        let material = hit.material();

        let l_dir = self.direct_light(scene, &p, &wo, &n, hit, use_mis, rng);

        let mut l_indir = RGBSpectrum::zeros();
        if rng.gen::<Float>() < settings.survival_probability {
            let wi = material.sample(&wo, &n, rng);
            let pdf = material.pdf(&wo, &wi, &n);
            let cos_theta = wi.dot(&n);
            if pdf >= PDF_EPSILON && cos_theta >= 0.0 {
                let next_ray = Ray3f::spawn(p, wi, settings.ray_offset);
                if let Some(next_hit) = scene.ray_intersection(&next_ray) {
                    if !next_hit.is_emissive() {
                        let li = self.shade_light(scene, &next_ray, &next_hit, depth + 1, use_mis, rng);
                        let f = material.eval(&wo, &wi, &n);
                        l_indir = li.component_mul(&f)
                            * (cos_theta / (pdf * settings.survival_probability));
                    }
                }
            }
        }

        l_dir + l_indir
    }

    fn direct_light(&self,
                    scene: &Scene,
                    p: &Vector3f,
                    wo: &Vector3f,
                    n: &Vector3f,
                    hit: &SurfaceIntersection<'_>,
                    use_mis: bool,
                    rng: &mut dyn RngCore) -> RGBSpectrum {
        let settings = &self.settings;
        let light = match scene.sample_light(rng) {
            Some(light) => light,
            None => return RGBSpectrum::zeros(),
        };
        let x = light.intersection().p();
        let to_light = x - p;
        let dist2 = to_light.norm_squared();
        if dist2 <= 0.0 {
            return RGBSpectrum::zeros();
        }
        let dist = dist2.sqrt();
        let ws = to_light / dist;

        let cos_surface = ws.dot(n);
        let cos_light = light.intersection().normal().dot(&(-ws));
        let pdf_light = light.pdf();
        if cos_surface <= 0.0 || cos_light <= 0.0 || pdf_light <= PDF_EPSILON {
            return RGBSpectrum::zeros();
        }

        let shadow_ray = Ray3f::spawn(*p, ws, settings.ray_offset);
        let tolerance = settings.occlusion_tolerance * dist.max(1.0);
        let unoccluded = scene
            .ray_intersection(&shadow_ray)
            .map_or(false, |blocker| (blocker.p() - x).norm() < tolerance);
        if !unoccluded {
            return RGBSpectrum::zeros();
        }

        let material = hit.material();
        let f = material.eval(wo, &ws, n);
        let mut l_dir = light.intersection().le().component_mul(&f)
            * (cos_surface * cos_light / (dist2 * pdf_light));
        if use_mis {
            let bsdf_pdf = material.pdf(wo, &ws, n);
            l_dir *= mis_weight(scene.light_pdf(p, light.intersection()), bsdf_pdf);
        }
        l_dir
    }
}

impl Integrator for PathIntegrator {
    fn radiance(&self, scene: &Scene, ray: &Ray3f, rng: &mut dyn RngCore) -> RGBSpectrum {
        self.cast_ray(scene, ray, rng)
    }

    fn describe(&self) -> String {
        format!("PathIntegrator(mode: {}, max depth: {}, survival: {})",
                self.settings.mode, self.settings.max_depth, self.settings.survival_probability)
    }
}
